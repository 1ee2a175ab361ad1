use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BioError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("invalid scoring parameters: {msg}")]
    InvalidScoring { msg: String },

    #[error("unknown scoring matrix: {name}")]
    UnknownMatrix { name: String },

    #[error("scoring matrix has no entry for ({a}, {b})")]
    UndefinedScore { a: char, b: char },

    #[error("scoring matrix format error at line {line}: {msg}")]
    MatrixFormat { msg: String, line: usize },

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type BioResult<T> = Result<T, BioError>;
