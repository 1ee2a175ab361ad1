//! Smith-Waterman local alignment with Gotoh affine gaps for protein
//! sequences, plus the preparation, matrix and report pieces around it.

pub mod align;
pub mod alphabets;
pub mod error;
pub mod io;
pub mod report;
pub mod seq;
