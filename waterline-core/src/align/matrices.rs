//! Substitution matrices: the built-in BLOSUM tables and a parser for the
//! whitespace-delimited NCBI/EMBOSS table format.

use super::encode::{residue_code, residue_symbol, EncodedSeq, ALPHABET_SIZE};
use crate::error::{BioError, BioResult};
use bit_set::BitSet;
use std::path::Path;
use std::sync::LazyLock;

const BLOSUM62_TABLE: &str = include_str!("../../matrices/BLOSUM62");
const BLOSUM50_TABLE: &str = include_str!("../../matrices/BLOSUM50");

static BLOSUM62: LazyLock<ScoringMatrix> = LazyLock::new(|| {
    ScoringMatrix::parse("BLOSUM62", BLOSUM62_TABLE).expect("built-in BLOSUM62 is well-formed")
});
static BLOSUM50: LazyLock<ScoringMatrix> = LazyLock::new(|| {
    ScoringMatrix::parse("BLOSUM50", BLOSUM50_TABLE).expect("built-in BLOSUM50 is well-formed")
});

const MATRIX_NAMES: &[&str] = &["BLOSUM50", "BLOSUM62"];

/// Names accepted by [`matrix_by_name`].
pub fn matrix_names() -> &'static [&'static str] {
    MATRIX_NAMES
}

/// Look up a built-in matrix, ignoring case. The EMBOSS spellings
/// (`EBLOSUM62`, ...) are accepted as aliases.
pub fn matrix_by_name(name: &str) -> BioResult<ScoringMatrix> {
    let upper = name.trim().to_ascii_uppercase();
    let key = upper.strip_prefix('E').unwrap_or(&upper);
    match key {
        "BLOSUM62" => Ok(BLOSUM62.clone()),
        "BLOSUM50" => Ok(BLOSUM50.clone()),
        _ => Err(BioError::UnknownMatrix {
            name: name.to_string(),
        }),
    }
}

pub fn blosum62() -> ScoringMatrix {
    BLOSUM62.clone()
}

/// Dense residue-by-residue score table.
///
/// Rows are indexed by the residue from the first sequence, columns by the
/// residue from the second; lookups never assume symmetry. Residues the
/// source table did not list have no row/column and are reported by
/// [`ScoringMatrix::check_covers`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringMatrix {
    name: Box<str>,
    scores: [[f32; ALPHABET_SIZE]; ALPHABET_SIZE],
    rows: BitSet,
    cols: BitSet,
}

impl ScoringMatrix {
    /// Parse a table: `#` comment lines, a header of residue letters, then
    /// one row per residue (label followed by one score per header column).
    pub fn parse(name: impl Into<Box<str>>, text: &str) -> BioResult<Self> {
        let mut matrix = ScoringMatrix {
            name: name.into(),
            scores: [[0.0; ALPHABET_SIZE]; ALPHABET_SIZE],
            rows: BitSet::with_capacity(ALPHABET_SIZE),
            cols: BitSet::with_capacity(ALPHABET_SIZE),
        };
        let mut header: Option<Vec<u8>> = None;
        let mut last_line = 0usize;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            last_line = line_no;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if header.is_none() {
                header = Some(parse_header_row(line, line_no, &mut matrix.cols)?);
                continue;
            }
            let columns = header.as_deref().unwrap_or_default();

            let mut tokens = line.split_whitespace();
            let label = tokens.next().unwrap_or_default();
            let row = parse_symbol(label, line_no)?;
            if !matrix.rows.insert(row as usize) {
                return Err(format_error(format!("duplicate row '{label}'"), line_no));
            }

            let mut count = 0usize;
            for token in tokens {
                let Some(&col) = columns.get(count) else {
                    return Err(format_error(
                        format!("row '{label}' has more than {} scores", columns.len()),
                        line_no,
                    ));
                };
                let value: f32 = token.parse().map_err(|_| {
                    format_error(format!("invalid score '{token}'"), line_no)
                })?;
                if !value.is_finite() {
                    return Err(format_error(format!("invalid score '{token}'"), line_no));
                }
                matrix.scores[row as usize][col as usize] = value;
                count += 1;
            }
            if count != columns.len() {
                return Err(format_error(
                    format!(
                        "row '{label}' has {count} scores, expected {}",
                        columns.len()
                    ),
                    line_no,
                ));
            }
        }

        if header.is_none() {
            return Err(format_error("missing header row".to_string(), last_line));
        }
        if matrix.rows.is_empty() {
            return Err(format_error("no score rows".to_string(), last_line));
        }
        Ok(matrix)
    }

    /// Read a matrix file; the file name becomes the matrix name.
    pub fn from_path(path: impl AsRef<Path>) -> BioResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse(name, &text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Score of the code pair `(a, b)`. Both codes must be covered; public
    /// callers go through [`try_score`](Self::try_score) or
    /// [`check_covers`](Self::check_covers).
    #[inline]
    pub(crate) fn score(&self, a: u8, b: u8) -> f32 {
        debug_assert!(self.has_row(a) && self.has_col(b));
        self.scores[a as usize][b as usize]
    }

    /// Score of the symbol pair `(a, b)`, checking coverage.
    pub fn try_score(&self, a: u8, b: u8) -> BioResult<f32> {
        let undefined = || BioError::UndefinedScore {
            a: a as char,
            b: b as char,
        };
        let ra = residue_code(a).ok_or_else(undefined)?;
        let cb = residue_code(b).ok_or_else(undefined)?;
        if !self.has_row(ra) || !self.has_col(cb) {
            return Err(undefined());
        }
        Ok(self.scores[ra as usize][cb as usize])
    }

    #[inline]
    pub fn has_row(&self, code: u8) -> bool {
        self.rows.contains(code as usize)
    }

    #[inline]
    pub fn has_col(&self, code: u8) -> bool {
        self.cols.contains(code as usize)
    }

    /// Confirm every lookup `score(seq1[i], seq2[j])` is defined.
    pub fn check_covers(&self, seq1: &EncodedSeq, seq2: &EncodedSeq) -> BioResult<()> {
        let used1: BitSet = seq1.codes().iter().map(|&c| c as usize).collect();
        let used2: BitSet = seq2.codes().iter().map(|&c| c as usize).collect();
        let missing_row = used1.difference(&self.rows).next();
        let missing_col = used2.difference(&self.cols).next();
        let pair = match (missing_row, missing_col) {
            (None, None) => return Ok(()),
            (Some(r), Some(c)) => (r, c),
            (Some(r), None) => (r, used2.iter().next().unwrap_or(r)),
            (None, Some(c)) => (used1.iter().next().unwrap_or(c), c),
        };
        Err(BioError::UndefinedScore {
            a: residue_symbol(pair.0 as u8) as char,
            b: residue_symbol(pair.1 as u8) as char,
        })
    }
}

fn parse_header_row(line: &str, line_no: usize, cols: &mut BitSet) -> BioResult<Vec<u8>> {
    let mut columns = Vec::new();
    for token in line.split_whitespace() {
        let code = parse_symbol(token, line_no)?;
        if !cols.insert(code as usize) {
            return Err(format_error(format!("duplicate column '{token}'"), line_no));
        }
        columns.push(code);
    }
    Ok(columns)
}

fn parse_symbol(token: &str, line_no: usize) -> BioResult<u8> {
    match token.as_bytes() {
        [b] => residue_code(*b)
            .ok_or_else(|| format_error(format!("unknown residue '{token}'"), line_no)),
        _ => Err(format_error(
            format!("expected a single residue letter, found '{token}'"),
            line_no,
        )),
    }
}

fn format_error(msg: String, line: usize) -> BioError {
    BioError::MatrixFormat { msg, line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::encode::encode_protein;

    fn code(b: u8) -> u8 {
        residue_code(b).unwrap()
    }

    #[test]
    fn blosum62_known_entries() {
        let m = matrix_by_name("BLOSUM62").unwrap();
        assert_eq!(m.name(), "BLOSUM62");
        assert_eq!(m.score(code(b'W'), code(b'W')), 11.0);
        assert_eq!(m.score(code(b'A'), code(b'A')), 4.0);
        assert_eq!(m.score(code(b'E'), code(b'Z')), 4.0);
        assert_eq!(m.score(code(b'*'), code(b'A')), -4.0);
    }

    #[test]
    fn blosum50_known_entries() {
        let m = matrix_by_name("blosum50").unwrap();
        assert_eq!(m.score(code(b'H'), code(b'H')), 10.0);
        assert_eq!(m.score(code(b'W'), code(b'W')), 15.0);
        assert_eq!(m.score(code(b'G'), code(b'P')), -2.0);
    }

    #[test]
    fn builtins_are_symmetric() {
        for name in matrix_names() {
            let m = matrix_by_name(name).unwrap();
            for &a in b"ARNDCQEGHILKMFPSTWYVBZX*" {
                for &b in b"ARNDCQEGHILKMFPSTWYVBZX*" {
                    assert_eq!(m.try_score(a, b).unwrap(), m.try_score(b, a).unwrap());
                }
            }
        }
    }

    #[test]
    fn emboss_alias_and_unknown_name() {
        assert_eq!(
            matrix_by_name("EBLOSUM62").unwrap(),
            matrix_by_name("BLOSUM62").unwrap()
        );
        let err = matrix_by_name("PAM250").unwrap_err();
        assert!(matches!(err, BioError::UnknownMatrix { name } if name == "PAM250"));
    }

    #[test]
    fn parse_asymmetric_table() {
        let text = "# toy\n\n   A  B\nA  2 -1\nB -3  1.5\n";
        let m = ScoringMatrix::parse("toy", text).unwrap();
        assert_eq!(m.try_score(b'A', b'B').unwrap(), -1.0);
        assert_eq!(m.try_score(b'B', b'A').unwrap(), -3.0);
        assert_eq!(m.try_score(b'B', b'B').unwrap(), 1.5);
    }

    #[test]
    fn undefined_pair_is_reported() {
        let m = matrix_by_name("BLOSUM62").unwrap();
        let err = m.try_score(b'U', b'A').unwrap_err();
        assert!(matches!(err, BioError::UndefinedScore { a: 'U', b: 'A' }));
    }

    #[test]
    fn check_covers_finds_missing_residue() {
        let m = matrix_by_name("BLOSUM62").unwrap();
        let ok = encode_protein(b"HEAGAWGHEE").unwrap();
        let bad = encode_protein(b"PAWU").unwrap();
        assert!(m.check_covers(&ok, &ok).is_ok());
        match m.check_covers(&ok, &bad).unwrap_err() {
            BioError::UndefinedScore { b, .. } => assert_eq!(b, 'U'),
            other => panic!("expected UndefinedScore, got {other:?}"),
        }
        match m.check_covers(&bad, &ok).unwrap_err() {
            BioError::UndefinedScore { a, .. } => assert_eq!(a, 'U'),
            other => panic!("expected UndefinedScore, got {other:?}"),
        }
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let short_row = "# c\n A B\nA 1\n";
        match ScoringMatrix::parse("bad", short_row).unwrap_err() {
            BioError::MatrixFormat { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MatrixFormat, got {other:?}"),
        }

        let bad_value = " A\nA x\n";
        match ScoringMatrix::parse("bad", bad_value).unwrap_err() {
            BioError::MatrixFormat { line, msg } => {
                assert_eq!(line, 2);
                assert!(msg.contains("'x'"));
            }
            other => panic!("expected MatrixFormat, got {other:?}"),
        }

        let bad_symbol = " A J\n";
        assert!(matches!(
            ScoringMatrix::parse("bad", bad_symbol).unwrap_err(),
            BioError::MatrixFormat { line: 1, .. }
        ));

        let duplicate_row = " A\nA 1\nA 2\n";
        assert!(matches!(
            ScoringMatrix::parse("bad", duplicate_row).unwrap_err(),
            BioError::MatrixFormat { line: 3, .. }
        ));
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(
            ScoringMatrix::parse("empty", "# only comments\n").unwrap_err(),
            BioError::MatrixFormat { .. }
        ));
    }
}
