use super::matrices::{self, ScoringMatrix};
use crate::error::{BioError, BioResult};

pub const DEFAULT_MATRIX: &str = "BLOSUM62";
pub const DEFAULT_GAP_OPEN: f32 = 10.0;
pub const DEFAULT_GAP_EXTEND: f32 = 0.5;

/// Gap character written into aligned rows.
pub const GAP: u8 = b'-';

/// Predecessor of a DP cell. Ties resolve Diagonal, then Left, then Up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    Diagonal,
    /// Horizontal gap run: consumes sequence 2.
    Left,
    /// Vertical gap run: consumes sequence 1.
    Up,
}

/// Where the traceback walk ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TracebackStop {
    /// Walk until the row or the column reaches zero.
    #[default]
    Boundary,
    /// Also stop at the first cell whose score was floored to zero.
    ZeroScore,
}

/// Classification of one alignment column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Identity,
    /// Different residues with a positive substitution score.
    Similarity,
    Mismatch,
    /// Residue from sequence 1 against a gap.
    GapIn2,
    /// Residue from sequence 2 against a gap.
    GapIn1,
}

impl Column {
    /// Markup symbol used in EMBOSS "pair" reports.
    pub fn symbol(self) -> u8 {
        match self {
            Column::Identity => b'|',
            Column::Similarity => b':',
            Column::Mismatch => b'.',
            Column::GapIn1 | Column::GapIn2 => b' ',
        }
    }

    pub fn is_gap(self) -> bool {
        matches!(self, Column::GapIn1 | Column::GapIn2)
    }

    pub fn consumes_seq1(self) -> bool {
        self != Column::GapIn1
    }

    pub fn consumes_seq2(self) -> bool {
        self != Column::GapIn2
    }
}

/// Substitution matrix plus affine gap penalties for one alignment.
///
/// A gap of length `L` costs `gap_open + (L - 1) * gap_extend`; both
/// penalties are non-negative amounts subtracted from the score.
#[derive(Clone, Debug, PartialEq)]
pub struct Scoring {
    matrix: ScoringMatrix,
    gap_open: f32,
    gap_extend: f32,
    stop: TracebackStop,
}

impl Scoring {
    pub fn new(matrix: ScoringMatrix, gap_open: f32, gap_extend: f32) -> BioResult<Self> {
        check_penalty("gap_open", gap_open)?;
        check_penalty("gap_extend", gap_extend)?;
        Ok(Self {
            matrix,
            gap_open,
            gap_extend,
            stop: TracebackStop::default(),
        })
    }

    /// Built-in matrix by name, see [`matrices::matrix_names`].
    pub fn with_matrix_name(name: &str, gap_open: f32, gap_extend: f32) -> BioResult<Self> {
        Self::new(matrices::matrix_by_name(name)?, gap_open, gap_extend)
    }

    pub fn with_traceback_stop(mut self, stop: TracebackStop) -> Self {
        self.stop = stop;
        self
    }

    pub fn matrix(&self) -> &ScoringMatrix {
        &self.matrix
    }

    pub fn gap_open(&self) -> f32 {
        self.gap_open
    }

    pub fn gap_extend(&self) -> f32 {
        self.gap_extend
    }

    pub fn traceback_stop(&self) -> TracebackStop {
        self.stop
    }
}

impl Default for Scoring {
    /// BLOSUM62, open 10.0, extend 0.5.
    fn default() -> Self {
        Self {
            matrix: matrices::blosum62(),
            gap_open: DEFAULT_GAP_OPEN,
            gap_extend: DEFAULT_GAP_EXTEND,
            stop: TracebackStop::default(),
        }
    }
}

fn check_penalty(name: &str, value: f32) -> BioResult<()> {
    if !value.is_finite() {
        return Err(BioError::InvalidScoring {
            msg: format!("{name} must be finite (got {value})"),
        });
    }
    if value < 0.0 {
        return Err(BioError::InvalidScoring {
            msg: format!("{name} must be >= 0 (got {value})"),
        });
    }
    Ok(())
}

/// An optimal local alignment and its column statistics.
///
/// Offsets are 0-based starts into the original sequences; ends are
/// exclusive. Built only by the traceback.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentResult {
    pub(crate) score: f32,
    pub(crate) aligned1: Vec<u8>,
    pub(crate) aligned2: Vec<u8>,
    pub(crate) columns: Vec<Column>,
    pub(crate) markup: Vec<u8>,
    pub(crate) identity: usize,
    pub(crate) similarity: usize,
    pub(crate) gaps: usize,
    pub(crate) offset1: usize,
    pub(crate) offset2: usize,
    pub(crate) end1: usize,
    pub(crate) end2: usize,
    pub(crate) name1: Option<Box<str>>,
    pub(crate) name2: Option<Box<str>>,
}

impl AlignmentResult {
    pub(crate) fn empty() -> Self {
        Self {
            score: 0.0,
            aligned1: Vec::new(),
            aligned2: Vec::new(),
            columns: Vec::new(),
            markup: Vec::new(),
            identity: 0,
            similarity: 0,
            gaps: 0,
            offset1: 0,
            offset2: 0,
            end1: 0,
            end2: 0,
            name1: None,
            name2: None,
        }
    }

    /// Attach display names for reports.
    pub fn with_names(mut self, name1: impl Into<Box<str>>, name2: impl Into<Box<str>>) -> Self {
        self.name1 = Some(name1.into());
        self.name2 = Some(name2.into());
        self
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Sequence 1 residues with gaps inserted.
    pub fn aligned1(&self) -> &[u8] {
        &self.aligned1
    }

    /// Sequence 2 residues with gaps inserted.
    pub fn aligned2(&self) -> &[u8] {
        &self.aligned2
    }

    pub fn markup(&self) -> &[u8] {
        &self.markup
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Identical columns.
    pub fn identity(&self) -> usize {
        self.identity
    }

    /// Columns with identical residues or a positive substitution score.
    pub fn similarity(&self) -> usize {
        self.similarity
    }

    pub fn gaps(&self) -> usize {
        self.gaps
    }

    pub fn mismatches(&self) -> usize {
        self.len() - self.similarity - self.gaps
    }

    pub fn offset1(&self) -> usize {
        self.offset1
    }

    pub fn offset2(&self) -> usize {
        self.offset2
    }

    pub fn end1(&self) -> usize {
        self.end1
    }

    pub fn end2(&self) -> usize {
        self.end2
    }

    pub fn name1(&self) -> Option<&str> {
        self.name1.as_deref()
    }

    pub fn name2(&self) -> Option<&str> {
        self.name2.as_deref()
    }

    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scoring() {
        let scoring = Scoring::default();
        assert_eq!(scoring.matrix().name(), DEFAULT_MATRIX);
        assert_eq!(scoring.gap_open(), 10.0);
        assert_eq!(scoring.gap_extend(), 0.5);
        assert_eq!(scoring.traceback_stop(), TracebackStop::Boundary);
    }

    #[test]
    fn penalties_are_validated() {
        let err = Scoring::with_matrix_name("BLOSUM62", -1.0, 0.5).unwrap_err();
        assert!(matches!(err, BioError::InvalidScoring { .. }));
        let err = Scoring::with_matrix_name("BLOSUM62", 10.0, f32::NAN).unwrap_err();
        assert!(matches!(err, BioError::InvalidScoring { .. }));
        assert!(Scoring::with_matrix_name("BLOSUM62", 0.0, 0.0).is_ok());
    }

    #[test]
    fn unknown_matrix_name() {
        let err = Scoring::with_matrix_name("NOPE", 10.0, 0.5).unwrap_err();
        assert!(matches!(err, BioError::UnknownMatrix { .. }));
    }

    #[test]
    fn column_symbols() {
        assert_eq!(Column::Identity.symbol(), b'|');
        assert_eq!(Column::Similarity.symbol(), b':');
        assert_eq!(Column::Mismatch.symbol(), b'.');
        assert_eq!(Column::GapIn1.symbol(), b' ');
        assert!(Column::GapIn2.is_gap());
        assert!(Column::GapIn2.consumes_seq1());
        assert!(!Column::GapIn2.consumes_seq2());
    }

    #[test]
    fn empty_result() {
        let res = AlignmentResult::empty().with_names("a", "b");
        assert!(res.is_empty());
        assert_eq!(res.mismatches(), 0);
        assert_eq!(res.name1(), Some("a"));
        assert_eq!(res.name2(), Some("b"));
    }
}
