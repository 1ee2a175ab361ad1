//! Smith-Waterman matrix construction with Gotoh affine gaps.
//!
//! Row `i` of the grid consumes `seq1[i - 1]`, column `j` consumes
//! `seq2[j - 1]`; row 0 and column 0 are the empty prefixes.

use super::encode::EncodedSeq;
use super::matrices::ScoringMatrix;
use super::types::Direction;
use bit_set::BitSet;
use log::debug;

/// Per-cell predecessors for an `(m + 1) x (n + 1)` grid.
#[derive(Clone, Debug)]
pub struct TracebackMatrix {
    cols: usize,
    cells: Vec<Direction>,
    // cells whose score was floored to zero
    zeroed: BitSet,
}

impl TracebackMatrix {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![Direction::Diagonal; rows * cols],
            zeroed: BitSet::with_capacity(rows * cols),
        }
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, direction: Direction, zeroed: bool) {
        let idx = row * self.cols + col;
        self.cells[idx] = direction;
        if zeroed {
            self.zeroed.insert(idx);
        }
    }

    #[inline]
    pub fn direction(&self, row: usize, col: usize) -> Direction {
        self.cells[row * self.cols + col]
    }

    /// True if the best score ending at `(row, col)` was reset to zero.
    #[inline]
    pub fn is_zeroed(&self, row: usize, col: usize) -> bool {
        self.zeroed.contains(row * self.cols + col)
    }
}

/// Highest-scoring cell; the traceback starts here.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct BestCell {
    pub score: f32,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug)]
pub struct Construction {
    pub directions: TracebackMatrix,
    pub best: BestCell,
}

/// Outcome of filling one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// `max(a, b, c)` before flooring.
    pub raw: f32,
    pub direction: Direction,
}

/// Rolling Gotoh vectors for one pass over the grid.
///
/// Before [`step`](Self::step) is called for column `j`, `similarity[j]`
/// and `vertical[j]` still hold row `i - 1`, while `similarity[j - 1]` and
/// `horizontal[j - 1]` already hold row `i`. `diagonal` carries
/// `similarity(i - 1, j - 1)`, captured before that slot was overwritten.
/// Call [`start_row`](Self::start_row) before column 1 of every row.
#[derive(Clone, Debug)]
pub struct GotohState {
    similarity: Vec<f32>,
    vertical: Vec<f32>,
    horizontal: Vec<f32>,
    diagonal: f32,
    open: f32,
    extend: f32,
}

impl GotohState {
    pub fn new(n: usize, open: f32, extend: f32) -> Self {
        Self {
            similarity: vec![0.0; n + 1],
            vertical: vec![f32::NEG_INFINITY; n + 1],
            horizontal: vec![f32::NEG_INFINITY; n + 1],
            diagonal: 0.0,
            open,
            extend,
        }
    }

    #[inline]
    pub fn start_row(&mut self) {
        self.diagonal = self.similarity[0];
        self.horizontal[0] = f32::NEG_INFINITY;
    }

    /// Fill column `j` (1-based) of the current row given the substitution
    /// score of its residue pair.
    ///
    /// The gap-in-seq1 value `c` is stored at `horizontal[j]`, not
    /// `horizontal[j - 1]`, so the next column extends this row's run
    /// rather than reading the previous row's.
    #[inline]
    pub fn step(&mut self, j: usize, substitution: f32) -> Step {
        let a = self.diagonal + substitution;

        let b = (self.similarity[j] - self.open).max(self.vertical[j] - self.extend);
        self.vertical[j] = b;

        let c = (self.similarity[j - 1] - self.open).max(self.horizontal[j - 1] - self.extend);
        self.horizontal[j] = c;

        let (raw, direction) = if a >= b && a >= c {
            (a, Direction::Diagonal)
        } else if c >= b {
            (c, Direction::Left)
        } else {
            (b, Direction::Up)
        };

        self.diagonal = self.similarity[j];
        self.similarity[j] = raw.max(0.0);
        Step { raw, direction }
    }
}

/// Fill the local-alignment grid and locate its best cell.
///
/// `open` and `extend` must be non-negative and `matrix` must cover every
/// residue of both sequences ([`ScoringMatrix::check_covers`]); neither is
/// checked here.
/// Ties for the best score keep the first cell in row-major order. Memory is
/// `O(m * n)` for the directions; callers bound sequence lengths.
pub fn construct(
    seq1: &EncodedSeq,
    seq2: &EncodedSeq,
    matrix: &ScoringMatrix,
    open: f32,
    extend: f32,
) -> Construction {
    debug_assert!(open >= 0.0 && extend >= 0.0, "gap penalties must be >= 0");
    let m = seq1.codes.len();
    let n = seq2.codes.len();

    let mut directions = TracebackMatrix::new(m + 1, n + 1);
    let mut best = BestCell::default();
    let mut state = GotohState::new(n, open, extend);

    for i in 1..=m {
        let r1 = seq1.codes[i - 1];
        state.start_row();
        for j in 1..=n {
            let step = state.step(j, matrix.score(r1, seq2.codes[j - 1]));
            directions.set(i, j, step.direction, step.raw <= 0.0);
            if step.raw > best.score {
                best = BestCell {
                    score: step.raw,
                    row: i,
                    col: j,
                };
            }
        }
    }

    debug!(
        "constructed {}x{} grid: best score {} at ({}, {})",
        m + 1,
        n + 1,
        best.score,
        best.row,
        best.col
    );
    Construction { directions, best }
}
