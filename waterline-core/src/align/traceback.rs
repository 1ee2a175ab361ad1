use super::construct::{BestCell, TracebackMatrix};
use super::encode::EncodedSeq;
use super::matrices::ScoringMatrix;
use super::types::{AlignmentResult, Column, Direction, TracebackStop, GAP};
use log::trace;

/// Rebuild the alignment ending at `best` by walking the stored directions
/// back towards the grid boundary.
///
/// The walk ends when the row or the column reaches zero, or, with
/// [`TracebackStop::ZeroScore`], at the first floored cell. The final row and
/// column are the 0-based start offsets of the alignment.
pub fn traceback(
    seq1: &EncodedSeq,
    seq2: &EncodedSeq,
    matrix: &ScoringMatrix,
    directions: &TracebackMatrix,
    best: BestCell,
    stop: TracebackStop,
) -> AlignmentResult {
    let mut row = best.row;
    let mut col = best.col;

    let capacity = row + col;
    let mut aligned1 = Vec::with_capacity(capacity);
    let mut aligned2 = Vec::with_capacity(capacity);
    let mut columns = Vec::with_capacity(capacity);
    let mut identity = 0usize;
    let mut similarity = 0usize;
    let mut gaps = 0usize;

    while row > 0 && col > 0 {
        if stop == TracebackStop::ZeroScore && directions.is_zeroed(row, col) {
            break;
        }
        match directions.direction(row, col) {
            Direction::Up => {
                aligned1.push(seq1.symbol(row - 1));
                aligned2.push(GAP);
                columns.push(Column::GapIn2);
                gaps += 1;
                row -= 1;
            }
            Direction::Diagonal => {
                let r1 = seq1.codes[row - 1];
                let r2 = seq2.codes[col - 1];
                let column = if r1 == r2 {
                    identity += 1;
                    similarity += 1;
                    Column::Identity
                } else if matrix.score(r1, r2) > 0.0 {
                    similarity += 1;
                    Column::Similarity
                } else {
                    Column::Mismatch
                };
                aligned1.push(seq1.symbol(row - 1));
                aligned2.push(seq2.symbol(col - 1));
                columns.push(column);
                row -= 1;
                col -= 1;
            }
            Direction::Left => {
                aligned1.push(GAP);
                aligned2.push(seq2.symbol(col - 1));
                columns.push(Column::GapIn1);
                gaps += 1;
                col -= 1;
            }
        }
    }
    trace!(
        "traceback from ({}, {}) stopped at ({row}, {col}) after {} columns",
        best.row,
        best.col,
        columns.len()
    );

    aligned1.reverse();
    aligned2.reverse();
    columns.reverse();
    let markup = columns.iter().map(|c| c.symbol()).collect();

    AlignmentResult {
        score: best.score,
        aligned1,
        aligned2,
        columns,
        markup,
        identity,
        similarity,
        gaps,
        offset1: row,
        offset2: col,
        end1: best.row,
        end2: best.col,
        name1: None,
        name2: None,
    }
}
