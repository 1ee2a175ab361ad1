// Unchecked engine: reached only through `align_local`, which verifies
// matrix coverage first.
mod construct;
pub mod encode;
pub mod matrices;
mod traceback;
pub mod types;

use construct::{construct, Construction};
pub use encode::{encode_protein, EncodedSeq};
pub use matrices::ScoringMatrix;
use traceback::traceback;
pub use types::{AlignmentResult, Column, Direction, Scoring, TracebackStop};

use crate::error::BioResult;
use crate::seq::{ProteinSeq, SeqRecord};
use log::debug;


/// Best local alignment of `seq1` against `seq2`.
///
/// Fails with `UndefinedScore` if the scoring matrix lacks a residue used by
/// either sequence. An empty input yields the empty alignment.
pub fn align_local(
    seq1: &EncodedSeq,
    seq2: &EncodedSeq,
    scoring: &Scoring,
) -> BioResult<AlignmentResult> {
    if seq1.is_empty() || seq2.is_empty() {
        return Ok(AlignmentResult::empty());
    }
    let matrix = scoring.matrix();
    matrix.check_covers(seq1, seq2)?;

    debug!(
        "aligning {} x {} residues with {} (open {}, extend {})",
        seq1.len(),
        seq2.len(),
        matrix.name(),
        scoring.gap_open(),
        scoring.gap_extend()
    );
    let Construction { directions, best } = construct(
        seq1,
        seq2,
        matrix,
        scoring.gap_open(),
        scoring.gap_extend(),
    );
    Ok(traceback(
        seq1,
        seq2,
        matrix,
        &directions,
        best,
        scoring.traceback_stop(),
    ))
}

/// Align two records, carrying their ids as display names.
pub fn align_records(
    rec1: &SeqRecord<ProteinSeq>,
    rec2: &SeqRecord<ProteinSeq>,
    scoring: &Scoring,
) -> BioResult<AlignmentResult> {
    let seq1 = EncodedSeq::from(rec1.seq());
    let seq2 = EncodedSeq::from(rec2.seq());
    Ok(align_local(&seq1, &seq2, scoring)?.with_names(rec1.id(), rec2.id()))
}
