use crate::alphabets::Alphabet;

/// Residue symbols accepted by the aligner, in dense-code order.
pub const RESIDUES: &[u8; 26] = b"ABCDEFGHIKLMNPQRSTUVWYZX-*";

pub fn alphabet() -> Alphabet {
    Alphabet::new(&RESIDUES[..])
}
