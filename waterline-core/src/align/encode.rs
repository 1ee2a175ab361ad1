use crate::alphabets::protein::RESIDUES;
use crate::error::{BioError, BioResult};
use crate::seq::protein::ProteinSeq;
use std::sync::LazyLock;

/// Number of distinct residue codes.
pub const ALPHABET_SIZE: usize = RESIDUES.len();

const UNMAPPED: u8 = 255;

static RESIDUE_MAP: LazyLock<[u8; 256]> = LazyLock::new(|| build_map(RESIDUES));

fn build_map(alphabet: &[u8]) -> [u8; 256] {
    let mut map = [UNMAPPED; 256];
    for (i, &b) in alphabet.iter().enumerate() {
        map[b as usize] = i as u8;
        map[b.to_ascii_lowercase() as usize] = i as u8;
    }
    map
}

/// Dense code of a residue symbol, if it belongs to the alphabet.
#[inline]
pub fn residue_code(symbol: u8) -> Option<u8> {
    match RESIDUE_MAP[symbol as usize] {
        UNMAPPED => None,
        code => Some(code),
    }
}

/// Upper-case symbol for a dense code. `code` must be below
/// [`ALPHABET_SIZE`]; every `EncodedSeq` holds only such codes.
#[inline]
pub(crate) fn residue_symbol(code: u8) -> u8 {
    RESIDUES[code as usize]
}

/// A residue sequence translated to dense codes in `0..ALPHABET_SIZE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSeq {
    pub(crate) codes: Vec<u8>,
}

impl EncodedSeq {
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Residue symbol at `pos`.
    #[inline]
    pub fn symbol(&self, pos: usize) -> u8 {
        residue_symbol(self.codes[pos])
    }

    pub fn to_symbols(&self) -> Vec<u8> {
        self.codes.iter().map(|&c| residue_symbol(c)).collect()
    }
}

impl From<&ProteinSeq> for EncodedSeq {
    fn from(seq: &ProteinSeq) -> Self {
        let codes = seq
            .as_bytes()
            .iter()
            .map(|&b| RESIDUE_MAP[b as usize])
            .collect();
        EncodedSeq { codes }
    }
}

pub fn encode_protein(seq: &[u8]) -> BioResult<EncodedSeq> {
    let mut codes = Vec::with_capacity(seq.len());
    for (pos, &b) in seq.iter().enumerate() {
        let code = residue_code(b).ok_or(BioError::InvalidChar { ch: b as char, pos })?;
        codes.push(code);
    }
    Ok(EncodedSeq { codes })
}
