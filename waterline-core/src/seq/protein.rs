use crate::alphabets::protein;
use crate::error::{BioError, BioResult};
use crate::io::normalize_seq_bytes;
use crate::seq::traits::SeqBytes;
use std::sync::LazyLock;

static RESIDUE_ALPHABET: LazyLock<crate::alphabets::Alphabet> =
    LazyLock::new(protein::alphabet);

/// A validated residue sequence. Bytes are upper-case members of
/// [`protein::RESIDUES`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProteinSeq {
    bytes: Vec<u8>,
}

impl ProteinSeq {
    pub fn new(mut bytes: Vec<u8>) -> BioResult<Self> {
        bytes.make_ascii_uppercase();
        let alphabet = &*RESIDUE_ALPHABET;
        for (pos, &b) in bytes.iter().enumerate() {
            if !alphabet.contains(b) {
                return Err(BioError::InvalidChar { ch: b as char, pos });
            }
        }
        Ok(Self { bytes })
    }

    /// Strip whitespace from raw sequence text, then validate it.
    ///
    /// Reported positions refer to the sequence with whitespace removed.
    pub fn prepare(raw: &str) -> BioResult<Self> {
        Self::new(normalize_seq_bytes(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        // every residue symbol is ASCII
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl SeqBytes for ProteinSeq {
    fn as_bytes(&self) -> &[u8] {
        ProteinSeq::as_bytes(self)
    }

    fn from_bytes(bytes: Vec<u8>) -> BioResult<Self> {
        ProteinSeq::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_strips_whitespace() {
        let seq = ProteinSeq::prepare(" HEAG AWG\nHEE\t").unwrap();
        assert_eq!(seq.as_bytes(), b"HEAGAWGHEE");
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn lowercase_is_upcased() {
        let seq = ProteinSeq::prepare("pawheae").unwrap();
        assert_eq!(seq.as_str(), "PAWHEAE");
    }

    #[test]
    fn full_alphabet_accepted() {
        let seq = ProteinSeq::new(b"ABCDEFGHIKLMNPQRSTUVWYZX-*".to_vec()).unwrap();
        assert_eq!(seq.len(), 26);
    }

    #[test]
    fn invalid_char_rejected() {
        let err = ProteinSeq::prepare("AC DJ").unwrap_err();
        match err {
            BioError::InvalidChar { ch, pos } => {
                assert_eq!(ch, 'J');
                assert_eq!(pos, 3);
            }
            other => panic!("expected InvalidChar, got {other:?}"),
        }
    }

    #[test]
    fn empty_is_allowed() {
        let seq = ProteinSeq::prepare(" \n ").unwrap();
        assert!(seq.is_empty());
    }
}
