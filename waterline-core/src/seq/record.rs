use crate::seq::traits::SeqBytes;

/// A named sequence, as read from FASTA. The id doubles as the display name
/// in alignment reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeqRecord<S: SeqBytes> {
    pub id: Box<str>,
    pub desc: Option<Box<str>>,
    pub seq: S,
}

impl<S: SeqBytes> SeqRecord<S> {
    pub fn new(id: impl Into<Box<str>>, seq: S) -> Self {
        Self {
            id: id.into(),
            desc: None,
            seq,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<Box<str>>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn seq(&self) -> &S {
        &self.seq
    }

    pub fn into_seq(self) -> S {
        self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::protein::ProteinSeq;

    #[test]
    fn builder_and_accessors() {
        let seq = ProteinSeq::prepare("PAWHEAE").unwrap();
        let record = SeqRecord::new("q1", seq.clone()).with_desc("toy query");
        assert_eq!(record.id(), "q1");
        assert_eq!(record.desc(), Some("toy query"));
        assert_eq!(record.seq(), &seq);
        assert_eq!(record.into_seq().as_bytes(), b"PAWHEAE");
    }
}
