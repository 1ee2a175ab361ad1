//! EMBOSS "pair" rendering of a local alignment.

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::align::{AlignmentResult, Column, Scoring};
use crate::error::BioResult;

/// Alignment columns per block.
pub const LINE_WIDTH: usize = 50;

const RULE: &str = "#=======================================";
const NAME_WIDTH: usize = 13;
// name, start coordinate and the separating spaces
const MARKUP_INDENT: usize = NAME_WIDTH + 1 + 6 + 1;

/// Borrowed view that renders as a pair report via [`fmt::Display`].
#[derive(Clone, Copy, Debug)]
pub struct PairReport<'a> {
    result: &'a AlignmentResult,
    scoring: &'a Scoring,
}

impl<'a> PairReport<'a> {
    pub fn new(result: &'a AlignmentResult, scoring: &'a Scoring) -> Self {
        Self { result, scoring }
    }

    fn name1(&self) -> &str {
        self.result.name1().unwrap_or("seq1")
    }

    fn name2(&self) -> &str {
        self.result.name2().unwrap_or("seq2")
    }
}

impl fmt::Display for PairReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = self.result;
        let len = res.len();

        writeln!(f, "{RULE}")?;
        writeln!(f, "#")?;
        writeln!(f, "# Aligned_sequences: 2")?;
        writeln!(f, "# 1: {}", self.name1())?;
        writeln!(f, "# 2: {}", self.name2())?;
        writeln!(f, "# Matrix: {}", self.scoring.matrix().name())?;
        writeln!(f, "# Gap_penalty: {:.1}", self.scoring.gap_open())?;
        writeln!(f, "# Extend_penalty: {:.1}", self.scoring.gap_extend())?;
        writeln!(f, "#")?;
        writeln!(f, "# Length: {len}")?;
        stat_line(f, "Identity:", res.identity(), len)?;
        stat_line(f, "Similarity:", res.similarity(), len)?;
        stat_line(f, "Gaps:", res.gaps(), len)?;
        writeln!(f, "# Score: {:.1}", res.score())?;
        writeln!(f, "#")?;
        writeln!(f, "{RULE}")?;

        let mut pos1 = res.offset1();
        let mut pos2 = res.offset2();
        for start in (0..len).step_by(LINE_WIDTH) {
            let end = (start + LINE_WIDTH).min(len);
            let columns = &res.columns()[start..end];
            writeln!(f)?;
            pos1 = seq_line(
                f,
                self.name1(),
                &res.aligned1()[start..end],
                columns,
                pos1,
                Column::consumes_seq1,
            )?;
            writeln!(
                f,
                "{:indent$}{}",
                "",
                ascii(&res.markup()[start..end]),
                indent = MARKUP_INDENT
            )?;
            pos2 = seq_line(
                f,
                self.name2(),
                &res.aligned2()[start..end],
                columns,
                pos2,
                Column::consumes_seq2,
            )?;
        }
        Ok(())
    }
}

/// Render `result` as an EMBOSS "pair" report.
pub fn pair(result: &AlignmentResult, scoring: &Scoring) -> String {
    PairReport::new(result, scoring).to_string()
}

pub fn write_pair<W: io::Write>(
    writer: &mut W,
    result: &AlignmentResult,
    scoring: &Scoring,
) -> BioResult<()> {
    write!(writer, "{}", PairReport::new(result, scoring))?;
    Ok(())
}

/// Percentage of `count` over `len`; zero for an empty alignment.
pub fn percent(count: usize, len: usize) -> f64 {
    if len == 0 {
        0.0
    } else {
        100.0 * count as f64 / len as f64
    }
}

fn stat_line(f: &mut fmt::Formatter<'_>, label: &str, count: usize, len: usize) -> fmt::Result {
    writeln!(
        f,
        "# {label:<11}{count:>7}/{len} ({:>4.1}%)",
        percent(count, len)
    )
}

// Writes one residue row and returns the 0-based position after it.
fn seq_line(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    residues: &[u8],
    columns: &[Column],
    pos: usize,
    consumes: fn(Column) -> bool,
) -> Result<usize, fmt::Error> {
    let used = columns.iter().filter(|&&c| consumes(c)).count();
    let first = if used == 0 { pos } else { pos + 1 };
    let next = pos + used;
    writeln!(
        f,
        "{name:<w$.w$} {first:>6} {} {next:>6}",
        ascii(residues),
        w = NAME_WIDTH
    )?;
    Ok(next)
}

fn ascii(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align_local, encode_protein};

    fn fixture() -> (AlignmentResult, Scoring) {
        let scoring = Scoring::with_matrix_name("BLOSUM50", 10.0, 0.5).unwrap();
        let q = encode_protein(b"HEAGAWGHEE").unwrap();
        let t = encode_protein(b"PAWHEAE").unwrap();
        let res = align_local(&q, &t, &scoring).unwrap().with_names("HBA", "HBB");
        (res, scoring)
    }

    #[test]
    fn header_block() {
        let (res, scoring) = fixture();
        let text = pair(&res, &scoring);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], RULE);
        assert!(lines.contains(&"# 1: HBA"));
        assert!(lines.contains(&"# 2: HBB"));
        assert!(lines.contains(&"# Matrix: BLOSUM50"));
        assert!(lines.contains(&"# Gap_penalty: 10.0"));
        assert!(lines.contains(&"# Extend_penalty: 0.5"));
        assert!(lines.contains(&"# Length: 6"));
        assert!(lines.contains(&"# Identity:        4/6 (66.7%)"));
        assert!(lines.contains(&"# Similarity:      4/6 (66.7%)"));
        assert!(lines.contains(&"# Gaps:            1/6 (16.7%)"));
        assert!(lines.contains(&"# Score: 26.0"));
    }

    #[test]
    fn alignment_block() {
        let (res, scoring) = fixture();
        let text = pair(&res, &scoring);
        let block: Vec<&str> = text.lines().skip_while(|l| l.starts_with('#')).collect();
        assert_eq!(
            block,
            vec![
                "",
                "HBA                4 GAWGHE      9",
                "                     .|| ||",
                "HBB                1 PAW-HE      5",
            ]
        );
    }

    #[test]
    fn long_alignments_wrap() {
        let seq = b"ARNDCQEGHILKMFPSTWYV".repeat(3);
        let q = encode_protein(&seq).unwrap();
        let scoring = Scoring::default();
        let res = align_local(&q, &q, &scoring).unwrap();
        let text = pair(&res, &scoring);
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("seq1")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("     50"));
        assert!(rows[1].starts_with("seq1              51 "));
        assert!(rows[1].ends_with("     60"));
    }

    #[test]
    fn empty_alignment_has_no_blocks() {
        let scoring = Scoring::default();
        let empty = encode_protein(b"").unwrap();
        let res = align_local(&empty, &empty, &scoring).unwrap();
        let text = pair(&res, &scoring);
        assert!(text.contains("# Identity:        0/0 ( 0.0%)"));
        assert!(text.lines().all(|l| l.starts_with('#')));
    }

    #[test]
    fn writes_to_io() {
        let (res, scoring) = fixture();
        let mut out = Vec::new();
        write_pair(&mut out, &res, &scoring).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), pair(&res, &scoring));
    }

    #[test]
    fn percent_of_empty_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
