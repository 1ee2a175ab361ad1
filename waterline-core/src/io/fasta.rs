use crate::error::{BioError, BioResult};
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::marker::PhantomData;
use std::path::Path;

enum Line {
    Header(usize),
    Residues,
    Skip,
}

/// Streaming FASTA reader. Lines starting with `;` are treated as comments.
pub struct FastaRecords<R, S> {
    reader: R,
    line_no: usize,
    line: String,
    // header of the next record, already consumed while reading residues
    lookahead: Option<(String, usize)>,
    residues: Vec<u8>,
    _marker: PhantomData<S>,
}

impl<R: BufRead, S: SeqBytes> FastaRecords<R, S> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            line: String::new(),
            lookahead: None,
            residues: Vec::new(),
            _marker: PhantomData,
        }
    }

    fn read_line(&mut self) -> BioResult<Option<Line>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let kind = if self.line.starts_with('>') {
            Line::Header(self.line_no)
        } else if self.line.starts_with(';') || self.line.trim().is_empty() {
            Line::Skip
        } else {
            Line::Residues
        };
        Ok(Some(kind))
    }

    fn next_header(&mut self) -> BioResult<Option<(String, usize)>> {
        if let Some(pending) = self.lookahead.take() {
            return Ok(Some(pending));
        }
        while let Some(kind) = self.read_line()? {
            match kind {
                Line::Header(line_no) => return Ok(Some((self.line.clone(), line_no))),
                Line::Skip => continue,
                Line::Residues => {
                    return Err(BioError::FastaFormat {
                        msg: "expected header line starting with '>'",
                        line: self.line_no,
                    })
                }
            }
        }
        Ok(None)
    }

    fn read_record(&mut self) -> BioResult<Option<SeqRecord<S>>> {
        let Some((header, header_line_no)) = self.next_header()? else {
            return Ok(None);
        };
        let (id, desc) = parse_header(&header, header_line_no)?;

        self.residues.clear();
        while let Some(kind) = self.read_line()? {
            match kind {
                Line::Header(line_no) => {
                    self.lookahead = Some((self.line.clone(), line_no));
                    break;
                }
                Line::Skip => {}
                Line::Residues => self.residues.extend(
                    self.line.bytes().filter(|b| !b.is_ascii_whitespace()),
                ),
            }
        }

        let seq = S::from_bytes(std::mem::take(&mut self.residues))?;
        Ok(Some(SeqRecord { id, desc, seq }))
    }
}

impl<R: BufRead, S: SeqBytes> Iterator for FastaRecords<R, S> {
    type Item = BioResult<SeqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

pub fn fasta_records_from_reader<R: BufRead, S: SeqBytes>(reader: R) -> FastaRecords<R, S> {
    FastaRecords::new(reader)
}

pub fn read_fasta_records_from_reader<R: BufRead, S: SeqBytes>(
    reader: R,
) -> BioResult<Vec<SeqRecord<S>>> {
    fasta_records_from_reader(reader).collect()
}

pub fn read_fasta_records_from_path<S: SeqBytes>(
    path: impl AsRef<Path>,
) -> BioResult<Vec<SeqRecord<S>>> {
    let file = File::open(path)?;
    read_fasta_records_from_reader(BufReader::new(file))
}

pub fn read_fasta_records_from_bytes<S: SeqBytes>(data: &[u8]) -> BioResult<Vec<SeqRecord<S>>> {
    read_fasta_records_from_reader(BufReader::new(Cursor::new(data)))
}

/// First record of a FASTA stream; an input without records is an error.
pub fn read_first_record_from_reader<R: BufRead, S: SeqBytes>(
    reader: R,
) -> BioResult<SeqRecord<S>> {
    fasta_records_from_reader(reader)
        .next()
        .unwrap_or(Err(BioError::FastaFormat {
            msg: "no records found",
            line: 0,
        }))
}

pub fn read_first_record_from_path<S: SeqBytes>(
    path: impl AsRef<Path>,
) -> BioResult<SeqRecord<S>> {
    let file = File::open(path)?;
    read_first_record_from_reader(BufReader::new(file))
}

fn parse_header(line: &str, line_no: usize) -> BioResult<(Box<str>, Option<Box<str>>)> {
    let header = line
        .strip_prefix('>')
        .unwrap_or(line)
        .trim_end_matches(&['\n', '\r'][..])
        .trim_start();
    if header.is_empty() {
        return Err(BioError::FastaFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    let (id, desc) = match header.split_once(char::is_whitespace) {
        Some((id, rest)) => {
            let rest = rest.trim();
            (id, (!rest.is_empty()).then_some(rest))
        }
        None => (header, None),
    };

    Ok((id.into(), desc.map(Into::into)))
}
