use std::io::BufRead;

use ahash::HashMap;
use derive_getters::Getters;
use eyre::{ensure, eyre, Context, Result};

/// Layout of one reference sequence inside a FASTA file, `.fai`-style:
/// total length, byte offset of the first base, bases per line and bytes
/// per line (line terminator included).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Getters)]
pub struct IndexRecord {
    length: u64,
    offset: u64,
    bases_per_line: u64,
    bytes_per_line: u64,
}

/// A FASTA index: per-contig layout records plus an id lookup, preserving
/// the order in which contigs appear in the file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Index {
    ids: Vec<String>,
    records: Vec<IndexRecord>,
    lookup: HashMap<String, usize>,
}

impl Index {
    fn new(ids: Vec<String>, records: Vec<IndexRecord>) -> Self {
        let lookup = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self {
            ids,
            records,
            lookup,
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn get(&self, id: &str) -> Option<&IndexRecord> {
        self.lookup.get(id).map(|&i| &self.records[i])
    }

    /// Parse a `.fai` file.
    pub fn from_fai(mut fai: impl BufRead) -> Result<Self> {
        let mut ids = Vec::new();
        let mut records = Vec::new();

        let mut buffer = String::new();
        while fai.read_line(&mut buffer)? > 0 {
            let err = || eyre!("Invalid FASTA index line: {}", buffer);
            let mut parts = buffer.trim_end_matches(['\r', '\n']).split('\t');

            let id = parts.next().ok_or_else(err)?;
            let mut field = || -> Result<u64> {
                parts.next().ok_or_else(err)?.parse().wrap_err_with(err)
            };
            let (length, offset, bases_per_line, bytes_per_line) =
                (field()?, field()?, field()?, field()?);

            ensure!(length > 0, "Zero-length contig in index: {}", buffer);
            ensure!(
                bases_per_line > 0 && bytes_per_line > bases_per_line,
                "Inconsistent line layout in index: {}",
                buffer
            );

            ids.push(id.to_string());
            records.push(IndexRecord {
                length,
                offset,
                bases_per_line,
                bytes_per_line,
            });
            buffer.clear();
        }

        Ok(Self::new(ids, records))
    }

    /// Build the index by scanning a FASTA stream, the same layout that
    /// `samtools faidx` would produce. Sequence lines of one record must be
    /// of equal length, except for the last one which may be shorter.
    pub fn build(mut fasta: impl BufRead) -> Result<Self> {
        struct Open {
            id: String,
            offset: u64,
            length: u64,
            bases_per_line: u64,
            bytes_per_line: u64,
            // Set once a short line is seen; any further sequence line is
            // an irregularity the seek arithmetic cannot handle.
            closed: bool,
        }

        let mut ids = Vec::new();
        let mut records = Vec::new();
        let mut current: Option<Open> = None;

        let mut finalize = |open: Option<Open>| -> Result<()> {
            if let Some(open) = open {
                ensure!(open.length > 0, "Contig {} has no sequence", open.id);
                ids.push(open.id);
                records.push(IndexRecord {
                    length: open.length,
                    offset: open.offset,
                    bases_per_line: open.bases_per_line,
                    bytes_per_line: open.bytes_per_line,
                });
            }
            Ok(())
        };

        let mut offset = 0u64;
        let mut line = Vec::new();
        loop {
            line.clear();
            let bytes = fasta.read_until(b'\n', &mut line)?;
            if bytes == 0 {
                break;
            }

            let content = match line.last() {
                Some(b'\n') if line.len() > 1 && line[line.len() - 2] == b'\r' => {
                    &line[..line.len() - 2]
                }
                Some(b'\n') => &line[..line.len() - 1],
                _ => &line[..],
            };
            // A file not ending in a newline is indexed as if it did
            let terminator = (bytes - content.len()).max(1) as u64;

            if content.first() == Some(&b'>') {
                finalize(current.take())?;

                let id = &content[1..];
                let id = match memchr::memchr2(b' ', b'\t', id) {
                    Some(split) => &id[..split],
                    None => id,
                };
                ensure!(!id.is_empty(), "Unnamed FASTA record at byte {}", offset);
                current = Some(Open {
                    id: String::from_utf8(id.to_vec())
                        .wrap_err("Non-UTF8 FASTA record name")?,
                    offset: offset + bytes as u64,
                    length: 0,
                    bases_per_line: 0,
                    bytes_per_line: 0,
                    closed: false,
                });
            } else if content.is_empty() {
                if let Some(open) = current.as_mut() {
                    open.closed = true;
                }
            } else {
                let open = current
                    .as_mut()
                    .ok_or_else(|| eyre!("Sequence data before the first FASTA header"))?;
                ensure!(
                    !open.closed,
                    "Irregular line lengths in contig {}",
                    open.id
                );

                let bases = content.len() as u64;
                if open.bases_per_line == 0 {
                    open.bases_per_line = bases;
                    open.bytes_per_line = bases + terminator;
                } else if bases != open.bases_per_line {
                    ensure!(
                        bases < open.bases_per_line,
                        "Irregular line lengths in contig {}",
                        open.id
                    );
                    open.closed = true;
                }
                open.length += bases;
            }

            offset += bytes as u64;
        }
        finalize(current.take())?;

        Ok(Self::new(ids, records))
    }

    /// Serialize in `.fai` format.
    pub fn to_fai(&self) -> String {
        let mut out = String::new();
        for (id, record) in self.ids.iter().zip(&self.records) {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                id, record.length, record.offset, record.bases_per_line, record.bytes_per_line
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FASTA: &str = ">chr1 test contig\nACGTACGTAC\nGTACGTACGT\nACGT\n>chr2\nTTTT\n";

    #[test]
    fn test_build() {
        let index = Index::build(Cursor::new(FASTA)).unwrap();
        assert_eq!(index.ids(), ["chr1".to_string(), "chr2".to_string()]);

        let chr1 = index.get("chr1").unwrap();
        assert_eq!(chr1.length(), &24);
        assert_eq!(chr1.offset(), &18);
        assert_eq!(chr1.bases_per_line(), &10);
        assert_eq!(chr1.bytes_per_line(), &11);

        let chr2 = index.get("chr2").unwrap();
        assert_eq!(chr2.length(), &4);
        assert_eq!(chr2.offset(), &51);

        assert!(index.get("chr3").is_none());
    }

    #[test]
    fn test_fai_roundtrip() {
        let index = Index::build(Cursor::new(FASTA)).unwrap();
        let restored = Index::from_fai(Cursor::new(index.to_fai())).unwrap();
        assert_eq!(index, restored);
    }

    #[test]
    fn test_fai_expected_layout() {
        let index = Index::build(Cursor::new(FASTA)).unwrap();
        assert_eq!(index.to_fai(), "chr1\t24\t18\t10\t11\nchr2\t4\t51\t4\t5\n");
    }

    #[test]
    fn test_build_rejects_irregular_lines() {
        // A short line in the middle of a record breaks seek arithmetic
        let fasta = ">chr1\nACGTACGT\nAC\nACGTACGT\n";
        assert!(Index::build(Cursor::new(fasta)).is_err());

        // ... but a short final line is the normal case
        let fasta = ">chr1\nACGTACGT\nAC\n";
        assert!(Index::build(Cursor::new(fasta)).is_ok());
    }

    #[test]
    fn test_build_rejects_headerless_and_empty() {
        assert!(Index::build(Cursor::new("ACGT\n")).is_err());
        assert!(Index::build(Cursor::new(">chr1\n>chr2\nACGT\n")).is_err());
    }

    #[test]
    fn test_build_without_trailing_newline() {
        let index = Index::build(Cursor::new(">chr1\nACGT")).unwrap();
        assert_eq!(index.get("chr1").unwrap().length(), &4);
    }

    #[test]
    fn test_from_fai_rejects_garbage() {
        assert!(Index::from_fai(Cursor::new("chr1\tnot-a-number\t6\t4\t5\n")).is_err());
        assert!(Index::from_fai(Cursor::new("chr1\t4\n")).is_err());
        assert!(Index::from_fai(Cursor::new("chr1\t0\t6\t4\t5\n")).is_err());
    }
}
