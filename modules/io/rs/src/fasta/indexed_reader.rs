use std::io::{Read, Seek, SeekFrom};

use derive_more::Constructor;
use eyre::{ensure, Result};

use super::index::Index;
use super::{Error, SequenceFetch};

/// Random-access FASTA reader: an `.fai`-style index over any seekable
/// byte source (a plain file, or a bgzf reader that seeks in uncompressed
/// coordinates through its gzi index).
#[derive(Debug, Constructor)]
pub struct IndexedReader<R> {
    reader: R,
    index: Index,
}

impl<R> IndexedReader<R> {
    pub fn index(&self) -> &Index {
        &self.index
    }
}

impl<R: Read + Seek> SequenceFetch for IndexedReader<R> {
    fn ids(&self) -> &[String] {
        self.index.ids()
    }

    fn length(&self, contig: &str) -> Result<u64> {
        match self.index.get(contig) {
            Some(record) => Ok(*record.length()),
            None => Err(Error::ContigNotFound {
                contig: contig.to_string(),
            }
            .into()),
        }
    }

    fn fetch(&mut self, contig: &str, start: u64, end: u64, buffer: &mut Vec<u8>) -> Result<()> {
        let record = self.index.get(contig).ok_or_else(|| Error::ContigNotFound {
            contig: contig.to_string(),
        })?;

        let length = *record.length();
        if start >= end || end > length {
            return Err(Error::WindowOutOfRange {
                contig: contig.to_string(),
                start,
                end,
                length,
            }
            .into());
        }

        let bases_per_line = *record.bases_per_line();
        let terminator = record.bytes_per_line() - bases_per_line;

        buffer.clear();
        buffer.reserve((end - start) as usize);

        // Seek to the base at `start`, then read line payloads and skip the
        // terminators in between.
        let start_byte = record.offset()
            + (start / bases_per_line) * record.bytes_per_line()
            + start % bases_per_line;
        self.reader.seek(SeekFrom::Start(start_byte))?;

        let mut sink = std::io::sink();
        let mut in_line = bases_per_line - start % bases_per_line;
        let mut remaining = end - start;
        while remaining > 0 {
            let take = remaining.min(in_line);
            let read = self.reader.by_ref().take(take).read_to_end(buffer)? as u64;
            ensure!(
                read == take,
                "FASTA file truncated: contig {} shorter than its index claims",
                contig
            );

            remaining -= take;
            if remaining > 0 {
                std::io::copy(&mut self.reader.by_ref().take(terminator), &mut sink)?;
                in_line = bases_per_line;
            }
        }

        Ok(())
    }
}
