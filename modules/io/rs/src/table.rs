use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use derive_more::Constructor;
use eyre::{Context, Result};

/// One output row, shared by both tables. `Length` is derived; the full
/// table additionally reports the insert statistics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor)]
pub struct SiteRow<'a> {
    pub contig: &'a str,
    pub start: u64,
    pub end: u64,
    pub motif: &'a str,
    pub strand: char,
    pub motifs: usize,
    pub inserts: usize,
    pub insert_len: u64,
    pub sequence: &'a str,
}

/// Tab-separated site table with a `#`-prefixed header row. The `full`
/// variant inserts the two insert columns before the sequence.
pub struct TableWriter<W> {
    writer: W,
    full: bool,
}

impl TableWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, full: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), full))
    }
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, full: bool) -> Self {
        Self { writer, full }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_all(b"#Contig\tStart\tEnd\tMotif\tLength\tStrand\tNumber of motifs")?;
        if self.full {
            self.writer
                .write_all(b"\tNumber of inserts\tLength of inserts")?;
        }
        self.writer.write_all(b"\tSequence\n")?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &SiteRow) -> Result<()> {
        write!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.contig,
            row.start,
            row.end,
            row.motif,
            row.end.abs_diff(row.start),
            row.strand,
            row.motifs
        )?;
        if self.full {
            write!(self.writer, "\t{}\t{}", row.inserts, row.insert_len)?;
        }
        writeln!(self.writer, "\t{}", row.sequence)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// The pair of tables the scan produces: `<prefix>.bed` with the summary
/// columns and `<prefix>_full.bed` with the insert statistics.
pub fn from_prefix(
    prefix: &str,
) -> Result<(
    TableWriter<BufWriter<File>>,
    TableWriter<BufWriter<File>>,
    (PathBuf, PathBuf),
)> {
    let summary_path = PathBuf::from(format!("{prefix}.bed"));
    let full_path = PathBuf::from(format!("{prefix}_full.bed"));

    let mut summary = TableWriter::create(&summary_path, false)?;
    let mut full = TableWriter::create(&full_path, true)?;
    summary.write_header()?;
    full.write_header()?;

    Ok((summary, full, (summary_path, full_path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>() -> SiteRow<'a> {
        SiteRow::new("chr1", 100, 118, "AT", '+', 7, 2, 4, "ATATATATGGATATCCAT")
    }

    #[test]
    fn test_summary_table() {
        let mut writer = TableWriter::new(Vec::new(), false);
        writer.write_header().unwrap();
        writer.write_row(&row()).unwrap();

        let expected = "#Contig\tStart\tEnd\tMotif\tLength\tStrand\tNumber of motifs\tSequence\n\
                        chr1\t100\t118\tAT\t18\t+\t7\tATATATATGGATATCCAT\n";
        assert_eq!(String::from_utf8(writer.writer).unwrap(), expected);
    }

    #[test]
    fn test_full_table() {
        let mut writer = TableWriter::new(Vec::new(), true);
        writer.write_header().unwrap();
        writer.write_row(&row()).unwrap();

        let expected = "#Contig\tStart\tEnd\tMotif\tLength\tStrand\tNumber of motifs\t\
                        Number of inserts\tLength of inserts\tSequence\n\
                        chr1\t100\t118\tAT\t18\t+\t7\t2\t4\tATATATATGGATATCCAT\n";
        assert_eq!(String::from_utf8(writer.writer).unwrap(), expected);
    }
}
