use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use derive_more::{Display, Error};
use eyre::{ensure, Context, Result};
use impl_tools::autoimpl;

pub use index::{Index, IndexRecord};
pub use indexed_reader::IndexedReader;

mod index;
mod indexed_reader;

/// Collaborator-boundary failures. Each aborts the scan unit that hit it;
/// none is retryable.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    #[display("contig {contig:?} is not present in the FASTA index")]
    ContigNotFound { contig: String },
    #[display(
        "window [{start}, {end}) is out of range for contig {contig:?} of length {length}"
    )]
    WindowOutOfRange {
        contig: String,
        start: u64,
        end: u64,
        length: u64,
    },
}

/// Random access to reference sequences. The window is 0-based, half-open;
/// bounds are strict: out-of-range windows error instead of clamping.
#[autoimpl(for<T: trait + ?Sized> Box<T>)]
pub trait SequenceFetch {
    /// Contig names in the order they appear in the FASTA file.
    fn ids(&self) -> &[String];

    /// Total length of the contig, in bases.
    fn length(&self, contig: &str) -> Result<u64>;

    /// Fetch `[start, end)` of the contig into the buffer (cleared first).
    fn fetch(&mut self, contig: &str, start: u64, end: u64, buffer: &mut Vec<u8>) -> Result<()>;
}

/// Open a FASTA file for random access. Plain files get their `.fai` index
/// loaded, or built on the fly and persisted best-effort when missing;
/// bgzf-compressed files additionally need a pre-built `.gzi`.
pub fn open(fasta: impl AsRef<Path>) -> Result<Box<dyn SequenceFetch + Send + Sync + 'static>> {
    let fasta = fasta.as_ref();
    ensure!(fasta.exists(), "FASTA file does not exist: {}", fasta.display());

    let fname = fasta
        .file_name()
        .and_then(|x| x.to_str())
        .unwrap_or_default()
        .to_string();
    let fai = fasta.with_file_name(format!("{fname}.fai"));

    let gzipped = infer::get_from_path(fasta)
        .with_context(|| format!("Failed to sniff {}", fasta.display()))?
        .is_some_and(|kind| kind.mime_type() == "application/gzip");

    if gzipped {
        // Random access into compressed data needs both indices up front;
        // neither can be rebuilt from the bgzf stream alone here.
        ensure!(fai.exists(), "fai index does not exist: {}", fai.display());
        let gzi = fasta.with_file_name(format!("{fname}.gzi"));
        ensure!(gzi.exists(), "gzi index does not exist: {}", gzi.display());

        let index = Index::from_fai(BufReader::new(File::open(&fai)?))
            .with_context(|| format!("Failed to parse {}", fai.display()))?;
        let gzi = noodles::bgzf::gzi::fs::read(&gzi)?;
        let reader =
            noodles::bgzf::io::indexed_reader::IndexedReader::new(File::open(fasta)?, gzi);
        return Ok(Box::new(IndexedReader::new(reader, index)));
    }

    let index = if fai.exists() {
        Index::from_fai(BufReader::new(File::open(&fai)?))
            .with_context(|| format!("Failed to parse {}", fai.display()))?
    } else {
        log::info!("No index next to {}, building one", fasta.display());
        let index = Index::build(BufReader::new(File::open(fasta)?))
            .with_context(|| format!("Failed to index {}", fasta.display()))?;
        if let Err(err) = std::fs::write(&fai, index.to_fai()) {
            log::warn!("Could not persist {}: {}", fai.display(), err);
        }
        index
    };

    Ok(Box::new(IndexedReader::new(File::open(fasta)?, index)))
}
