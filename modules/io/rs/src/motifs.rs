use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use eyre::{ensure, Context, Result};
use flate2::read::MultiGzDecoder;

/// Read a motif list: one motif per line, upper-cased; blank lines and
/// `#` comments are skipped. Gzipped files are decompressed transparently.
/// Validation against the IUPAC alphabet is the caller's job.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    ensure!(path.exists(), "Motif file does not exist: {}", path.display());

    let gzipped = infer::get_from_path(path)
        .with_context(|| format!("Failed to sniff {}", path.display()))?
        .is_some_and(|kind| kind.mime_type() == "application/gzip");

    let file = File::open(path)?;
    let reader: Box<dyn Read> = if gzipped {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut motifs = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        motifs.push(line.to_ascii_uppercase());
    }
    Ok(motifs)
}
