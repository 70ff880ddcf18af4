use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use ssrseek_core_rs::loc::Strand;
use ssrseek_core_rs::motif::{Molecule, Motif};

/// One independent scan unit: a motif searched on one strand of one
/// half-open window `[start, end)` of a contig, stitched under a maximum
/// gap and minimum motif count. Structural equality and hashing make the
/// request usable as the correlation key between dispatch and fan-in.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Constructor, Dissolve, Getters)]
pub struct ScanRequest {
    motif: Motif,
    contig: String,
    start: u64,
    end: u64,
    strand: Strand,
    max_gap: u64,
    min_motifs: usize,
}

impl Display for ScanRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {}:{}-{}[{}]",
            self.motif, self.contig, self.start, self.end, self.strand
        )
    }
}

/// Scan-wide knobs threaded explicitly through every component that needs
/// them; there is no ambient configuration state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct ScanConfig {
    /// Selects the T/U literal in complement tables and pattern classes.
    molecule: Molecule,
    /// Permit overlapping motif matches.
    overlapped: bool,
    /// Treat motifs as ready-made patterns: no IUPAC expansion and no
    /// reverse complement; strand then only orients the output sequence.
    pattern_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ScanRequest {
        ScanRequest::new(
            Motif::new("at", Molecule::Dna).unwrap(),
            "chr1".into(),
            0,
            100,
            Strand::Forward,
            0,
            2,
        )
    }

    #[test]
    fn test_request_equality_is_structural() {
        assert_eq!(request(), request());

        let mut other = request();
        other = ScanRequest::new(
            other.motif().clone(),
            other.contig().clone(),
            *other.start(),
            *other.end(),
            Strand::Reverse,
            *other.max_gap(),
            *other.min_motifs(),
        );
        assert_ne!(request(), other);
    }

    #[test]
    fn test_request_display() {
        assert_eq!(request().to_string(), "AT on chr1:0-100[+]");
    }

    #[test]
    fn test_config_default() {
        let config = ScanConfig::default();
        assert_eq!(config.molecule(), &Molecule::Dna);
        assert!(!config.overlapped());
        assert!(!config.pattern_ready());
    }
}
