use std::path::PathBuf;

use clap::Parser;

pub use run::run;

mod run;

/// Scan a FASTA file for SSR-like repeats of degenerate IUPAC motifs.
///
/// Every requested region is searched for every motif on every requested
/// strand; nearby matches are stitched into repeat regions and reported in
/// two tab-separated tables (`<prefix>.bed` and `<prefix>_full.bed`).
#[derive(Debug, Parser)]
#[command(name = "ssrseek", version, about)]
pub struct Cli {
    /// Path to the FASTA file. A missing .fai index is built on first use;
    /// bgzf-compressed files need pre-built .fai and .gzi indices.
    pub fasta: PathBuf,

    /// A degenerate sequence motif. Can be given multiple times.
    #[arg(short, long = "motif")]
    pub motifs: Vec<String>,

    /// A file with one motif per line ('#' comments and blank lines are
    /// skipped). Can be given multiple times.
    #[arg(long = "motif-file")]
    pub motif_files: Vec<PathBuf>,

    /// Prefix of the generated tables.
    #[arg(short, long, default_value = "detected_ssrs")]
    pub output_prefix: String,

    /// Region to scan: 'contig' or 'contig:start-end' (0-based, start
    /// included, end excluded). Can be given multiple times; the whole
    /// FASTA file is scanned when omitted.
    #[arg(short, long = "region")]
    pub regions: Vec<String>,

    /// Worker threads. Zero and negative values count back from the
    /// available cores (0 = all of them).
    #[arg(short = 'p', long, default_value_t = 1, allow_negative_numbers = true)]
    pub threads: isize,

    /// Treat motifs as ready-made search patterns: no IUPAC expansion and
    /// no reverse complement. Pick pattern and strand with care; strand
    /// then only orients the reported sequence.
    #[arg(long)]
    pub pattern_ready: bool,

    /// Maximum distance in bp between motifs that still belong to the same
    /// repeat region.
    #[arg(short = 'd', long, default_value_t = 0)]
    pub max_gap: u64,

    /// Minimum number of motifs in one repeat region.
    #[arg(short = 'n', long, default_value_t = 2)]
    pub min_motifs: usize,

    /// Strand(s) to search.
    #[arg(short, long, default_value = "both", value_parser = ["+", "-", "both"])]
    pub strand: String,

    /// Nucleic acid type of the motifs and the complement table.
    #[arg(long, default_value = "dna", value_parser = ["dna", "rna"])]
    pub molecule: String,

    /// Allow overlapping motif matches.
    #[arg(long)]
    pub overlaps: bool,

    /// Log verbosity.
    #[arg(long, default_value = "info", value_parser = ["off", "error", "warn", "info", "debug", "trace"])]
    pub loglevel: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ssrseek", "genome.fa", "-m", "TTAGGG"]);
        assert_eq!(cli.fasta, PathBuf::from("genome.fa"));
        assert_eq!(cli.motifs, ["TTAGGG"]);
        assert_eq!(cli.output_prefix, "detected_ssrs");
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.max_gap, 0);
        assert_eq!(cli.min_motifs, 2);
        assert_eq!(cli.strand, "both");
        assert_eq!(cli.molecule, "dna");
        assert!(!cli.pattern_ready);
        assert!(!cli.overlaps);
    }

    #[test]
    fn test_cli_repeatable_arguments() {
        let cli = Cli::parse_from([
            "ssrseek", "genome.fa", "-m", "AT", "-m", "CAG", "-r", "chr1", "-r", "chr2:0-100",
        ]);
        assert_eq!(cli.motifs, ["AT", "CAG"]);
        assert_eq!(cli.regions, ["chr1", "chr2:0-100"]);
    }

    #[test]
    fn test_cli_rejects_unknown_choices() {
        assert!(Cli::try_parse_from(["ssrseek", "g.fa", "-m", "A", "-s", "x"]).is_err());
        assert!(Cli::try_parse_from(["ssrseek", "g.fa", "-m", "A", "--molecule", "xna"]).is_err());
    }
}
