use std::fmt::Display;

use itertools::Itertools;

use super::error::Error;
use super::molecule::Molecule;

/// Character class matched by one IUPAC code, e.g. N => [ACGT].
fn class(code: u8, molecule: Molecule) -> Result<&'static str, Error> {
    let class = match (code, molecule) {
        (b'A', _) => "A",
        (b'C', _) => "C",
        (b'G', _) => "G",
        (b'T', Molecule::Dna) => "T",
        (b'U', Molecule::Rna) => "U",
        (b'B', Molecule::Dna) => "[CGT]",
        (b'B', Molecule::Rna) => "[CGU]",
        (b'D', Molecule::Dna) => "[AGT]",
        (b'D', Molecule::Rna) => "[AGU]",
        (b'H', Molecule::Dna) => "[ACT]",
        (b'H', Molecule::Rna) => "[ACU]",
        (b'K', Molecule::Dna) => "[GT]",
        (b'K', Molecule::Rna) => "[GU]",
        (b'M', _) => "[AC]",
        (b'N', Molecule::Dna) => "[ACGT]",
        (b'N', Molecule::Rna) => "[ACGU]",
        (b'R', _) => "[AG]",
        (b'S', _) => "[GC]",
        (b'V', _) => "[ACG]",
        (b'W', Molecule::Dna) => "[AT]",
        (b'W', Molecule::Rna) => "[AU]",
        (b'Y', Molecule::Dna) => "[CT]",
        (b'Y', Molecule::Rna) => "[CU]",
        _ => return Err(Error::invalid_base(code, molecule)),
    };
    Ok(class)
}

/// Compile a degenerate motif into a searchable pattern. Maximal runs of the
/// same source code collapse into a single class with a `{k}` quantifier,
/// which matches exactly the same positions as the unrolled expansion:
/// `NNYCGAARN` => `[ACGT]{2}[CT]CGA{2}[AG][ACGT]`.
pub fn compile(motif: &str, molecule: Molecule) -> Result<String, Error> {
    if motif.is_empty() {
        return Err(Error::EmptyMotif);
    }

    let mut pattern = String::with_capacity(motif.len() * 2);
    for (count, code) in motif
        .bytes()
        .map(|b| b.to_ascii_uppercase())
        .dedup_with_count()
    {
        pattern.push_str(class(code, molecule)?);
        if count > 1 {
            // The quantifier binds to the class emitted just above and to
            // nothing else, so identical-looking classes elsewhere in the
            // pattern keep their own repetition counts.
            pattern.push_str(&format!("{{{count}}}"));
        }
    }
    Ok(pattern)
}

/// A validated degenerate motif: upper-cased IUPAC codes of one molecule.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Motif(String);

impl Motif {
    pub fn new(seq: &str, molecule: Molecule) -> Result<Self, Error> {
        if seq.is_empty() {
            return Err(Error::EmptyMotif);
        }
        let seq = seq.to_ascii_uppercase();
        for code in seq.bytes() {
            class(code, molecule)?;
        }
        Ok(Self(seq))
    }

    /// Escape hatch for ready-made patterns: no IUPAC validation, only
    /// upper-casing. What the text means is entirely the caller's concern.
    pub fn pattern(seq: &str) -> Self {
        Self(seq.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Motif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Motif {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_reference_motif() {
        assert_eq!(
            compile("NNYCGAARN", Molecule::Dna).unwrap(),
            "[ACGT]{2}[CT]CGA{2}[AG][ACGT]"
        );
    }

    #[test]
    fn test_compile_runs() {
        for (motif, molecule, expected) in [
            ("A", Molecule::Dna, "A"),
            ("AAAA", Molecule::Dna, "A{4}"),
            ("at", Molecule::Dna, "AT"),
            ("NN", Molecule::Rna, "[ACGU]{2}"),
            ("WWSS", Molecule::Dna, "[AT]{2}[GC]{2}"),
            ("ANNA", Molecule::Dna, "A[ACGT]{2}A"),
        ] {
            assert_eq!(compile(motif, molecule).unwrap(), expected, "{motif}");
        }
    }

    #[test]
    fn test_compile_errors() {
        assert_eq!(compile("", Molecule::Dna), Err(Error::EmptyMotif));
        assert!(matches!(
            compile("ACXGT", Molecule::Dna),
            Err(Error::InvalidBase { .. })
        ));
        // T is not an RNA code and U is not a DNA code
        assert!(compile("AUT", Molecule::Rna).is_err());
        assert!(compile("AU", Molecule::Dna).is_err());
    }

    #[test]
    fn test_motif_validation() {
        let motif = Motif::new("ccgg", Molecule::Dna).unwrap();
        assert_eq!(motif.as_str(), "CCGG");
        assert_eq!(motif.to_string(), "CCGG");

        assert_eq!(Motif::new("", Molecule::Dna), Err(Error::EmptyMotif));
        assert!(Motif::new("AC-GT", Molecule::Dna).is_err());
        assert!(Motif::new("ACGU", Molecule::Rna).is_ok());
        assert!(Motif::new("ACGU", Molecule::Dna).is_err());
    }
}
