use super::error::Error;
use super::molecule::Molecule;

/// Complement of a single upper-cased IUPAC code. Ambiguity-code pairs
/// (B/V, D/H, K/M, R/Y) and the self-complementary codes (N, S, W) are the
/// same for DNA and RNA; only the T/U literal differs.
pub fn complement(base: u8, molecule: Molecule) -> Result<u8, Error> {
    let complemented = match base {
        b'A' => molecule.tu(),
        b'C' => b'G',
        b'G' => b'C',
        b'T' if molecule == Molecule::Dna => b'A',
        b'U' if molecule == Molecule::Rna => b'A',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'K' => b'M',
        b'M' => b'K',
        b'R' => b'Y',
        b'Y' => b'R',
        b'N' | b'S' | b'W' => base,
        _ => return Err(Error::invalid_base(base, molecule)),
    };
    Ok(complemented)
}

/// Reverse complement of an IUPAC sequence. Input case is ignored; the
/// result is upper-cased.
pub fn reverse_complement(seq: &str, molecule: Molecule) -> Result<String, Error> {
    let mut result = String::with_capacity(seq.len());
    for &base in seq.as_bytes().iter().rev() {
        result.push(complement(base.to_ascii_uppercase(), molecule)? as char);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DNA_ALPHABET: &str = "ABCDGHKMNRSTVWY";
    const RNA_ALPHABET: &str = "ABCDGHKMNRSUVWY";

    #[test]
    fn test_literal_bases() {
        assert_eq!(complement(b'A', Molecule::Dna), Ok(b'T'));
        assert_eq!(complement(b'A', Molecule::Rna), Ok(b'U'));
        assert_eq!(complement(b'T', Molecule::Dna), Ok(b'A'));
        assert_eq!(complement(b'U', Molecule::Rna), Ok(b'A'));
        assert_eq!(complement(b'C', Molecule::Dna), Ok(b'G'));
        assert_eq!(complement(b'G', Molecule::Rna), Ok(b'C'));
    }

    #[test]
    fn test_molecule_mismatch() {
        assert!(complement(b'U', Molecule::Dna).is_err());
        assert!(complement(b'T', Molecule::Rna).is_err());
    }

    #[test]
    fn test_invalid_bases() {
        for base in [b'X', b'Z', b'-', b' ', b'1'] {
            assert!(complement(base, Molecule::Dna).is_err());
            assert!(complement(base, Molecule::Rna).is_err());
        }
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ACGT", Molecule::Dna).unwrap(), "ACGT");
        assert_eq!(reverse_complement("AAGG", Molecule::Dna).unwrap(), "CCTT");
        assert_eq!(reverse_complement("acgu", Molecule::Rna).unwrap(), "ACGU");
        assert_eq!(reverse_complement("NNYCGAARN", Molecule::Dna).unwrap(), "NYTTCGRNN");
        assert_eq!(reverse_complement("", Molecule::Dna).unwrap(), "");
    }

    #[test]
    fn test_reverse_complement_roundtrip() {
        for (alphabet, molecule) in [
            (DNA_ALPHABET, Molecule::Dna),
            (RNA_ALPHABET, Molecule::Rna),
        ] {
            let twice =
                reverse_complement(&reverse_complement(alphabet, molecule).unwrap(), molecule)
                    .unwrap();
            assert_eq!(twice, alphabet);
        }
    }
}
