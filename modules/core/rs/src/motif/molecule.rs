use std::fmt::Display;

use super::error::Error;

/// Nucleic acid type. Selects which literal base (T or U) the complement
/// table and pattern classes use; ambiguity codes are shared.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Molecule {
    Dna,
    Rna,
}

impl Molecule {
    /// The thymine-or-uracil literal of this molecule.
    pub fn tu(&self) -> u8 {
        match self {
            Self::Dna => b'T',
            Self::Rna => b'U',
        }
    }
}

impl Display for Molecule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Dna => write!(f, "dna"),
            Self::Rna => write!(f, "rna"),
        }
    }
}

impl TryFrom<&str> for Molecule {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "dna" => Ok(Self::Dna),
            "rna" => Ok(Self::Rna),
            _ => Err(Error::InvalidMolecule {
                value: value.to_string(),
            }),
        }
    }
}

impl Default for Molecule {
    fn default() -> Self {
        Self::Dna
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_molecule_try_from() {
        assert_eq!(Molecule::try_from("dna"), Ok(Molecule::Dna));
        assert_eq!(Molecule::try_from("RNA"), Ok(Molecule::Rna));
        assert_eq!(
            Molecule::try_from("protein"),
            Err(Error::InvalidMolecule {
                value: "protein".into()
            })
        );
    }

    #[test]
    fn test_molecule_display() {
        assert_eq!(Molecule::Dna.to_string(), "dna");
        assert_eq!(Molecule::Rna.to_string(), "rna");
    }

    #[test]
    fn test_molecule_tu() {
        assert_eq!(Molecule::Dna.tu(), b'T');
        assert_eq!(Molecule::Rna.tu(), b'U');
    }
}
