use derive_more::{Display, Error};

/// Validation failures for user-supplied motifs and molecule selectors.
/// All of them are deterministic and abort before any scanning starts.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    #[display("symbol {symbol:?} is not an IUPAC {molecule} code")]
    InvalidBase { symbol: char, molecule: String },
    #[display("molecule must be 'dna' or 'rna', got {value:?}")]
    InvalidMolecule { value: String },
    #[display("empty motif")]
    EmptyMotif,
}

impl Error {
    pub(crate) fn invalid_base(symbol: u8, molecule: impl ToString) -> Self {
        Self::InvalidBase {
            symbol: symbol as char,
            molecule: molecule.to_string(),
        }
    }
}
