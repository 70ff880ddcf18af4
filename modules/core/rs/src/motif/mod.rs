pub use complement::{complement, reverse_complement};
pub use error::Error;
pub use molecule::Molecule;
pub use pattern::{compile, Motif};

mod complement;
mod error;
mod molecule;
mod pattern;
