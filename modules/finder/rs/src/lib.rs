pub use engine::Engine;
pub use error::Error;
pub use finder::Finder;
pub use result::{Findings, RepeatRegion, Site};
pub use stitcher::Stitcher;
pub use workload::{ScanConfig, ScanRequest};

pub mod cli;
mod engine;
mod error;
mod finder;
mod result;
mod stitcher;
mod worker;
mod workload;
