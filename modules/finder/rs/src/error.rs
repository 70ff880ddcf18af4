use derive_more::{Display, Error};

/// Fan-in integrity failure: a dispatched scan unit left no result behind.
/// That can only mean a lost or crashed worker, so it is fatal to the whole
/// run and never retried.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    #[display("no result for scan unit #{unit} ({request}); a worker was lost")]
    IncompleteResults { unit: usize, request: String },
}
