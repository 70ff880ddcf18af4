use std::path::PathBuf;

use eyre::Result;
use rayon::ThreadPool;

use super::engine::Engine;
use super::result::Findings;
use super::workload::{ScanConfig, ScanRequest};

/// Front door of the scan: owns the thread pool, the engine and the queued
/// requests. Queue requests in the order their results should come back;
/// `run` executes them all and leaves the finder empty for the next batch.
pub struct Finder {
    pool: ThreadPool,
    engine: Engine,
    fasta: PathBuf,
    config: ScanConfig,
    requests: Vec<ScanRequest>,
}

impl Finder {
    pub fn new(fasta: impl Into<PathBuf>, threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(Self {
            pool,
            engine: Engine::default(),
            fasta: fasta.into(),
            config: ScanConfig::default(),
            requests: Vec::new(),
        })
    }

    pub fn set_config(&mut self, config: ScanConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn add_request(&mut self, request: ScanRequest) -> &mut Self {
        self.requests.push(request);
        self
    }

    pub fn add_requests(&mut self, requests: impl IntoIterator<Item = ScanRequest>) -> &mut Self {
        self.requests.extend(requests);
        self
    }

    /// Execute every queued request and return their findings in queue
    /// order, whatever order the workers finished in.
    pub fn run(&mut self) -> Result<Vec<Findings>> {
        let requests = std::mem::take(&mut self.requests);
        self.engine
            .run(&mut self.pool, &self.fasta, &self.config, &requests)
    }
}
