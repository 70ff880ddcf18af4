use std::path::Path;

use ahash::HashMap;
use eyre::{ensure, Context, Result};
use regex::Regex;

use ssrseek_core_rs::loc::Strand;
use ssrseek_core_rs::motif::{compile, reverse_complement};
use ssrseek_io_rs::fasta::{self, SequenceFetch};

use super::result::{Findings, Site};
use super::stitcher::Stitcher;
use super::workload::{ScanConfig, ScanRequest};

/// The pattern a scan unit actually searches with. Ready-made patterns pass
/// through verbatim on either strand; degenerate motifs compile as-is on
/// `+` and from their reverse complement on `-`.
fn resolve_pattern(request: &ScanRequest, config: &ScanConfig) -> Result<String> {
    let motif = request.motif().as_str();
    if *config.pattern_ready() {
        return Ok(motif.to_string());
    }

    let molecule = *config.molecule();
    let pattern = match request.strand() {
        Strand::Forward => compile(motif, molecule)?,
        Strand::Reverse => compile(&reverse_complement(motif, molecule)?, molecule)?,
    };
    Ok(pattern)
}

/// Window-relative match offsets, ascending by start. Overlapped mode
/// restarts the search one byte past each match start, which yields the
/// leftmost match at every start position.
fn find_hits(regex: &Regex, window: &str, overlapped: bool) -> Vec<(usize, usize)> {
    if !overlapped {
        return regex
            .find_iter(window)
            .map(|hit| (hit.start(), hit.end()))
            .collect();
    }

    let mut hits = Vec::new();
    let mut at = 0;
    while at <= window.len() {
        match regex.find_at(window, at) {
            Some(hit) => {
                hits.push((hit.start(), hit.end()));
                at = hit.start() + 1;
            }
            None => break,
        }
    }
    hits
}

/// Per-thread scan state: a private handle into the FASTA file, a reusable
/// window buffer, and the finished units keyed by their dispatch index.
#[derive(Default)]
pub(crate) struct Worker {
    reader: Option<Box<dyn SequenceFetch + Send + Sync>>,
    window: Vec<u8>,
    findings: HashMap<usize, Findings>,
}

impl Worker {
    pub(crate) fn reset(&mut self) {
        self.reader = None;

        self.window.clear();
        self.window.shrink_to_fit();

        self.findings.clear();
        self.findings.shrink_to_fit();
    }

    pub(crate) fn take_findings(&mut self) -> HashMap<usize, Findings> {
        std::mem::take(&mut self.findings)
    }

    /// Run one scan unit end to end and file its findings under `unit`.
    pub(crate) fn execute(
        &mut self,
        unit: usize,
        request: &ScanRequest,
        config: &ScanConfig,
        fasta: &Path,
    ) -> Result<()> {
        let pattern = resolve_pattern(request, config)?;
        let regex = Regex::new(&pattern)
            .wrap_err_with(|| format!("Unusable search pattern {pattern:?}"))?;

        // The handle is opened on first use and lives for the thread's
        // lifetime; workers never share one.
        let reader = match &mut self.reader {
            Some(reader) => reader,
            slot @ None => slot.insert(fasta::open(fasta)?),
        };

        reader.fetch(request.contig(), *request.start(), *request.end(), &mut self.window)?;
        self.window.make_ascii_uppercase();
        let window = std::str::from_utf8(&self.window).wrap_err("Non-UTF8 sequence data")?;

        let mut hits = find_hits(&regex, window, *config.overlapped());
        // The stitcher needs ascending starts; the regex engine already
        // yields them that way, this only guards the invariant.
        hits.sort_unstable();

        let base = *request.start();
        let mut stitcher = Stitcher::for_request(request);
        for &(start, end) in &hits {
            stitcher.push(base + start as u64, base + end as u64);
        }

        let mut sites = Vec::new();
        for region in stitcher.finish() {
            let matched = &window[(region.start() - base) as usize..(region.end() - base) as usize];
            let sequence = match region.strand() {
                Strand::Forward => matched.to_string(),
                // Applied exactly once, to the output sequence
                Strand::Reverse => reverse_complement(matched, *config.molecule())?,
            };
            sites.push(Site::new(region, sequence));
        }

        let total = sites.len();
        ensure!(
            self.findings
                .insert(unit, Findings::new(request.clone(), sites, total))
                .is_none(),
            "Scan unit #{unit} was executed twice; this is a bug in the engine"
        );
        Ok(())
    }
}
