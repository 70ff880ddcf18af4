use std::cell::RefCell;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use eyre::{eyre, Result};
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use super::error::Error;
use super::result::Findings;
use super::worker::Worker;
use super::workload::{ScanConfig, ScanRequest};

/// Fans scan units out over a thread pool and fans their findings back in.
/// Workers are thread-local and never share state; the only coordination
/// point is the single-threaded collapse after the scope ends, which
/// restores the input request order regardless of completion order.
#[derive(Default)]
pub struct Engine {
    workers: ThreadLocal<RefCell<Worker>>,
}

impl Engine {
    pub fn reset(&mut self) {
        for worker in self.workers.iter_mut() {
            worker.borrow_mut().reset()
        }
    }

    pub fn run(
        &mut self,
        pool: &mut ThreadPool,
        fasta: &Path,
        config: &ScanConfig,
        requests: &[ScanRequest],
    ) -> Result<Vec<Findings>> {
        self.reset();

        let error_occured = AtomicBool::new(false);
        let errors = Mutex::new(Vec::new());

        // These IDs should stay here to please the borrow checker
        let units = (0..requests.len()).collect::<Vec<_>>();
        pool.scope(|s| {
            for unit in &units {
                // Stop dispatching once any unit has failed
                if error_occured.load(Ordering::Relaxed) {
                    return;
                }

                s.spawn(|_| {
                    if error_occured.load(Ordering::Relaxed) {
                        return;
                    }

                    let result = self.workers.get_or_default().borrow_mut().execute(
                        *unit,
                        &requests[*unit],
                        config,
                        fasta,
                    );
                    if let Err(err) = result {
                        error_occured.store(true, Ordering::Relaxed);
                        errors
                            .lock()
                            .expect("Failed to hold the error mutex")
                            .push(err);
                    }
                });
            }
        });

        if error_occured.into_inner() {
            let errors = errors.into_inner()?;
            return Err(eyre!("Scan failed. Errors: {:?}", errors));
        }

        // Collapse the per-worker maps into input-order slots; every unit
        // must have reported back exactly once.
        let mut slots: Vec<Option<Findings>> = requests.iter().map(|_| None).collect();
        for worker in self.workers.iter_mut() {
            for (unit, findings) in worker.get_mut().take_findings() {
                slots[unit] = Some(findings);
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(unit, slot)| {
                slot.ok_or_else(|| {
                    Error::IncompleteResults {
                        unit,
                        request: requests[unit].to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }
}
