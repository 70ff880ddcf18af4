use std::thread::available_parallelism;

use eyre::Result;

fn normalize(requested: isize, max: usize) -> usize {
    let max = max as isize;
    if requested > 0 {
        requested.min(max) as usize
    } else {
        // 0 => every available core, negative => count back from the maximum
        (max + requested).max(1) as usize
    }
}

/// Resolve a requested worker count against the machine. Positive values are
/// capped at the available parallelism; zero and negative values count back
/// from it (0 => all cores, -1 => all but one, ...), never below one worker.
pub fn workers(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get();
    Ok(normalize(requested, max))
}
