//! Parallel processing utilities

use crate::error::{RegifyError, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Progress update information for parallel operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
    /// Whether the item that triggered this update succeeded
    pub succeeded: bool,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>, succeeded: bool) -> Self {
        Self {
            current,
            total,
            message: message.into(),
            succeeded,
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Build a dedicated pool with `jobs` threads (all cores when `None`)
pub fn build_pool(jobs: Option<usize>) -> Result<ThreadPool> {
    let threads = jobs.unwrap_or_else(num_cpus::get).max(1);
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("regify-worker-{}", i))
        .build()
        .map_err(|e| RegifyError::ParallelExecution {
            message: format!("Failed to build thread pool: {}", e),
        })
}

/// Map items in parallel on `pool`, reporting each completion
///
/// Results come back in input order. `describe` turns a finished result into
/// the progress message and success flag.
pub fn parallel_process_with_progress<T, R, F, D, P>(
    pool: &ThreadPool,
    items: Vec<T>,
    f: F,
    describe: D,
    progress_callback: P,
) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
    D: Fn(&R) -> (String, bool) + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = AtomicUsize::new(0);

    pool.install(|| {
        items
            .into_par_iter()
            .map(|item| {
                let result = f(item);
                let current = counter.fetch_add(1, Ordering::SeqCst) + 1;
                let (message, succeeded) = describe(&result);
                progress_callback(ProgressUpdate::new(current, total, message, succeeded));
                result
            })
            .collect()
    })
}
