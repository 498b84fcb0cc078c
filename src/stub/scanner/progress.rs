use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rayon::prelude::*;

/// Runs per-file work sequentially or on a rayon pool, optionally behind a progress bar
#[derive(Debug, Default)]
pub struct ProgressTracker {
    /// Whether a bar may be drawn at all
    enabled: bool,
}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Resolve the configured job count to a thread count; `0` means "pick from CPUs"
    pub fn thread_count(jobs: usize) -> usize {
        if jobs > 0 {
            return jobs;
        }
        let available = num_cpus::get();
        let used = std::cmp::max(1, available.saturating_sub(1));
        debug!("Using {} threads for parallel processing (available: {})", used, available);
        used
    }

    fn progress_bar(&self, len: usize) -> Result<Option<ProgressBar>> {
        if !self.enabled || len <= 10 {
            return Ok(None);
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"));
        Ok(Some(pb))
    }

    /// Apply `operation` to every item, keeping input order in the output.
    ///
    /// The first error aborts the run.
    pub fn run<T, R, F>(&self, items: &[T], jobs: Option<usize>, operation: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync + Send,
    {
        let progress_bar = self.progress_bar(items.len())?;
        let processed_count = AtomicUsize::new(0);

        let step = |item: &T| {
            let result = operation(item);
            let current = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(pb) = &progress_bar {
                pb.set_position(current as u64);
            }
            result
        };

        let results = match jobs {
            None => items.iter().map(step).collect::<Result<Vec<_>>>(),
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(Self::thread_count(jobs))
                    .build()
                    .context("Failed to build thread pool")?;
                pool.install(|| items.par_iter().map(step).collect::<Result<Vec<_>>>())
            }
        };

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Processing complete");
        }

        results
    }
}
