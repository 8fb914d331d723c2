//! Progress reporting for space queries

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Progress reporter for the oracle queries of one analysis
#[derive(Debug)]
pub struct ProgressReporter {
    pub query_pb: Option<ProgressBar>,
    start_time: Instant,
}

impl ProgressReporter {
    /// Create a progress bar over `total` queries
    pub fn new_for_queries(total: u64) -> Self {
        Self {
            query_pb: Some(create_progress_bar(total, "Measuring snapshot ranges")),
            start_time: Instant::now(),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            query_pb: None,
            start_time: Instant::now(),
        }
    }

    /// Count one finished query. Safe to call from worker threads.
    pub fn inc(&self) {
        if let Some(pb) = &self.query_pb {
            pb.inc(1);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finish and clear the progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.query_pb.take() {
            pb.finish_and_clear();
        }
        log::debug!("Space queries finished in {:.2?}", self.elapsed());
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure the bar is cleaned up silently on error paths
        if let Some(pb) = self.query_pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {eta} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
