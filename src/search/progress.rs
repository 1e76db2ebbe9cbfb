use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::nearest::Evaluation;

/// Progress is reported each time a worker completes another 5% of its pairs.
pub const REPORT_STEP_PERCENT: u32 = 5;

/// Running counts of one worker at a reporting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    /// Partition index of the worker
    pub worker: usize,
    /// Completed share of the worker's pairs, a multiple of the report step
    pub percent: u32,
    pub tried: u64,
    pub avoided: u64,
    pub found: u64,
}

impl ProgressReport {
    /// Share of tried pairs rejected by the hemisphere check, in percent.
    pub fn avoided_percent(&self) -> f64 {
        if self.tried == 0 {
            0.0
        } else {
            100.0 * self.avoided as f64 / self.tried as f64
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "worker {:2}, {:3}% complete, tried {:10} avoided {:10} ({:3.0}%) found {:10}",
            self.worker,
            self.percent,
            self.tried,
            self.avoided,
            self.avoided_percent(),
            self.found
        )
    }
}

/// Per-worker counters with 5% reporting thresholds.
///
/// Owned by a single worker, never shared.
#[derive(Debug, Clone)]
pub struct WorkerProgress {
    worker: usize,
    total: u64,
    percent: u32,
    next_threshold: u64,
    tried: u64,
    avoided: u64,
    found: u64,
}

impl WorkerProgress {
    pub fn new(worker: usize, total: u64) -> Self {
        Self {
            worker,
            total,
            percent: 0,
            next_threshold: threshold(total, REPORT_STEP_PERCENT),
            tried: 0,
            avoided: 0,
            found: 0,
        }
    }

    /// Count one evaluation; returns a report when a 5% step was crossed.
    pub fn record(&mut self, evaluation: &Evaluation) -> Option<ProgressReport> {
        self.tried += 1;
        match evaluation {
            Evaluation::Accepted(_) => self.found += 1,
            Evaluation::Avoided => self.avoided += 1,
            Evaluation::Rejected(_) => {}
        }

        if self.total == 0 || self.tried < self.next_threshold || self.percent >= 100 {
            return None;
        }
        // Small partitions can cross several steps with one pair
        let reached = (self.tried * 100 / self.total).min(100) as u32;
        self.percent = reached - reached % REPORT_STEP_PERCENT;
        self.next_threshold = threshold(self.total, self.percent + REPORT_STEP_PERCENT);
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> ProgressReport {
        ProgressReport {
            worker: self.worker,
            percent: self.percent,
            tried: self.tried,
            avoided: self.avoided,
            found: self.found,
        }
    }

    pub fn tried(&self) -> u64 {
        self.tried
    }

    pub fn avoided(&self) -> u64 {
        self.avoided
    }

    pub fn found(&self) -> u64 {
        self.found
    }
}

/// Smallest pair count at which `percent` of `total` is complete.
fn threshold(total: u64, percent: u32) -> u64 {
    (total * percent as u64).div_ceil(100).max(1)
}

/// Trait for receiving progress updates during a search.
///
/// Called from worker threads. Implementations must be thread-safe.
pub trait SearchProgressCallback: Send + Sync {
    /// Called when a worker starts on a partition of `total` pairs.
    fn on_partition(&self, worker: usize, total: u64);
    /// Called each time a worker crosses a reporting step.
    fn on_progress(&self, report: &ProgressReport);
}

/// No-op implementation for callers without a progress display.
pub struct NoopProgress;

impl SearchProgressCallback for NoopProgress {
    fn on_partition(&self, _worker: usize, _total: u64) {}
    fn on_progress(&self, _report: &ProgressReport) {}
}

/// Simple progress tracker that can be polled from another thread.
/// Useful for testing and as a reference implementation.
#[derive(Default)]
pub struct AtomicProgressTracker {
    pub total: AtomicU64,
    pub reports: Mutex<Vec<ProgressReport>>,
}

impl AtomicProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, in arrival order.
    pub fn reports(&self) -> Vec<ProgressReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl SearchProgressCallback for AtomicProgressTracker {
    fn on_partition(&self, _worker: usize, total: u64) {
        self.total.fetch_add(total, Ordering::SeqCst);
    }

    fn on_progress(&self, report: &ProgressReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(*report);
        }
    }
}
