//! Partitioned pair search and result aggregation.
//!
//! The pairs of the input are split into pair-count balanced partitions, one
//! per filter. Each worker owns its filter, its counters and its match list;
//! nothing mutable is shared, so no locking is needed. Results are merged in
//! partition order, which makes the output order independent of scheduling:
//! partition 0 first, and within a partition `i` ascending, then `j` ascending.

pub mod progress;
pub use progress::{
    AtomicProgressTracker, NoopProgress, ProgressReport, SearchProgressCallback, WorkerProgress,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{FlybyError, Result};
use crate::nearest::{Evaluation, FlybyFilter};
use crate::partition::{max_pairs, plan_partitions, PartitionRange};
use crate::{FlybyMatch, Location};

/// Counts for one worker after it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub partition: PartitionRange,
    pub tried: u64,
    pub avoided: u64,
    pub found: u64,
    pub elapsed_ms: u64,
}

/// Merged output of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Accepted paths in partition order, then discovery order
    pub matches: Vec<FlybyMatch>,
    /// One entry per worker, in partition order
    pub workers: Vec<WorkerStats>,
}

impl SearchResult {
    pub fn total_tried(&self) -> u64 {
        self.workers.iter().map(|w| w.tried).sum()
    }

    pub fn total_avoided(&self) -> u64 {
        self.workers.iter().map(|w| w.avoided).sum()
    }

    pub fn total_found(&self) -> u64 {
        self.workers.iter().map(|w| w.found).sum()
    }
}

struct WorkerOutput {
    matches: Vec<FlybyMatch>,
    stats: WorkerStats,
}

/// Find every pair of `locations` whose path the filters accept.
///
/// Runs one worker per filter, or a single worker when there are fewer than
/// 100 locations per filter; surplus filters are dropped. Blocks until all
/// workers are done.
///
/// # Errors
/// - [`FlybyError::NoFilters`] when `filters` is empty
/// - [`FlybyError::InvalidCoordinate`] for a location outside the lat/lon domain
pub fn find_pairs_passing_within_radius<F: FlybyFilter>(
    locations: &[Location],
    filters: Vec<F>,
) -> Result<SearchResult> {
    find_pairs_with_progress(locations, filters, Arc::new(NoopProgress))
}

/// Same as [`find_pairs_passing_within_radius`], forwarding progress reports
/// to `progress` from the worker threads.
pub fn find_pairs_with_progress<F: FlybyFilter>(
    locations: &[Location],
    mut filters: Vec<F>,
    progress: Arc<dyn SearchProgressCallback>,
) -> Result<SearchResult> {
    if filters.is_empty() {
        return Err(FlybyError::NoFilters);
    }
    validate_locations(locations)?;

    let partitions = plan_partitions(locations.len(), filters.len())?;
    filters.truncate(partitions.len());

    info!(
        "[Search] {} locations, {} pairs across {} partitions",
        locations.len(),
        max_pairs(0, locations.len().saturating_sub(1))?,
        partitions.len()
    );
    for partition in &partitions {
        debug!(
            "[Search] partition {}: outer indices {}..={}",
            partition.index,
            partition.j1 + 1,
            partition.j2
        );
    }

    let start = Instant::now();
    let work: Vec<(PartitionRange, F)> = partitions.into_iter().zip(filters).collect();
    let progress = progress.as_ref();

    #[cfg(feature = "parallel")]
    let outputs: Vec<WorkerOutput> = work
        .into_par_iter()
        .map(|(partition, filter)| run_worker(locations, partition, filter, progress))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let outputs: Vec<WorkerOutput> = work
        .into_iter()
        .map(|(partition, filter)| run_worker(locations, partition, filter, progress))
        .collect::<Result<Vec<_>>>()?;

    let result = merge(outputs);
    info!(
        "[Search] Found {} pairs fitting criteria (tried {}, avoided {}) in {}ms",
        result.matches.len(),
        result.total_tried(),
        result.total_avoided(),
        start.elapsed().as_millis()
    );
    Ok(result)
}

fn validate_locations(locations: &[Location]) -> Result<()> {
    match locations.iter().position(|loc| !loc.is_valid()) {
        Some(index) => Err(FlybyError::InvalidCoordinate {
            index,
            latitude: locations[index].latitude,
            longitude: locations[index].longitude,
        }),
        None => Ok(()),
    }
}

/// Evaluate every pair of one partition with the worker's own filter.
fn run_worker<F: FlybyFilter>(
    locations: &[Location],
    partition: PartitionRange,
    mut filter: F,
    progress: &dyn SearchProgressCallback,
) -> Result<WorkerOutput> {
    let total = partition.pair_count()?;
    progress.on_partition(partition.index, total);

    let start = Instant::now();
    let mut tracker = WorkerProgress::new(partition.index, total);
    let mut matches = Vec::new();

    for i in partition.outer_range() {
        let outer = &locations[i];
        for inner in &locations[..i] {
            let evaluation = filter.nearest_approach(outer, inner);
            let report = tracker.record(&evaluation);
            if let Evaluation::Accepted(flyby) = evaluation {
                matches.push(flyby);
            }
            if let Some(report) = report {
                info!("[Search] {}", report);
                progress.on_progress(&report);
            }
        }
    }

    let stats = WorkerStats {
        partition,
        tried: tracker.tried(),
        avoided: tracker.avoided(),
        found: tracker.found(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    debug!(
        "[Search] worker {} done: tried {}, avoided {}, found {} in {}ms",
        partition.index, stats.tried, stats.avoided, stats.found, stats.elapsed_ms
    );
    Ok(WorkerOutput { matches, stats })
}

/// Concatenate worker outputs, which arrive in partition order.
fn merge(outputs: Vec<WorkerOutput>) -> SearchResult {
    let total: usize = outputs.iter().map(|o| o.matches.len()).sum();
    let mut matches = Vec::with_capacity(total);
    let mut workers = Vec::with_capacity(outputs.len());
    for output in outputs {
        matches.extend(output.matches);
        workers.push(output.stats);
    }
    SearchResult { matches, workers }
}
