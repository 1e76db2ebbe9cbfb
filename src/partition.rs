//! Pair-count balanced partitions of the pair space.
//!
//! The search visits every pair `(i, j)` with `0 <= j < i < n`. Outer index
//! `i` contributes `i` pairs, so the work up to `i` grows as `i²/2`. Giving
//! each of `p` workers an equal share of pairs means placing the boundary
//! before partition `k` at `n·sqrt(k/p)` rather than at `n·k/p`.

use crate::error::{FlybyError, Result};

/// Below this many locations per worker a single partition is used.
pub const MIN_LOCATIONS_PER_WORKER: usize = 100;

/// Number of pairs `(i, j)`, `j < i`, with outer index `i` in `(j1, j2]`.
///
/// This is the sum of `i` for `i = j1 + 1 ..= j2`, i.e. `(j2 - j1)(1 + j1 + j2) / 2`.
/// `max_pairs(0, n - 1)` is the number of unique pairs among `n` locations.
pub fn max_pairs(j1: usize, j2: usize) -> Result<u64> {
    if j1 > j2 {
        return Err(FlybyError::InvalidPartition { j1, j2 });
    }
    let (j1, j2) = (j1 as u64, j2 as u64);
    Ok((j2 - j1) * (1 + j1 + j2) / 2)
}

/// A contiguous run of outer indices assigned to one worker.
///
/// Covers outer indices `j1 + 1 ..= j2`; the shared boundary `j1` belongs to
/// the previous partition. Outer index 0 has no pairs, so partition 0 starts
/// at `j1 = 0` without losing any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRange {
    /// Position in the merge order
    pub index: usize,
    /// Exclusive lower bound of the outer index
    pub j1: usize,
    /// Inclusive upper bound of the outer index
    pub j2: usize,
}

impl PartitionRange {
    pub fn new(index: usize, j1: usize, j2: usize) -> Result<Self> {
        if j1 > j2 {
            return Err(FlybyError::InvalidPartition { j1, j2 });
        }
        Ok(Self { index, j1, j2 })
    }

    /// Outer indices visited by this partition.
    pub fn outer_range(&self) -> std::ops::RangeInclusive<usize> {
        (self.j1 + 1)..=self.j2
    }

    pub fn pair_count(&self) -> Result<u64> {
        max_pairs(self.j1, self.j2)
    }

    /// Every `(i, j)` pair in visiting order: `i` ascending, then `j` ascending.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        self.outer_range().flat_map(|i| (0..i).map(move |j| (i, j)))
    }
}

/// Split the pairs of `n` locations into at most `workers` balanced partitions.
///
/// Uses a single partition when there are fewer than
/// [`MIN_LOCATIONS_PER_WORKER`] locations per worker.
pub fn plan_partitions(n: usize, workers: usize) -> Result<Vec<PartitionRange>> {
    if workers == 0 {
        return Err(FlybyError::NoFilters);
    }
    let last = n.saturating_sub(1);
    if n / workers < MIN_LOCATIONS_PER_WORKER {
        return Ok(vec![PartitionRange::new(0, 0, last)?]);
    }

    let nf = n as f64;
    let pf = workers as f64;
    let boundary = |k: usize| -> usize {
        if k == workers {
            last
        } else {
            ((nf * (k as f64 / pf).sqrt()).floor() as usize).min(last)
        }
    };

    (0..workers)
        .map(|k| PartitionRange::new(k, boundary(k), boundary(k + 1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_pairs_matches_sum() {
        for j1 in 0..20 {
            for j2 in j1..40 {
                let expected: u64 = ((j1 + 1)..=j2).map(|i| i as u64).sum();
                assert_eq!(max_pairs(j1, j2).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_max_pairs_rejects_inverted_range() {
        assert!(matches!(
            max_pairs(5, 4),
            Err(FlybyError::InvalidPartition { j1: 5, j2: 4 })
        ));
    }

    #[test]
    fn test_small_input_uses_single_partition() {
        let parts = plan_partitions(399, 4).unwrap();
        assert_eq!(parts, vec![PartitionRange { index: 0, j1: 0, j2: 398 }]);
    }

    #[test]
    fn test_empty_input() {
        let parts = plan_partitions(0, 3).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].pair_count().unwrap(), 0);
        assert_eq!(parts[0].pairs().count(), 0);
    }

    #[test]
    fn test_zero_workers_is_error() {
        assert!(matches!(plan_partitions(10, 0), Err(FlybyError::NoFilters)));
    }

    #[test]
    fn test_boundaries_for_thousand_locations() {
        let parts = plan_partitions(1000, 4).unwrap();
        let bounds: Vec<(usize, usize)> = parts.iter().map(|p| (p.j1, p.j2)).collect();
        assert_eq!(bounds, vec![(0, 500), (500, 707), (707, 866), (866, 999)]);
    }
}
