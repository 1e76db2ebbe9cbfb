//! Tests for partition module

use flybymatch::{max_pairs, plan_partitions, FlybyError, PartitionRange};
use proptest::prelude::*;

#[test]
fn test_unique_pair_count() {
    assert_eq!(max_pairs(0, 0).unwrap(), 0);
    assert_eq!(max_pairs(0, 1).unwrap(), 1);
    assert_eq!(max_pairs(0, 999).unwrap(), 499_500);
}

#[test]
fn test_thousand_locations_four_workers_balanced() {
    let parts = plan_partitions(1000, 4).unwrap();
    let counts: Vec<u64> = parts.iter().map(|p| p.pair_count().unwrap()).collect();
    assert_eq!(counts, vec![125_250, 125_028, 125_133, 124_089]);
    assert_eq!(counts.iter().sum::<u64>(), 499_500);

    let ideal = 499_500.0 / 4.0;
    for count in counts {
        assert!((count as f64 - ideal).abs() / ideal < 0.01);
    }
}

#[test]
fn test_density_threshold() {
    assert_eq!(plan_partitions(399, 4).unwrap().len(), 1);
    assert_eq!(plan_partitions(400, 4).unwrap().len(), 4);
    assert_eq!(plan_partitions(150, 1).unwrap().len(), 1);
}

#[test]
fn test_single_location_has_no_pairs() {
    let parts = plan_partitions(1, 8).unwrap();
    assert_eq!(parts, vec![PartitionRange { index: 0, j1: 0, j2: 0 }]);
    assert_eq!(parts[0].pairs().count(), 0);
}

#[test]
fn test_partition_rejects_inverted_bounds() {
    assert!(matches!(
        PartitionRange::new(0, 10, 3),
        Err(FlybyError::InvalidPartition { j1: 10, j2: 3 })
    ));
}

#[test]
fn test_pairs_visit_order() {
    let part = PartitionRange::new(0, 1, 3).unwrap();
    let pairs: Vec<(usize, usize)> = part.pairs().collect();
    assert_eq!(pairs, vec![(2, 0), (2, 1), (3, 0), (3, 1), (3, 2)]);
    assert_eq!(part.pair_count().unwrap(), 5);
}

proptest! {
    #[test]
    fn prop_partitions_cover_every_pair_once(n in 0usize..500, workers in 1usize..6) {
        let parts = plan_partitions(n, workers).unwrap();
        let visited: Vec<(usize, usize)> = parts.iter().flat_map(|p| p.pairs()).collect();

        let expected: Vec<(usize, usize)> =
            (1..n).flat_map(|i| (0..i).map(move |j| (i, j))).collect();
        prop_assert_eq!(visited, expected);
    }

    #[test]
    fn prop_counts_sum_to_unique_pairs(n in 1usize..5000, workers in 1usize..16) {
        let parts = plan_partitions(n, workers).unwrap();
        let total: u64 = parts.iter().map(|p| p.pair_count().unwrap()).sum();
        prop_assert_eq!(total, max_pairs(0, n - 1).unwrap());

        for (k, part) in parts.iter().enumerate() {
            prop_assert_eq!(part.index, k);
            prop_assert!(part.j1 <= part.j2);
        }
        for window in parts.windows(2) {
            prop_assert_eq!(window[0].j2, window[1].j1);
        }
        prop_assert_eq!(parts[parts.len() - 1].j2, n - 1);
    }
}
