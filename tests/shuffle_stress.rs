use erratic::{RangeReplaceableShuffleView, ShuffleView};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn position_counts(len: usize, reshuffles: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut view =
        ShuffleView::shuffled_with_rng((0..len).collect::<Vec<usize>>(), StdRng::seed_from_u64(seed))
            .unwrap();
    let mut counts = vec![vec![0usize; len]; len];
    for _ in 0..reshuffles {
        view.shuffle();
        for (position, &value) in view.iter().enumerate() {
            counts[position][value] += 1;
        }
    }
    counts
}

#[cfg_attr(
    not(feature = "stress-tests"),
    ignore = "set --features stress-tests to enable statistical runs"
)]
#[cfg_attr(
    feature = "stress-tests",
    ignore = "pass -- --ignored to execute heavy stress scenarios"
)]
#[test]
fn every_value_lands_evenly_in_every_position() {
    let len = 8;
    let reshuffles = 80_000;
    let counts = position_counts(len, reshuffles, 0x5eed);
    let expected = reshuffles as f64 / len as f64;
    for row in &counts {
        for &count in row {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "count {count} deviates from {expected}");
        }
    }
}

#[cfg_attr(
    not(feature = "stress-tests"),
    ignore = "set --features stress-tests to enable statistical runs"
)]
#[cfg_attr(
    feature = "stress-tests",
    ignore = "pass -- --ignored to execute heavy stress scenarios"
)]
#[test]
fn all_120_orderings_appear_with_similar_frequency() {
    let mut view =
        ShuffleView::shuffled_with_rng(vec![1, 2, 3, 4, 5], StdRng::seed_from_u64(0xfeed)).unwrap();
    let mut frequencies: HashMap<Vec<i32>, usize> = HashMap::new();
    let reshuffles = 240_000;
    for _ in 0..reshuffles {
        view.shuffle();
        *frequencies.entry(view.to_vec()).or_default() += 1;
    }
    assert_eq!(frequencies.len(), 120);
    let expected = reshuffles as f64 / 120.0;
    for (ordering, &count) in &frequencies {
        let deviation = (count as f64 - expected).abs() / expected;
        assert!(deviation < 0.1, "{ordering:?} seen {count} times");
    }
}

#[cfg_attr(
    not(feature = "stress-tests"),
    ignore = "set --features stress-tests to enable statistical runs"
)]
#[cfg_attr(
    feature = "stress-tests",
    ignore = "pass -- --ignored to execute heavy stress scenarios"
)]
#[test]
fn large_view_survives_many_structural_edits() {
    let len = 50_000;
    let mut view = RangeReplaceableShuffleView::shuffled_with_rng(
        (0..len as i64).collect::<Vec<i64>>(),
        StdRng::seed_from_u64(0xabc),
    )
    .unwrap();
    for round in 0..200usize {
        let start = (round * 97) % view.len();
        let end = (start + round % 5).min(view.len());
        let inserted: Vec<i64> = (0..(round % 7) as i64).map(|offset| -(offset + 1)).collect();
        view.replace_range(start..end, inserted).unwrap();
    }
    let mut storage: Vec<i64> = view.base().clone();
    let mut logical = view.to_vec();
    storage.sort_unstable();
    logical.sort_unstable();
    assert_eq!(storage, logical);
}
