use super::shared::ShuffleCore;
use super::{MutableShuffleView, RangeReplaceableShuffleView};
use crate::collection::{Collection, CollectionMut, RangeReplaceable};
use crate::config::ShuffleConfig;
use crate::error::Result;
use crate::permutation::PermutationMapping;
use crate::random::fresh_rng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Read-only shuffled view of a collection.
///
/// ```
/// use erratic::ShuffleView;
///
/// let view = ShuffleView::shuffled(vec![1, 2, 3, 4]).unwrap();
/// let mut seen = view.to_vec();
/// seen.sort();
/// assert_eq!(seen, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug)]
pub struct ShuffleView<C, R = StdRng> {
    core: ShuffleCore<C, R>,
}

impl<C: Collection> ShuffleView<C> {
    pub fn shuffled(collection: C) -> Result<Self> {
        Self::shuffled_with_rng(collection, fresh_rng())
    }

    pub fn unshuffled(collection: C) -> Result<Self> {
        Self::unshuffled_with_rng(collection, fresh_rng())
    }

    /// A view over `collection` using an existing mapping of the same length.
    pub fn new(collection: C, mapping: PermutationMapping) -> Result<Self> {
        Self::with_parts(collection, mapping, fresh_rng())
    }

    pub fn with_config(collection: C, config: &ShuffleConfig) -> Result<Self> {
        Self::shuffled_with_rng(collection, config.rng())
    }
}

impl<C: Collection, R: Rng + SeedableRng> ShuffleView<C, R> {
    pub fn shuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(ShuffleView {
            core: ShuffleCore::shuffled(collection, rng)?,
        })
    }

    pub fn unshuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(ShuffleView {
            core: ShuffleCore::unshuffled(collection, rng)?,
        })
    }

    pub fn with_parts(collection: C, mapping: PermutationMapping<R>, rng: R) -> Result<Self> {
        Ok(ShuffleView {
            core: ShuffleCore::with_mapping(collection, mapping, rng)?,
        })
    }
}

shuffle_view_common!(ShuffleView);

impl<C, R> From<MutableShuffleView<C, R>> for ShuffleView<C, R>
where
    C: CollectionMut,
    R: Rng + SeedableRng,
{
    fn from(view: MutableShuffleView<C, R>) -> Self {
        ShuffleView {
            core: view.into_core(),
        }
    }
}

impl<C: RangeReplaceable, R: Rng + SeedableRng> From<RangeReplaceableShuffleView<C, R>>
    for ShuffleView<C, R>
{
    fn from(view: RangeReplaceableShuffleView<C, R>) -> Self {
        ShuffleView {
            core: view.into_core(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShuffleError;
    use crate::view::LazyShuffle;
    use std::collections::HashSet;

    fn seeded(values: Vec<i32>, seed: u64) -> ShuffleView<Vec<i32>> {
        ShuffleView::shuffled_with_rng(values, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn shuffled_view_is_a_permutation_of_its_base() {
        let view = seeded((0..50).collect(), 1);
        let mut values = view.to_vec();
        values.sort_unstable();
        assert_eq!(values, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn unshuffled_view_preserves_order() {
        let view = ShuffleView::unshuffled(vec!['a', 'b', 'c']).unwrap();
        assert_eq!(view.to_vec(), vec!['a', 'b', 'c']);
        assert!(view.permutation().is_identity());
    }

    #[test]
    fn repeat_reads_are_stable() {
        let view = seeded(vec![10, 20, 30, 40, 50], 2);
        let first = view.to_vec();
        assert_eq!(view.to_vec(), first);
        assert_eq!(view[3], first[3]);
        assert_eq!(view.get(5), None);
    }

    #[test]
    fn iteration_runs_both_directions() {
        let view = seeded((1..=6).collect(), 3);
        let forward: Vec<i32> = view.iter().copied().collect();
        let mut backward: Vec<i32> = view.iter().rev().copied().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(view.iter().len(), 6);
    }

    #[test]
    fn renders_in_logical_order() {
        let mapping = PermutationMapping::from_indices(vec![2, 0, 1]).unwrap();
        let view = ShuffleView::new(vec![5, 10, 15], mapping).unwrap();
        assert_eq!(view.to_string(), "[15, 5, 10]");
        let empty = ShuffleView::shuffled(Vec::<u8>::new()).unwrap();
        assert_eq!(empty.to_string(), "[]");
    }

    #[test]
    fn restoring_a_saved_permutation_restores_the_order() {
        let mut view = seeded(vec![1, 2, 3, 4], 4);
        let saved = view.to_vec();
        let permutation = view.permutation();
        view.shuffle();
        view.set_permutation(permutation).unwrap();
        assert_eq!(view.to_vec(), saved);
    }

    #[test]
    fn saved_permutation_replays_unresolved_positions_too() {
        let mut view = seeded((0..20).collect(), 5);
        let permutation = view.permutation();
        let expected = view.to_vec();
        view.shuffle();
        view.set_permutation(permutation).unwrap();
        assert_eq!(view.to_vec(), expected);
    }

    #[test]
    fn mismatched_permutation_is_rejected() {
        let mut view = seeded(vec![1, 2, 3], 6);
        let err = view
            .set_permutation(PermutationMapping::shuffled(4).unwrap())
            .unwrap_err();
        assert!(matches!(err, ShuffleError::PreconditionViolation { .. }));
    }

    #[test]
    fn copies_are_independent() {
        let a = seeded(vec![1, 2, 3, 4, 5], 7);
        let mut b = a.clone();
        assert_eq!(a, b);
        let before = a.to_vec();
        b.shuffle();
        let reshuffled = b.to_vec();
        assert_eq!(reshuffled.len(), before.len());
        assert_eq!(a.to_vec(), before);
    }

    #[test]
    fn equality_ignores_the_underlying_permutation() {
        let mapping = PermutationMapping::from_indices(vec![1, 0, 2]).unwrap();
        let a = ShuffleView::new(vec![1, 2, 3], mapping).unwrap();
        let b = ShuffleView::unshuffled(vec![2, 1, 3]).unwrap();
        assert_eq!(a, b);
        let c = ShuffleView::unshuffled(vec![2, 1]).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn reshuffling_realizes_every_ordering() {
        let mut view = seeded(vec![1, 2, 3, 4], 8);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            view.shuffle();
            seen.insert(view.to_string());
            if seen.len() == 24 {
                break;
            }
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn lazy_shuffle_extension_wraps_slices() {
        let values = [3, 1, 2];
        let view = (&values[..]).lazy_shuffle().unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.iter().sum::<i32>(), 6);
    }

    #[test]
    fn configured_seed_is_reproducible() {
        let config = ShuffleConfig::seeded(99);
        let a = ShuffleView::with_config((0..30).collect::<Vec<i32>>(), &config).unwrap();
        let b = ShuffleView::with_config((0..30).collect::<Vec<i32>>(), &config).unwrap();
        assert_eq!(a.to_vec(), b.to_vec());
    }
}
