use super::shared::ShuffleCore;
use crate::collection::RangeReplaceable;
use crate::config::ShuffleConfig;
use crate::error::{Result, ShuffleError};
use crate::permutation::PermutationMapping;
use crate::random::fresh_rng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Mutable shuffled view that can also grow and shrink.
///
/// Replacing a logical range edits storage at the positions the range currently resolves
/// to, so the elements the caller named by logical position are the ones replaced. After
/// the edit, resolutions that survive are re-indexed against the new storage and every
/// other position stays lazily random.
#[derive(Debug)]
pub struct RangeReplaceableShuffleView<C, R = StdRng> {
    core: ShuffleCore<C, R>,
}

impl<C: RangeReplaceable> RangeReplaceableShuffleView<C> {
    pub fn shuffled(collection: C) -> Result<Self> {
        Self::shuffled_with_rng(collection, fresh_rng())
    }

    pub fn unshuffled(collection: C) -> Result<Self> {
        Self::unshuffled_with_rng(collection, fresh_rng())
    }

    pub fn new(collection: C, mapping: PermutationMapping) -> Result<Self> {
        Self::with_parts(collection, mapping, fresh_rng())
    }

    pub fn with_config(collection: C, config: &ShuffleConfig) -> Result<Self> {
        Self::shuffled_with_rng(collection, config.rng())
    }
}

impl<C: RangeReplaceable + Default> Default for RangeReplaceableShuffleView<C> {
    fn default() -> Self {
        RangeReplaceableShuffleView {
            core: ShuffleCore::identity(C::default(), fresh_rng()),
        }
    }
}

impl<C: RangeReplaceable, R: Rng + SeedableRng> RangeReplaceableShuffleView<C, R> {
    pub fn shuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(RangeReplaceableShuffleView {
            core: ShuffleCore::shuffled(collection, rng)?,
        })
    }

    pub fn unshuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(RangeReplaceableShuffleView {
            core: ShuffleCore::unshuffled(collection, rng)?,
        })
    }

    pub fn with_parts(collection: C, mapping: PermutationMapping<R>, rng: R) -> Result<Self> {
        Ok(RangeReplaceableShuffleView {
            core: ShuffleCore::with_mapping(collection, mapping, rng)?,
        })
    }

    /// Replaces the elements at logical positions `range` with `items` and returns the
    /// replaced elements in logical order.
    ///
    /// An empty `range` inserts; an empty `items` removes. Every position in `range` is
    /// resolved before storage is touched.
    pub fn replace_range<I>(&mut self, range: Range<usize>, items: I) -> Result<Vec<C::Item>>
    where
        I: IntoIterator<Item = C::Item>,
    {
        self.core.replace_range(range, items)
    }

    /// Appends `value` at the last logical position.
    ///
    /// Each edit on a shuffled view rebuilds the memo in O(resolved positions), so pushing
    /// one element at a time into a fully resolved view is quadratic. Prefer [`extend`].
    ///
    /// [`extend`]: Self::extend
    pub fn push(&mut self, value: C::Item) -> Result<()> {
        let end = self.len();
        self.core.replace_range(end..end, Some(value))?;
        Ok(())
    }

    /// Inserts `value` at logical `index`. Costs a memo rebuild like [`push`](Self::push).
    pub fn insert(&mut self, index: usize, value: C::Item) -> Result<()> {
        self.core.replace_range(index..index, Some(value))?;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<C::Item> {
        let len = self.len();
        let end = index.saturating_add(1);
        self.core
            .replace_range(index..end, None)?
            .pop()
            .ok_or(ShuffleError::RangeOutOfBounds {
                start: index,
                end,
                len,
            })
    }

    /// Appends all of `items` with a single memo rebuild.
    pub fn extend<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = C::Item>,
    {
        let end = self.len();
        self.core.replace_range(end..end, items)?;
        Ok(())
    }

    /// Removes every element. The view stays shuffled if it was.
    pub fn clear(&mut self) {
        self.core.clear();
    }
}

impl<C, R> RangeReplaceableShuffleView<C, R> {
    pub(crate) fn into_core(self) -> ShuffleCore<C, R> {
        self.core
    }
}

shuffle_view_common!(RangeReplaceableShuffleView);
shuffle_view_mut!(RangeReplaceableShuffleView);
