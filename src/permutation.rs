//! Lazily resolved logical-to-storage index mapping for one shuffle epoch.

use crate::error::{Result, ShuffleError};
use crate::random::{check_addressable, fresh_rng, UniqueRandomGenerator};
use fxhash::{FxHashMap, FxHashSet};
use rand::rngs::StdRng;
use rand::Rng;
use std::ops::Range;
use tracing::trace;

/// Maps logical positions `0..len` onto storage positions `0..len`.
///
/// A shuffled mapping resolves each logical position the first time it is queried by
/// drawing an unused storage position, and answers every later query for it from a memo.
/// Resolved positions are always a prefix of one valid permutation: no two logical
/// positions ever share a storage position.
///
/// A mapping describes one particular storage length. Installing it over storage of a
/// different length is rejected by the views.
#[derive(Debug, Clone)]
pub struct PermutationMapping<R = StdRng> {
    len: usize,
    state: MappingState<R>,
}

#[derive(Debug, Clone)]
enum MappingState<R> {
    Identity,
    Lazy {
        resolved: FxHashMap<usize, usize>,
        unused: UniqueRandomGenerator<Range<usize>, R>,
    },
}

impl PermutationMapping<StdRng> {
    /// A random mapping over `0..len`, seeded from the thread RNG.
    pub fn shuffled(len: usize) -> Result<Self> {
        Self::shuffled_with_rng(len, fresh_rng())
    }

    /// An explicit mapping where logical position `i` resolves to `indices[i]`.
    pub fn from_indices(indices: Vec<usize>) -> Result<Self> {
        Self::from_indices_with_rng(indices, fresh_rng())
    }
}

impl<R: Rng> PermutationMapping<R> {
    pub fn unshuffled(len: usize) -> Self {
        PermutationMapping {
            len,
            state: MappingState::Identity,
        }
    }

    pub fn shuffled_with_rng(len: usize, rng: R) -> Result<Self> {
        check_addressable(len)?;
        Ok(Self::lazy(len, rng))
    }

    pub fn from_indices_with_rng(indices: Vec<usize>, rng: R) -> Result<Self> {
        let len = indices.len();
        check_addressable(len)?;

        let mut resolved = FxHashMap::with_capacity_and_hasher(len, Default::default());
        let mut taken = FxHashSet::with_capacity_and_hasher(len, Default::default());
        for (logical, storage) in indices.into_iter().enumerate() {
            if storage >= len {
                return Err(ShuffleError::precondition(format!(
                    "position {storage} is outside a permutation of length {len}"
                )));
            }
            if !taken.insert(storage) {
                return Err(ShuffleError::precondition(format!(
                    "position {storage} appears more than once"
                )));
            }
            resolved.insert(logical, storage);
        }

        Ok(PermutationMapping {
            len,
            state: MappingState::Lazy {
                resolved,
                unused: UniqueRandomGenerator::resume(0..len, taken, rng),
            },
        })
    }

    /// Unchecked constructor for lengths already known to be addressable.
    pub(crate) fn lazy(len: usize, rng: R) -> Self {
        PermutationMapping {
            len,
            state: MappingState::Lazy {
                resolved: FxHashMap::default(),
                unused: UniqueRandomGenerator::resume(0..len, FxHashSet::default(), rng),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.state, MappingState::Identity)
    }

    /// Number of logical positions whose storage position is already fixed.
    pub fn resolved_count(&self) -> usize {
        match &self.state {
            MappingState::Identity => self.len,
            MappingState::Lazy { resolved, .. } => resolved.len(),
        }
    }

    /// Storage position for logical `index`, drawing and memoizing it on first use.
    pub fn resolve(&mut self, index: usize) -> Result<usize> {
        let len = self.len;
        let domain_violation = ShuffleError::IndexDomainViolation { index, len };
        if index >= len {
            return Err(domain_violation);
        }

        match &mut self.state {
            MappingState::Identity => Ok(index),
            MappingState::Lazy { resolved, unused } => {
                if let Some(&position) = resolved.get(&index) {
                    return Ok(position);
                }
                let position = unused.next().ok_or(domain_violation)?;
                trace!(index, position, "resolved logical position");
                resolved.insert(index, position);
                Ok(position)
            }
        }
    }

    /// Resolves every position and returns the full mapping in logical order.
    pub fn to_indices(&mut self) -> Result<Vec<usize>> {
        (0..self.len).map(|index| self.resolve(index)).collect()
    }

    /// Rebuilds the memo after logical `range` was replaced with `inserted` elements.
    ///
    /// The storage edit must already have happened: the first `min(range.len(), inserted)`
    /// targets were overwritten in place, the storage positions in `removed` (pre-edit
    /// numbering) were deleted, and any surplus new elements were appended to storage.
    /// Every position in `range` must have been resolved before the edit.
    pub(crate) fn reindex_after_replace(
        &mut self,
        range: Range<usize>,
        inserted: usize,
        removed: &[usize],
    ) {
        let replaced = range.len();
        let new_len = self.len - replaced + inserted;
        let state = std::mem::replace(&mut self.state, MappingState::Identity);
        self.len = new_len;

        let MappingState::Lazy { resolved, unused } = state else {
            return;
        };

        let mut removed = removed.to_vec();
        removed.sort_unstable();
        let kept = replaced.min(inserted);

        let mut rebuilt = FxHashMap::with_capacity_and_hasher(
            resolved.len() + inserted.saturating_sub(replaced),
            Default::default(),
        );
        for (logical, storage) in resolved {
            let logical = if logical < range.start + kept {
                logical
            } else if logical < range.end {
                continue;
            } else {
                logical - replaced + inserted
            };
            let shift = removed.partition_point(|&gone| gone < storage);
            rebuilt.insert(logical, storage - shift);
        }

        let appended_at = new_len - inserted.saturating_sub(replaced);
        for offset in 0..inserted.saturating_sub(replaced) {
            rebuilt.insert(range.start + replaced + offset, appended_at + offset);
        }

        let taken: FxHashSet<usize> = rebuilt.values().copied().collect();
        self.state = MappingState::Lazy {
            resolved: rebuilt,
            unused: UniqueRandomGenerator::resume(0..new_len, taken, unused.into_rng()),
        };
    }
}
