use crate::collection::{Collection, CollectionMut, RangeReplaceable};
use crate::error::{Result, ShuffleError};
use crate::permutation::PermutationMapping;
use crate::random::check_addressable;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::cmp::Reverse;
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// State shared by every view flavour: the storage, the current epoch's mapping, and the
/// RNG each new epoch is forked from.
///
/// The mapping sits in a `RefCell` so reads can memoize through `&self`. This makes views
/// `!Sync`; clone a view to hand it to another thread.
#[derive(Debug)]
pub(crate) struct ShuffleCore<C, R> {
    base: C,
    mapping: RefCell<PermutationMapping<R>>,
    rng: R,
}

/// A clone keeps the current order but reshuffles from its own freshly seeded root RNG.
impl<C: Clone, R: Clone + SeedableRng> Clone for ShuffleCore<C, R> {
    fn clone(&self) -> Self {
        ShuffleCore {
            base: self.base.clone(),
            mapping: self.mapping.clone(),
            rng: R::from_rng(&mut rand::rng()),
        }
    }
}

impl<C: Collection, R: Rng + SeedableRng> ShuffleCore<C, R> {
    pub(crate) fn shuffled(base: C, mut rng: R) -> Result<Self> {
        check_addressable(base.len())?;
        let mapping = PermutationMapping::lazy(base.len(), R::from_rng(&mut rng));
        Ok(Self::assemble(base, mapping, rng))
    }

    pub(crate) fn unshuffled(base: C, rng: R) -> Result<Self> {
        check_addressable(base.len())?;
        let mapping = PermutationMapping::unshuffled(base.len());
        Ok(Self::assemble(base, mapping, rng))
    }

    pub(crate) fn with_mapping(base: C, mapping: PermutationMapping<R>, rng: R) -> Result<Self> {
        check_addressable(base.len())?;
        check_fits(&base, &mapping)?;
        Ok(Self::assemble(base, mapping, rng))
    }

    /// Unshuffled core without the size check, for storage known to be tiny.
    pub(crate) fn identity(base: C, rng: R) -> Self {
        let mapping = PermutationMapping::unshuffled(base.len());
        Self::assemble(base, mapping, rng)
    }

    fn assemble(base: C, mapping: PermutationMapping<R>, rng: R) -> Self {
        ShuffleCore {
            base,
            mapping: RefCell::new(mapping),
            rng,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.base.len()
    }

    pub(crate) fn base(&self) -> &C {
        &self.base
    }

    pub(crate) fn into_inner(self) -> C {
        self.base
    }

    /// Storage position behind logical `index`. Callers bounds-check first.
    fn storage_position(&self, index: usize) -> usize {
        match self.mapping.borrow_mut().resolve(index) {
            Ok(position) => position,
            Err(err) => panic!("shuffle view out of sync with its storage: {err}"),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&C::Item> {
        if index >= self.len() {
            return None;
        }
        self.base.get(self.storage_position(index))
    }

    pub(crate) fn shuffle(&mut self) {
        let len = self.len();
        *self.mapping.get_mut() = PermutationMapping::lazy(len, R::from_rng(&mut self.rng));
        debug!(len, "reshuffled view");
    }

    pub(crate) fn permutation(&self) -> PermutationMapping<R>
    where
        R: Clone,
    {
        self.mapping.borrow().clone()
    }

    pub(crate) fn set_permutation(&mut self, mapping: PermutationMapping<R>) -> Result<()> {
        check_fits(&self.base, &mapping)?;
        debug!(
            len = mapping.len(),
            resolved = mapping.resolved_count(),
            "restored permutation"
        );
        *self.mapping.get_mut() = mapping;
        Ok(())
    }

    pub(crate) fn elements_eq<D, S>(&self, other: &ShuffleCore<D, S>) -> bool
    where
        D: Collection,
        S: Rng + SeedableRng,
        C::Item: PartialEq<D::Item>,
    {
        self.len() == other.len()
            && (0..self.len()).all(|index| match (self.get(index), other.get(index)) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => false,
            })
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        C::Item: fmt::Display,
    {
        write!(f, "[")?;
        for index in 0..self.len() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if let Some(item) = self.get(index) {
                write!(f, "{item}")?;
            }
        }
        write!(f, "]")
    }
}

impl<C: CollectionMut, R: Rng + SeedableRng> ShuffleCore<C, R> {
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        if index >= self.len() {
            return None;
        }
        let position = self.storage_position(index);
        self.base.get_mut(position)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        let len = self.len();
        assert!(
            a < len && b < len,
            "swap positions {a} and {b} out of bounds for length {len}"
        );
        let (a, b) = (self.storage_position(a), self.storage_position(b));
        self.base.swap(a, b);
    }
}

impl<C: RangeReplaceable, R: Rng + SeedableRng> ShuffleCore<C, R> {
    /// Replaces logical `range` with `items` and returns the replaced elements in logical
    /// order.
    ///
    /// The overlapping prefix is written to the storage positions the range resolves to.
    /// Surplus old positions are removed from storage; surplus new elements are appended
    /// to storage and appear right after the overlap. The mapping is then rebuilt over the
    /// new storage from the resolutions that survived the edit.
    pub(crate) fn replace_range<I>(
        &mut self,
        range: Range<usize>,
        items: I,
    ) -> Result<Vec<C::Item>>
    where
        I: IntoIterator<Item = C::Item>,
    {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(ShuffleError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }

        let mut incoming: Vec<C::Item> = items.into_iter().collect();
        let inserted = incoming.len();
        check_addressable(len - range.len() + inserted)?;

        let mapping = self.mapping.get_mut();
        if mapping.is_identity() {
            let removed = self.base.replace_range(range.clone(), incoming);
            mapping.reindex_after_replace(range.clone(), inserted, &[]);
            debug!(
                start = range.start,
                end = range.end,
                inserted,
                len = self.base.len(),
                "replaced unshuffled range"
            );
            return Ok(removed);
        }

        let targets = range
            .clone()
            .map(|index| mapping.resolve(index))
            .collect::<Result<Vec<usize>>>()?;
        let kept = targets.len().min(inserted);
        let surplus = incoming.split_off(kept);

        // Storage is untouched until every target is known to be writable.
        if let Some(&position) = targets
            .iter()
            .find(|&&position| self.base.get(position).is_none())
        {
            return Err(ShuffleError::IndexDomainViolation { index: position, len });
        }

        let mut removed = Vec::with_capacity(targets.len());
        for (&position, item) in targets.iter().zip(incoming) {
            match self.base.get_mut(position) {
                Some(slot) => removed.push(std::mem::replace(slot, item)),
                None => panic!("storage position {position} vanished during replacement"),
            }
        }

        // Delete from the highest storage position down so pending positions stay valid.
        let doomed = &targets[kept..];
        let mut order: Vec<usize> = (0..doomed.len()).collect();
        order.sort_unstable_by_key(|&slot| Reverse(doomed[slot]));
        let mut extracted: Vec<Option<C::Item>> = doomed.iter().map(|_| None).collect();
        for slot in order {
            let position = doomed[slot];
            extracted[slot] = self
                .base
                .replace_range(position..position + 1, std::iter::empty())
                .pop();
        }
        removed.extend(extracted.into_iter().flatten());

        if !surplus.is_empty() {
            let end = self.base.len();
            self.base.replace_range(end..end, surplus);
        }

        mapping.reindex_after_replace(range.clone(), inserted, doomed);
        debug!(
            start = range.start,
            end = range.end,
            inserted,
            len = self.base.len(),
            "replaced shuffled range"
        );
        Ok(removed)
    }

    pub(crate) fn clear(&mut self) {
        let len = self.len();
        self.base.replace_range(0..len, std::iter::empty());
        let mapping = self.mapping.get_mut();
        *mapping = if mapping.is_identity() {
            PermutationMapping::unshuffled(0)
        } else {
            PermutationMapping::lazy(0, R::from_rng(&mut self.rng))
        };
    }
}

fn check_fits<C: Collection, R: Rng>(base: &C, mapping: &PermutationMapping<R>) -> Result<()> {
    if mapping.len() != base.len() {
        return Err(ShuffleError::precondition(format!(
            "permutation of length {} does not fit a view of length {}",
            mapping.len(),
            base.len()
        )));
    }
    Ok(())
}
