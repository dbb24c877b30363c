use crate::error::Result;
use crate::random::{check_addressable, draw_below, fresh_rng, Indexed};
use fxhash::FxHashSet;
use rand::rngs::StdRng;
use rand::Rng;

/// Draws every element of a source exactly once, in uniformly random order.
///
/// Positions are sampled with replacement and rejected when already emitted, so each draw
/// is cheap while most of the source is unused and slows down only for the last few
/// elements. Nothing is materialized up front.
#[derive(Debug, Clone)]
pub struct UniqueRandomGenerator<S, R = StdRng> {
    source: S,
    emitted: FxHashSet<usize>,
    rng: R,
}

impl<S: Indexed> UniqueRandomGenerator<S> {
    pub fn new(source: S) -> Result<Self> {
        Self::with_rng(source, fresh_rng())
    }
}

impl<S: Indexed, R: Rng> UniqueRandomGenerator<S, R> {
    pub fn with_rng(source: S, rng: R) -> Result<Self> {
        check_addressable(source.size())?;
        Ok(Self::resume(source, FxHashSet::default(), rng))
    }

    /// Continues a draw in which `emitted` positions are already taken.
    pub(crate) fn resume(source: S, emitted: FxHashSet<usize>, rng: R) -> Self {
        debug_assert!(emitted.iter().all(|&position| position < source.size()));
        UniqueRandomGenerator {
            source,
            emitted,
            rng,
        }
    }

    pub fn remaining(&self) -> usize {
        self.source.size() - self.emitted.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn into_rng(self) -> R {
        self.rng
    }

    fn next_position(&mut self) -> Option<usize> {
        if self.is_exhausted() {
            return None;
        }

        let size = self.source.size();
        loop {
            let candidate = draw_below(&mut self.rng, size);
            if self.emitted.insert(candidate) {
                return Some(candidate);
            }
        }
    }
}

impl<S: Indexed, R: Rng> Iterator for UniqueRandomGenerator<S, R> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let position = self.next_position()?;
        Some(self.source.fetch(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<S: Indexed, R: Rng> ExactSizeIterator for UniqueRandomGenerator<S, R> {}
