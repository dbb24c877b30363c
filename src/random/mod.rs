pub mod repeating;
pub mod unique;

pub use repeating::RepeatingRandomGenerator;
pub use unique::UniqueRandomGenerator;

use crate::error::{Result, ShuffleError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Largest source a generator can draw from. Draws are made on `u32`.
pub const MAX_ADDRESSABLE: usize = u32::MAX as usize;

/// A finite source the random generators pick elements from.
pub trait Indexed {
    type Item;

    fn size(&self) -> usize;

    /// Returns the element at `position`. Callers guarantee `position < size()`.
    fn fetch(&self, position: usize) -> Self::Item;
}

impl Indexed for Range<usize> {
    type Item = usize;

    fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    fn fetch(&self, position: usize) -> usize {
        self.start + position
    }
}

impl<'a, T> Indexed for &'a [T] {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn fetch(&self, position: usize) -> &'a T {
        let slice: &'a [T] = *self;
        &slice[position]
    }
}

impl<'a, T> Indexed for &'a Vec<T> {
    type Item = &'a T;

    fn size(&self) -> usize {
        self.len()
    }

    fn fetch(&self, position: usize) -> &'a T {
        let values: &'a Vec<T> = *self;
        &values[position]
    }
}

/// A generator seeded from the thread-local RNG.
pub fn fresh_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

pub(crate) fn check_addressable(count: usize) -> Result<()> {
    if count > MAX_ADDRESSABLE {
        return Err(ShuffleError::precondition(format!(
            "source of {count} elements exceeds the addressable bound of {MAX_ADDRESSABLE}"
        )));
    }
    Ok(())
}

/// Uniform draw in `0..bound`. `bound` must be non-zero and addressable.
pub(crate) fn draw_below<R: Rng>(rng: &mut R, bound: usize) -> usize {
    rng.random_range(0..bound as u32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_fetch_relative_to_their_start() {
        let range = 5usize..9;
        assert_eq!(range.size(), 4);
        assert_eq!(range.fetch(0), 5);
        assert_eq!(range.fetch(3), 8);
    }

    #[test]
    fn oversized_sources_are_rejected() {
        assert!(check_addressable(MAX_ADDRESSABLE).is_ok());
        assert!(matches!(
            check_addressable(MAX_ADDRESSABLE + 1),
            Err(ShuffleError::PreconditionViolation { .. })
        ));
    }

    #[test]
    fn draws_stay_below_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        for bound in 1..50 {
            assert!(draw_below(&mut rng, bound) < bound);
        }
    }
}
