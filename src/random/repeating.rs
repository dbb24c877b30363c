use crate::error::{Result, ShuffleError};
use crate::random::{check_addressable, draw_below, fresh_rng, Indexed};
use rand::rngs::StdRng;
use rand::Rng;

/// Endless stream of independent, uniformly random picks from a source.
#[derive(Debug, Clone)]
pub struct RepeatingRandomGenerator<S, R = StdRng> {
    source: S,
    rng: R,
}

impl<S: Indexed> RepeatingRandomGenerator<S> {
    pub fn new(source: S) -> Result<Self> {
        Self::with_rng(source, fresh_rng())
    }
}

impl<S: Indexed, R: Rng> RepeatingRandomGenerator<S, R> {
    pub fn with_rng(source: S, rng: R) -> Result<Self> {
        check_addressable(source.size())?;
        if source.size() == 0 {
            return Err(ShuffleError::precondition(
                "cannot draw repeatedly from an empty source",
            ));
        }
        Ok(RepeatingRandomGenerator { source, rng })
    }
}

impl<S: Indexed, R: Rng> Iterator for RepeatingRandomGenerator<S, R> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let position = draw_below(&mut self.rng, self.source.size());
        Some(self.source.fetch(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
