//! Lazily shuffled views over indexable collections.
//!
//! Instead of moving elements, a view answers `view[i]` with `base[p(i)]` where `p` is a
//! random permutation drawn one position at a time and memoized. Reshuffling is O(1) and
//! the first access to each index pays for its draw.

pub mod collection;
pub mod config;
pub mod error;
pub mod permutation;
pub mod random;
pub mod view;

pub use collection::{Collection, CollectionMut, RangeReplaceable};
pub use config::ShuffleConfig;
pub use error::{Result, ShuffleError};
pub use permutation::PermutationMapping;
pub use random::{
	fresh_rng,
	Indexed,
	RepeatingRandomGenerator,
	UniqueRandomGenerator,
	MAX_ADDRESSABLE,
};
pub use view::{Iter, LazyShuffle, MutableShuffleView, RangeReplaceableShuffleView, ShuffleView};
