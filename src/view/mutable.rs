use super::shared::ShuffleCore;
use super::RangeReplaceableShuffleView;
use crate::collection::{CollectionMut, RangeReplaceable};
use crate::config::ShuffleConfig;
use crate::error::Result;
use crate::permutation::PermutationMapping;
use crate::random::fresh_rng;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shuffled view that writes through to the storage position behind each logical index.
#[derive(Debug)]
pub struct MutableShuffleView<C, R = StdRng> {
    core: ShuffleCore<C, R>,
}

impl<C: CollectionMut> MutableShuffleView<C> {
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

impl<C: CollectionMut, R: Rng + SeedableRng> MutableShuffleView<C, R> {
    pub fn shuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(MutableShuffleView {
            core: ShuffleCore::shuffled(collection, rng)?,
        })
    }

    pub fn unshuffled_with_rng(collection: C, rng: R) -> Result<Self> {
        Ok(MutableShuffleView {
            core: ShuffleCore::unshuffled(collection, rng)?,
        })
    }

    pub fn with_parts(collection: C, mapping: PermutationMapping<R>, rng: R) -> Result<Self> {
        Ok(MutableShuffleView {
            core: ShuffleCore::with_mapping(collection, mapping, rng)?,
        })
    }
}

impl<C, R> MutableShuffleView<C, R> {
    pub(crate) fn into_core(self) -> ShuffleCore<C, R> {
        self.core
    }
}

shuffle_view_common!(MutableShuffleView);
shuffle_view_mut!(MutableShuffleView);

impl<C, R> From<RangeReplaceableShuffleView<C, R>> for MutableShuffleView<C, R>
where
    C: RangeReplaceable,
    R: Rng + SeedableRng,
{
    fn from(view: RangeReplaceableShuffleView<C, R>) -> Self {
        MutableShuffleView {
            core: view.into_core(),
        }
    }
}
