//! Shuffled views over caller-supplied storage.
//!
//! All three flavours read through the same lazily resolved [`PermutationMapping`]:
//! `view[i]` is `base[mapping(i)]`. They differ only in what the storage allows.
//!
//! [`PermutationMapping`]: crate::permutation::PermutationMapping

mod shared;

/// Read access, reshuffling, permutation save/restore, iteration, rendering and equality
/// shared by every view type.
macro_rules! shuffle_view_common {
    ($view:ident) => {
        impl<C, R> $view<C, R>
        where
            C: $crate::collection::Collection,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            pub fn len(&self) -> usize {
                self.core.len()
            }

            pub fn is_empty(&self) -> bool {
                self.core.len() == 0
            }

            /// Element at logical `index`, or `None` past the end.
            ///
            /// The first access to an index draws its storage position; later accesses are
            /// answered from the memo.
            pub fn get(&self, index: usize) -> Option<&C::Item> {
                self.core.get(index)
            }

            /// Elements in logical order. Each call starts a fresh pass.
            pub fn iter(&self) -> $crate::view::Iter<'_, C, R> {
                $crate::view::Iter::new(&self.core)
            }

            pub fn to_vec(&self) -> Vec<C::Item>
            where
                C::Item: Clone,
            {
                self.iter().cloned().collect()
            }

            /// Starts a new epoch with a fresh random mapping. Nothing is moved; every index
            /// pays first-access cost again.
            pub fn shuffle(&mut self) {
                self.core.shuffle();
            }

            /// A copy of the current mapping, including its unresolved random state.
            pub fn permutation(&self) -> $crate::permutation::PermutationMapping<R>
            where
                R: Clone,
            {
                self.core.permutation()
            }

            /// Installs a previously saved mapping. Fails if it was built for another length.
            pub fn set_permutation(
                &mut self,
                mapping: $crate::permutation::PermutationMapping<R>,
            ) -> $crate::error::Result<()> {
                self.core.set_permutation(mapping)
            }

            pub fn base(&self) -> &C {
                self.core.base()
            }

            pub fn into_inner(self) -> C {
                self.core.into_inner()
            }
        }

        impl<C, R> Clone for $view<C, R>
        where
            C: Clone,
            R: Clone + ::rand::SeedableRng,
        {
            fn clone(&self) -> Self {
                $view {
                    core: self.core.clone(),
                }
            }
        }

        impl<C, R> ::std::ops::Index<usize> for $view<C, R>
        where
            C: $crate::collection::Collection,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            type Output = C::Item;

            fn index(&self, index: usize) -> &C::Item {
                match self.core.get(index) {
                    Some(item) => item,
                    None => panic!(
                        "index out of bounds: the len is {} but the index is {}",
                        self.core.len(),
                        index
                    ),
                }
            }
        }

        impl<'a, C, R> IntoIterator for &'a $view<C, R>
        where
            C: $crate::collection::Collection,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            type Item = &'a C::Item;
            type IntoIter = $crate::view::Iter<'a, C, R>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<C, R> ::std::fmt::Display for $view<C, R>
        where
            C: $crate::collection::Collection,
            C::Item: ::std::fmt::Display,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.core.render(f)
            }
        }

        impl<C, D, R, S> PartialEq<$view<D, S>> for $view<C, R>
        where
            C: $crate::collection::Collection,
            D: $crate::collection::Collection,
            C::Item: PartialEq<D::Item>,
            R: ::rand::Rng + ::rand::SeedableRng,
            S: ::rand::Rng + ::rand::SeedableRng,
        {
            fn eq(&self, other: &$view<D, S>) -> bool {
                self.core.elements_eq(&other.core)
            }
        }

        impl<C, R> Eq for $view<C, R>
        where
            C: $crate::collection::Collection,
            C::Item: Eq,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
        }
    };
}

/// In-place element writes for views whose storage allows them.
macro_rules! shuffle_view_mut {
    ($view:ident) => {
        impl<C, R> $view<C, R>
        where
            C: $crate::collection::CollectionMut,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            pub fn get_mut(&mut self, index: usize) -> Option<&mut C::Item> {
                self.core.get_mut(index)
            }

            /// Writes `value` at logical `index` and returns the element it replaced.
            ///
            /// # Panics
            ///
            /// Panics if `index` is out of bounds.
            pub fn set(&mut self, index: usize, value: C::Item) -> C::Item {
                ::std::mem::replace(&mut self[index], value)
            }

            /// Swaps the elements at two logical positions.
            ///
            /// # Panics
            ///
            /// Panics if either position is out of bounds.
            pub fn swap(&mut self, a: usize, b: usize) {
                self.core.swap(a, b);
            }
        }

        impl<C, R> ::std::ops::IndexMut<usize> for $view<C, R>
        where
            C: $crate::collection::CollectionMut,
            R: ::rand::Rng + ::rand::SeedableRng,
        {
            fn index_mut(&mut self, index: usize) -> &mut C::Item {
                let len = self.core.len();
                match self.core.get_mut(index) {
                    Some(item) => item,
                    None => panic!(
                        "index out of bounds: the len is {} but the index is {}",
                        len, index
                    ),
                }
            }
        }
    };
}

mod mutable;
mod range_replaceable;
mod shuffle;

pub use mutable::MutableShuffleView;
pub use range_replaceable::RangeReplaceableShuffleView;
pub use shuffle::ShuffleView;

use crate::collection::Collection;
use crate::error::Result;
use rand::{Rng, SeedableRng};
use std::iter::FusedIterator;

use self::shared::ShuffleCore;

/// Iterator over a view's elements in logical order.
pub struct Iter<'a, C, R> {
    core: &'a ShuffleCore<C, R>,
    front: usize,
    back: usize,
}

impl<'a, C: Collection, R: Rng + SeedableRng> Iter<'a, C, R> {
    pub(crate) fn new(core: &'a ShuffleCore<C, R>) -> Self {
        Iter {
            core,
            front: 0,
            back: core.len(),
        }
    }
}

impl<C, R> Clone for Iter<'_, C, R> {
    fn clone(&self) -> Self {
        Iter {
            core: self.core,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, C: Collection, R: Rng + SeedableRng> Iterator for Iter<'a, C, R> {
    type Item = &'a C::Item;

    fn next(&mut self) -> Option<&'a C::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.core.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<C: Collection, R: Rng + SeedableRng> DoubleEndedIterator for Iter<'_, C, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.core.get(self.back)
    }
}

impl<C: Collection, R: Rng + SeedableRng> ExactSizeIterator for Iter<'_, C, R> {}

impl<C: Collection, R: Rng + SeedableRng> FusedIterator for Iter<'_, C, R> {}

/// `collection.lazy_shuffle()` as shorthand for [`ShuffleView::shuffled`].
pub trait LazyShuffle: Collection + Sized {
    fn lazy_shuffle(self) -> Result<ShuffleView<Self>> {
        ShuffleView::shuffled(self)
    }
}

impl<C: Collection> LazyShuffle for C {}
