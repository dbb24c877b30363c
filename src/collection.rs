//! Capability traits for the storage a shuffle view wraps.
//!
//! Positions are plain `usize` offsets. A view only needs [`Collection`]; the mutable view
//! additionally needs [`CollectionMut`] and the range-replaceable view [`RangeReplaceable`].

use std::collections::VecDeque;
use std::ops::Range;

/// Finite, countable storage indexed by offset.
pub trait Collection {
    type Item;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage whose elements can be overwritten in place. Never changes the length.
pub trait CollectionMut: Collection {
    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// Swaps two elements. Panics if either position is out of bounds.
    fn swap(&mut self, a: usize, b: usize);
}

/// Storage that can replace a contiguous run with a run of any length.
pub trait RangeReplaceable: CollectionMut {
    /// Replaces `range` with `items` and returns the elements that were removed, in order.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within `0..=len`.
    fn replace_range<I>(&mut self, range: Range<usize>, items: I) -> Vec<Self::Item>
    where
        I: IntoIterator<Item = Self::Item>;
}

impl<T> Collection for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T> CollectionMut for Vec<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<T> RangeReplaceable for Vec<T> {
    fn replace_range<I>(&mut self, range: Range<usize>, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        self.splice(range, items).collect()
    }
}

impl<T> Collection for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }
}

impl<T> CollectionMut for VecDeque<T> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        VecDeque::get_mut(self, index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b);
    }
}

impl<T> RangeReplaceable for VecDeque<T> {
    fn replace_range<I>(&mut self, range: Range<usize>, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let tail = self.split_off(range.end);
        let removed = self.drain(range.start..).collect();
        self.extend(items);
        self.extend(tail);
        removed
    }
}

impl<T> Collection for Box<[T]> {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}

impl<T> CollectionMut for Box<[T]> {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        <[T]>::get_mut(self, index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }
}

impl<T, const N: usize> CollectionMut for [T; N] {
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<T> Collection for &[T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        <[T]>::get(self, index)
    }
}
