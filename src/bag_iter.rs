use std::collections::{hash_map, HashMap};
use std::iter::FusedIterator;

use crate::bag_multiset::Multiset;

/// Borrowing iterator over every occurrence of a [`Multiset`].
///
/// Entries are visited in the backing map's order. Each element is yielded
/// as many times as it occurs before the next entry is read.
pub struct Iter<'a, T> {
    entries: hash_map::Iter<'a, T, usize>,
    current: Option<&'a T>,
    left: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(data: &'a HashMap<T, usize>, len: usize) -> Self {
        Self {
            entries: data.iter(),
            current: None,
            left: 0,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            current: self.current,
            left: self.left,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.left == 0 {
            let (elem, &count) = self.entries.next()?;
            self.current = Some(elem);
            self.left = count;
        }
        self.left -= 1;
        self.remaining -= 1;
        self.current
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over every occurrence. Elements that occur more than once
/// are cloned for all but their last occurrence.
pub struct IntoIter<T> {
    entries: hash_map::IntoIter<T, usize>,
    current: Option<T>,
    left: usize,
    remaining: usize,
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.left == 0 {
            let (elem, count) = self.entries.next()?;
            self.current = Some(elem);
            self.left = count;
        }
        self.left -= 1;
        self.remaining -= 1;
        if self.left == 0 {
            self.current.take()
        } else {
            self.current.clone()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {}

impl<T: Clone> FusedIterator for IntoIter<T> {}

/// Distinct elements with their counts.
pub struct Counts<'a, T> {
    entries: hash_map::Iter<'a, T, usize>,
}

impl<'a, T> Counts<'a, T> {
    pub(crate) fn new(data: &'a HashMap<T, usize>) -> Self {
        Self {
            entries: data.iter(),
        }
    }
}

impl<'a, T> Iterator for Counts<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(elem, &count)| (elem, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> ExactSizeIterator for Counts<'_, T> {}

impl<'a, T> IntoIterator for &'a Multiset<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for Multiset<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            entries: self.data.into_iter(),
            current: None,
            left: 0,
            remaining: self.len,
        }
    }
}
