use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::bag_format;
use crate::bag_hash;
use crate::bag_index::OccurrenceIndex;
use crate::bag_iter::{Counts, Iter};

/// A bag of values: each distinct element is stored once, next to the number
/// of times it occurs.
///
/// Counts are always positive. Dropping an element's count to zero removes its
/// entry, so two multisets with the same occurrences compare equal no matter
/// how they were built.
#[derive(Clone)]
pub struct Multiset<T> {
    pub(crate) data: HashMap<T, usize>,
    pub(crate) len: usize,
}

impl<T> Multiset<T> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            len: 0,
        }
    }

    /// Capacity is a hint for the number of distinct elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
            len: 0,
        }
    }

    /// Total number of occurrences.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct elements.
    pub fn distinct_len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Drops every element. With `keep_capacity` the allocation is reused.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        if keep_capacity {
            self.data.clear();
        } else {
            self.data = HashMap::new();
        }
        self.len = 0;
    }

    pub fn clear(&mut self) {
        self.remove_all(true);
    }

    /// Every occurrence, each element repeated as many times as it occurs.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.data, self.len)
    }

    /// Distinct elements paired with their counts.
    pub fn counts(&self) -> Counts<'_, T> {
        Counts::new(&self.data)
    }

    pub fn distinct(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.keys()
    }

    /// Snapshot of the flattened occurrence sequence, addressable by position.
    pub fn occurrences(&self) -> OccurrenceIndex<'_, T> {
        OccurrenceIndex::new(&self.data)
    }
}

impl<T: Eq + Hash> Multiset<T> {
    /// Builds a multiset from `(element, count)` pairs. Zero counts are skipped
    /// and repeated elements accumulate.
    ///
    /// # Panics
    ///
    /// Panics if the counts add up to more than `usize::MAX`.
    pub fn from_counts<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {
        let mut ret = Self::new();
        for (elem, count) in iter {
            ret.insert_many(elem, count);
        }
        ret
    }

    /// Like [`Multiset::from_counts`], but pairs with a count `<= 0` are dropped.
    pub fn from_signed_counts<I: IntoIterator<Item = (T, isize)>>(iter: I) -> Self {
        Self::from_counts(
            iter.into_iter()
                .filter_map(|(elem, count)| usize::try_from(count).ok().map(|count| (elem, count))),
        )
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.contains_key(value)
    }

    /// Number of occurrences of `value`, zero if absent.
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.get(value).copied().unwrap_or(0)
    }

    /// Adds one occurrence. Returns `true` if `value` was not a member before.
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_many(value, 1) == 0
    }

    /// Adds `n` occurrences at once and returns the previous count.
    ///
    /// # Panics
    ///
    /// Panics if the total number of occurrences would exceed `usize::MAX`.
    /// The multiset is left unchanged in that case.
    pub fn insert_many(&mut self, value: T, n: usize) -> usize {
        if n == 0 {
            return self.count(&value);
        }
        // Every count is bounded by the total, so checking the total covers both.
        self.len = match self.len.checked_add(n) {
            Some(len) => len,
            None => panic!("multiset occurrence count overflow"),
        };
        match self.data.entry(value) {
            Entry::Occupied(mut entry) => {
                let previous = *entry.get();
                *entry.get_mut() += n;
                previous
            }
            Entry::Vacant(entry) => {
                entry.insert(n);
                0
            }
        }
    }

    pub fn append(&mut self, value: T) {
        self.insert(value);
    }

    /// Removes one occurrence. Returns `false` if `value` was absent.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_many(value, 1) == 1
    }

    /// Removes up to `n` occurrences and returns how many were removed.
    pub fn remove_many<Q>(&mut self, value: &Q, n: usize) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(count) = self.data.get_mut(value) else {
            return 0;
        };
        let removed = if *count > n {
            *count -= n;
            n
        } else {
            let removed = *count;
            self.data.remove(value);
            removed
        };
        self.len -= removed;
        removed
    }

    /// Removes the whole entry for `value` and returns its previous count.
    pub fn remove_every<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.data.remove(value).unwrap_or(0);
        self.len -= removed;
        removed
    }

    /// Removes one occurrence and hands it back.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Clone,
        Q: Hash + Eq + ?Sized,
    {
        let count = *self.data.get(value)?;
        self.len -= 1;
        if count == 1 {
            return self.data.remove_entry(value).map(|(key, _)| key);
        }
        let key = self.data.get_key_value(value).map(|(key, _)| key.clone());
        if let Some(count) = self.data.get_mut(value) {
            *count -= 1;
        }
        key
    }

    /// Keeps only the entries for which `keep(element, count)` holds.
    pub fn retain<F: FnMut(&T, usize) -> bool>(&mut self, mut keep: F) {
        self.data.retain(|elem, count| keep(elem, *count));
        self.len = self.data.values().sum();
    }
}

impl<T> Default for Multiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.data == other.data
    }
}

impl<T: Eq + Hash> Eq for Multiset<T> {}

impl<T: Hash> Hash for Multiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i64(bag_hash::combine_counted_unordered(self.counts()));
    }
}

impl<T: Eq + Hash> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for Multiset<T> {
    fn from(elems: [T; N]) -> Self {
        Self::from_iter(elems)
    }
}

impl<T: Eq + Hash> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<'a, T: Eq + Hash + Copy + 'a> Extend<&'a T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Display> fmt::Display for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bag_format::fmt_set_literal(f, self.iter(), |elem, f| fmt::Display::fmt(elem, f))
    }
}

impl<T: fmt::Debug> fmt::Debug for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bag_format::fmt_set_literal(f, self.iter(), |elem, f| fmt::Debug::fmt(elem, f))
    }
}
