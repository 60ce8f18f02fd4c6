//! Random access into the flattened occurrence sequence of a multiset.
//!
//! [`OccurrenceIndex`] takes a snapshot of the backing entries together with
//! the running total of counts in front of each entry. A [`Position`] names an
//! entry and an offset `delta` into that entry's occurrences; positions whose
//! `delta` runs past the end of their entry carry the excess into the
//! following entries.
//!
//! Positions only make sense for the index they came from. Comparing
//! positions of two different indexes gives an unspecified (but memory safe)
//! answer.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::ops::Index;

#[derive(Debug, Clone, Copy)]
pub struct Position {
    entry: usize,
    delta: usize,
    offset: usize,
    max: usize,
}

impl Position {
    /// Ordinal of the backing entry in the snapshot.
    pub fn entry(&self) -> usize {
        self.entry
    }

    /// Occurrences of this entry before this position.
    pub fn delta(&self) -> usize {
        self.delta
    }

    /// Flat index into the occurrence sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total occurrence count of the snapshot.
    pub fn total(&self) -> usize {
        self.max
    }

    pub fn is_end(&self) -> bool {
        self.offset >= self.max
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

pub struct OccurrenceIndex<'a, T> {
    entries: Vec<(&'a T, usize)>,
    starts: Vec<usize>,
    len: usize,
}

impl<'a, T> OccurrenceIndex<'a, T> {
    pub(crate) fn new(data: &'a HashMap<T, usize>) -> Self {
        let mut entries = Vec::with_capacity(data.len());
        let mut starts = Vec::with_capacity(data.len());
        let mut len = 0;
        for (elem, &count) in data {
            starts.push(len);
            entries.push((elem, count));
            len += count;
        }
        Self { entries, starts, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    pub fn start_position(&self) -> Position {
        self.normalize(0, 0)
    }

    /// One past the last entry, with a zero delta.
    pub fn end_position(&self) -> Position {
        Position {
            entry: self.entries.len(),
            delta: 0,
            offset: self.len,
            max: self.len,
        }
    }

    /// Resolves `(entry, delta)` to the position it denotes, moving whole
    /// entries out of `delta` until it fits inside one. Anything past the last
    /// occurrence resolves to the end position.
    pub fn normalize(&self, mut entry: usize, mut delta: usize) -> Position {
        while let Some(&(_, count)) = self.entries.get(entry) {
            if delta < count {
                return Position {
                    entry,
                    delta,
                    offset: self.starts[entry] + delta,
                    max: self.len,
                };
            }
            delta -= count;
            entry += 1;
        }
        self.end_position()
    }

    pub fn position_after(&self, position: Position) -> Position {
        self.offset(position, 1)
    }

    /// The position `n` occurrences after `position`.
    pub fn offset(&self, position: Position, n: usize) -> Position {
        self.normalize(position.entry, position.delta.saturating_add(n))
    }

    /// The position of the `n`th occurrence, or the end position.
    pub fn position(&self, n: usize) -> Position {
        if n >= self.len {
            return self.end_position();
        }
        let entry = self.starts.partition_point(|&start| start <= n) - 1;
        Position {
            entry,
            delta: n - self.starts[entry],
            offset: n,
            max: self.len,
        }
    }

    /// The element at `position`, `None` for the end position.
    pub fn get(&self, position: Position) -> Option<&'a T> {
        let &(elem, count) = self.entries.get(position.entry)?;
        (position.delta < count).then_some(elem)
    }

    pub fn nth(&self, n: usize) -> Option<&'a T> {
        self.get(self.position(n))
    }

    /// Every position from the start up to, not including, the end.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let start = self.start_position();
        std::iter::successors((!start.is_end()).then_some(start), move |&p| {
            let next = self.position_after(p);
            (!next.is_end()).then_some(next)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.entries
            .iter()
            .flat_map(|&(elem, count)| std::iter::repeat(elem).take(count))
    }
}

impl<T> Index<usize> for OccurrenceIndex<'_, T> {
    type Output = T;

    fn index(&self, n: usize) -> &T {
        match self.nth(n) {
            Some(elem) => elem,
            None => panic!("occurrence {} out of range for length {}", n, self.len),
        }
    }
}

impl<T> Index<Position> for OccurrenceIndex<'_, T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        match self.get(position) {
            Some(elem) => elem,
            None => panic!("position {} is past the end", position.offset),
        }
    }
}
