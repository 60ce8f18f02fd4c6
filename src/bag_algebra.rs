//! Multiplicity-aware set algebra.
//!
//! Every operation reads its operands and returns a freshly built multiset.
//! The `form_*` methods and compound assignment operators compute the result
//! the same way and then replace the receiver with it.

use std::hash::Hash;
use std::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitXor, BitXorAssign, Sub, SubAssign};

use log::trace;

use crate::bag_multiset::Multiset;

impl<T: Eq + Hash + Clone> Multiset<T> {
    /// Occurrences of both sides: `a + b` for every element.
    pub fn union(&self, other: &Self) -> Self {
        let mut ret = self.clone();
        ret.form_union(other);
        ret
    }

    /// Shared occurrences: `min(a, b)` for every element.
    pub fn intersection(&self, other: &Self) -> Self {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        let ret = Self::from_counts(
            small
                .counts()
                .map(|(elem, count)| (elem.clone(), count.min(large.count(elem)))),
        );
        trace!("intersection: {} & {} -> {}", self.len(), other.len(), ret.len());
        ret
    }

    /// What is left of `self` after removing up to `other`'s count of each
    /// element: `max(a - b, 0)`.
    pub fn complement(&self, other: &Self) -> Self {
        let ret = Self::from_counts(
            self.counts()
                .map(|(elem, count)| (elem.clone(), count.saturating_sub(other.count(elem)))),
        );
        trace!("complement: {} - {} -> {}", self.len(), other.len(), ret.len());
        ret
    }

    /// The excess of each side over the other, `|a - b|` for every element.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut ret = other.complement(self);
        ret.absorb(self.complement(other));
        trace!("symmetric_difference: {} ^ {} -> {}", self.len(), other.len(), ret.len());
        ret
    }

    pub fn form_union(&mut self, other: &Self) {
        let before = self.len();
        self.data.reserve(other.distinct_len());
        for (elem, count) in other.counts() {
            self.insert_many(elem.clone(), count);
        }
        trace!("union: {} + {} -> {}", before, other.len(), self.len());
    }

    pub fn form_intersection(&mut self, other: &Self) {
        *self = self.intersection(other);
    }

    pub fn form_complement(&mut self, other: &Self) {
        *self = self.complement(other);
    }

    pub fn form_symmetric_difference(&mut self, other: &Self) {
        *self = self.symmetric_difference(other);
    }

    /// Keeps the occurrences for which `keep` holds.
    pub fn filter<F: FnMut(&T) -> bool>(&self, mut keep: F) -> Self {
        self.iter().filter(|elem| keep(*elem)).cloned().collect()
    }
}

impl<T: Eq + Hash> Multiset<T> {
    /// True when every element occurs in `other` at least as often as in `self`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.counts().all(|(elem, count)| count <= other.count(elem))
    }

    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && self != other
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_strict_superset(&self, other: &Self) -> bool {
        other.is_strict_subset(self)
    }

    /// Applies `f` once per occurrence. Images that collide add up.
    pub fn map<U, F>(&self, mut f: F) -> Multiset<U>
    where
        U: Eq + Hash,
        F: FnMut(&T) -> U,
    {
        let mut ret = Multiset::with_capacity(self.distinct_len());
        for (elem, count) in self.counts() {
            for _ in 0..count {
                ret.insert(f(elem));
            }
        }
        ret
    }

    /// Replaces every occurrence with the elements `f` produces for it.
    pub fn flat_map<U, I, F>(&self, mut f: F) -> Multiset<U>
    where
        U: Eq + Hash,
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        self.iter().flat_map(|elem| f(elem)).collect()
    }

    pub fn fold<B, F: FnMut(B, &T) -> B>(&self, init: B, f: F) -> B {
        self.iter().fold(init, f)
    }

    /// Moves every occurrence of `other` into `self`.
    pub(crate) fn absorb(&mut self, other: Self) {
        for (elem, count) in other.data {
            self.insert_many(elem, count);
        }
    }
}

impl<T: Eq + Hash + Clone> Add<&Multiset<T>> for &Multiset<T> {
    type Output = Multiset<T>;

    fn add(self, rhs: &Multiset<T>) -> Multiset<T> {
        self.union(rhs)
    }
}

impl<T: Eq + Hash> Add for Multiset<T> {
    type Output = Multiset<T>;

    fn add(mut self, rhs: Multiset<T>) -> Multiset<T> {
        if self.distinct_len() < rhs.distinct_len() {
            let mut rhs = rhs;
            rhs.absorb(self);
            return rhs;
        }
        self.absorb(rhs);
        self
    }
}

impl<T: Eq + Hash + Clone> Sub<&Multiset<T>> for &Multiset<T> {
    type Output = Multiset<T>;

    fn sub(self, rhs: &Multiset<T>) -> Multiset<T> {
        self.complement(rhs)
    }
}

impl<T: Eq + Hash> Sub for Multiset<T> {
    type Output = Multiset<T>;

    fn sub(mut self, rhs: Multiset<T>) -> Multiset<T> {
        for (elem, count) in rhs.counts() {
            self.remove_many(elem, count);
        }
        self
    }
}

impl<T: Eq + Hash + Clone> BitAnd<&Multiset<T>> for &Multiset<T> {
    type Output = Multiset<T>;

    fn bitand(self, rhs: &Multiset<T>) -> Multiset<T> {
        self.intersection(rhs)
    }
}

impl<T: Eq + Hash + Clone> BitAnd for Multiset<T> {
    type Output = Multiset<T>;

    fn bitand(self, rhs: Multiset<T>) -> Multiset<T> {
        self.intersection(&rhs)
    }
}

impl<T: Eq + Hash + Clone> BitXor<&Multiset<T>> for &Multiset<T> {
    type Output = Multiset<T>;

    fn bitxor(self, rhs: &Multiset<T>) -> Multiset<T> {
        self.symmetric_difference(rhs)
    }
}

impl<T: Eq + Hash + Clone> BitXor for Multiset<T> {
    type Output = Multiset<T>;

    fn bitxor(self, rhs: Multiset<T>) -> Multiset<T> {
        self.symmetric_difference(&rhs)
    }
}

impl<T: Eq + Hash + Clone> AddAssign<&Multiset<T>> for Multiset<T> {
    fn add_assign(&mut self, rhs: &Multiset<T>) {
        self.form_union(rhs);
    }
}

impl<T: Eq + Hash> AddAssign for Multiset<T> {
    fn add_assign(&mut self, rhs: Multiset<T>) {
        self.absorb(rhs);
    }
}

impl<T: Eq + Hash + Clone> SubAssign<&Multiset<T>> for Multiset<T> {
    fn sub_assign(&mut self, rhs: &Multiset<T>) {
        self.form_complement(rhs);
    }
}

impl<T: Eq + Hash + Clone> BitAndAssign<&Multiset<T>> for Multiset<T> {
    fn bitand_assign(&mut self, rhs: &Multiset<T>) {
        self.form_intersection(rhs);
    }
}

impl<T: Eq + Hash + Clone> BitXorAssign<&Multiset<T>> for Multiset<T> {
    fn bitxor_assign(&mut self, rhs: &Multiset<T>) {
        self.form_symmetric_difference(rhs);
    }
}

#[cfg(test)]
mod tests {
    use crate::multiset;
    use crate::Multiset;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn complement_saturates() {
        init();
        let left = multiset![1, 1, 2];
        let right = multiset![1];
        let diff = left.complement(&right);
        assert_eq!(diff.count(&1), 1);
        assert_eq!(diff.count(&2), 1);
        assert_eq!(diff.len(), 2);

        let reverse = right.complement(&left);
        assert!(reverse.is_empty());
        assert_ne!(diff, reverse);
    }

    #[test]
    fn intersection_takes_minimum() {
        init();
        let left = multiset![1, 1, 2];
        let right = multiset![1, 2, 2];
        let shared = left.intersection(&right);
        assert_eq!(shared.count(&1), 1);
        assert_eq!(shared.count(&2), 1);
        assert_eq!(shared, right.intersection(&left));

        let disjoint = left.intersection(&multiset![7, 8]);
        assert!(disjoint.is_empty());
        assert_eq!(disjoint.distinct_len(), 0);
    }

    #[test]
    fn union_adds_counts() {
        init();
        let left = multiset!['a', 'b'];
        let right = multiset!['b', 'c', 'c'];
        let both = left.union(&right);
        assert_eq!(both.len(), left.len() + right.len());
        assert_eq!(both.count(&'b'), 2);
        assert_eq!(both.count(&'c'), 2);
        assert_eq!(both, right.union(&left));
    }

    #[test]
    fn self_union_doubles() {
        let set = multiset![4, 4, 5];
        let doubled = set.union(&set);
        assert_ne!(doubled, set);
        assert_eq!(doubled.count(&4), 4);
        assert_eq!(doubled.count(&5), 2);
        assert_eq!(doubled.distinct_len(), set.distinct_len());
    }

    #[test]
    fn symmetric_difference_keeps_excess() {
        init();
        let left = multiset![1, 1, 1, 2, 3];
        let right = multiset![1, 2, 2, 4];
        let excess = left.symmetric_difference(&right);
        assert_eq!(excess, Multiset::from_counts([(1, 2), (2, 1), (3, 1), (4, 1)]));
        assert_eq!(excess, right.symmetric_difference(&left));
        assert!(left.symmetric_difference(&left).is_empty());
    }

    #[test]
    fn subset_predicates() {
        let small = multiset![1, 2];
        let large = multiset![1, 1, 2, 3];
        assert!(small.is_subset(&large));
        assert!(small.is_strict_subset(&large));
        assert!(large.is_superset(&small));
        assert!(large.is_strict_superset(&small));
        assert!(!large.is_subset(&small));

        assert!(small.is_subset(&small));
        assert!(!small.is_strict_subset(&small));
        assert!(small.is_superset(&small));
        assert!(!small.is_strict_superset(&small));

        let more_twos = multiset![2, 2];
        assert!(!more_twos.is_subset(&large));
        assert!(Multiset::<i32>::new().is_subset(&small));
    }

    #[test]
    fn operators_match_methods() {
        let a = multiset![1, 1, 2, 3];
        let b = multiset![1, 3, 3, 4];
        assert_eq!(&a + &b, a.union(&b));
        assert_eq!(&a - &b, a.complement(&b));
        assert_eq!(&a & &b, a.intersection(&b));
        assert_eq!(&a ^ &b, a.symmetric_difference(&b));

        assert_eq!(a.clone() + b.clone(), a.union(&b));
        assert_eq!(a.clone() - b.clone(), a.complement(&b));
        assert_eq!(a.clone() & b.clone(), a.intersection(&b));
        assert_eq!(a.clone() ^ b.clone(), a.symmetric_difference(&b));
    }

    #[test]
    fn compound_assignment() {
        let a = multiset![1, 1, 2, 3];
        let b = multiset![1, 3, 3, 4];

        let mut c = a.clone();
        c += &b;
        assert_eq!(c, a.union(&b));
        let mut c = a.clone();
        c += b.clone();
        assert_eq!(c, a.union(&b));
        let mut c = a.clone();
        c -= &b;
        assert_eq!(c, multiset![1, 2]);
        let mut c = a.clone();
        c &= &b;
        assert_eq!(c, multiset![1, 3]);
        let mut c = a.clone();
        c ^= &b;
        assert_eq!(c, multiset![1, 2, 3, 4]);
    }

    #[test]
    fn in_place_forms_leave_operand_untouched() {
        let b = multiset!["x", "y"];
        let snapshot = b.clone();
        let mut a = multiset!["x", "x", "z"];
        a.form_complement(&b);
        assert_eq!(a, multiset!["x", "z"]);
        a.form_intersection(&b);
        assert_eq!(a, multiset!["x"]);
        a.form_union(&b);
        assert_eq!(a, multiset!["x", "x", "y"]);
        a.form_symmetric_difference(&b);
        assert_eq!(a, multiset!["x"]);
        assert_eq!(b, snapshot);
    }

    #[test]
    fn fold_sums_every_occurrence() {
        let set = multiset![1, 1, 1, 2, 2, 3];
        assert_eq!(set.fold(0, |acc, x| acc + x), 10);
        assert_eq!(set.fold(0, |acc, _| acc + 1), set.len());
    }

    #[test]
    fn filter_by_occurrence() {
        let set = multiset![1, 2, 2, 3, 3, 3];
        assert_eq!(set.filter(|_| true), set);
        assert!(set.filter(|_| false).is_empty());
        let odd = set.filter(|x| x % 2 == 1);
        assert_eq!(odd, multiset![1, 3, 3, 3]);
    }

    #[test]
    fn map_merges_colliding_images() {
        let set = multiset![1, 2, 2, 3];
        let parity = set.map(|x| x % 2);
        assert_eq!(parity.count(&1), 2);
        assert_eq!(parity.count(&0), 2);
        assert_eq!(parity.len(), set.len());
        let words = set.map(|x| x.to_string());
        assert_eq!(words.count("2"), 2);
    }

    #[test]
    fn flat_map_generalizes_map_and_filter() {
        let set = multiset![1, 2, 2];
        let expanded = set.flat_map(|&x| vec![x; x as usize]);
        assert_eq!(expanded, Multiset::from_counts([(1, 1), (2, 4)]));
        assert_eq!(set.flat_map(|&x| Some(x * 10)), set.map(|x| x * 10));
        assert_eq!(
            set.flat_map(|&x| (x > 1).then_some(x)),
            set.filter(|&x| x > 1)
        );
    }
}
