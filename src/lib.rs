//! Multisets ("bags") backed by a hash map of element counts, with
//! multiplicity-aware set algebra, occurrence indexing and an order
//! independent container hash.

pub mod bag_algebra;
pub mod bag_format;
pub mod bag_generator;
pub mod bag_hash;
pub mod bag_index;
pub mod bag_iter;
pub mod bag_multiset;
pub mod bag_parser;

pub use bag_index::{OccurrenceIndex, Position};
pub use bag_iter::{Counts, IntoIter, Iter};
pub use bag_multiset::Multiset;

/// Builds a [`Multiset`] from a literal list of elements.
///
/// ```
/// let set = bag::multiset![1, 5, 2, 2];
/// assert_eq!(set.count(&2), 2);
/// assert_eq!(set.len(), 4);
/// ```
#[macro_export]
macro_rules! multiset {
    () => {
        $crate::Multiset::new()
    };
    ($($elem:expr),+ $(,)?) => {
        $crate::Multiset::from([$($elem),+])
    };
}
