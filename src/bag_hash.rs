//! Jenkins one-at-a-time combining of element hashes.
//!
//! Element hashes come from a fixed-key hasher, so the combined value is the
//! same for every process built from the same toolchain.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

type FixedState = BuildHasherDefault<DefaultHasher>;

/// Folds `values` with the one-at-a-time mixing step and finalizer.
///
/// All arithmetic wraps; shifts to the right are arithmetic.
pub fn one_at_a_time<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    let mut acc: i64 = 0;
    for value in values {
        acc = acc.wrapping_add(value);
        acc = acc.wrapping_add(acc << 10);
        acc ^= acc >> 6;
    }
    acc = acc.wrapping_add(acc << 3);
    acc ^= acc >> 11;
    acc.wrapping_add(acc << 15)
}

pub fn hash_one<T: Hash + ?Sized>(value: &T) -> i64 {
    FixedState::default().hash_one(value) as i64
}

/// Combines the hashes of `items` in arrival order.
pub fn combine_hashes<I>(items: I) -> i64
where
    I: IntoIterator,
    I::Item: Hash,
{
    one_at_a_time(items.into_iter().map(|item| hash_one(&item)))
}

/// Combines the hashes of `items` independent of their order.
pub fn combine_hashes_unordered<I>(items: I) -> i64
where
    I: IntoIterator,
    I::Item: Hash,
{
    let mut hashes: Vec<i64> = items.into_iter().map(|item| hash_one(&item)).collect();
    hashes.sort_unstable();
    one_at_a_time(hashes)
}

/// Same as [`combine_hashes_unordered`] over the expansion of `(item, count)`
/// pairs, hashing each distinct item once.
pub fn combine_counted_unordered<I, T>(entries: I) -> i64
where
    I: IntoIterator<Item = (T, usize)>,
    T: Hash,
{
    let mut hashes: Vec<(i64, usize)> = entries
        .into_iter()
        .map(|(item, count)| (hash_one(&item), count))
        .collect();
    hashes.sort_unstable();
    one_at_a_time(
        hashes
            .into_iter()
            .flat_map(|(hash, count)| std::iter::repeat(hash).take(count)),
    )
}
