//! One-pass builders that fold a sequence into an owned [`MapSet`].

use std::collections::hash_map::Entry;
use std::hash::Hash;

use super::OwnedMapSet;
use crate::hash::temporary_map;

#[inline]
fn empty<K, V>() -> OwnedMapSet<K, V> {
    OwnedMapSet::new(temporary_map())
}

/// Collects the distinct keys, each mapped to a copy of `value`.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::collect;
///
/// let flags = collect(["a", "b", "a"], true);
/// assert_eq!(flags.len(), 2);
/// assert_eq!(flags.get("a"), Some(&true));
/// ```
pub fn collect<I, V>(keys: I, value: V) -> OwnedMapSet<I::Item, V>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
    V: Clone,
{
    let mut result = empty();
    result.insert(keys, value);
    result
}

/// Collects the distinct keys with unit values.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::set;
///
/// let letters = set(["b", "a", "b"]);
/// assert_eq!(letters.len(), 2);
/// assert!(letters.contains(["a", "b"]));
/// ```
pub fn set<I>(keys: I) -> OwnedMapSet<I::Item, ()>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    collect(keys, ())
}

/// Maps each distinct key to the position where it first occurs.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::index;
///
/// let positions = index(["b", "a", "b"]);
/// assert_eq!(positions.get("b"), Some(&0));
/// assert_eq!(positions.get("a"), Some(&1));
/// ```
pub fn index<I>(keys: I) -> OwnedMapSet<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut result = empty();
    let map = result.as_map_mut();
    for (position, key) in keys.into_iter().enumerate() {
        map.entry(key).or_insert(position);
    }
    result
}

/// Maps each distinct key to the number of times it occurs.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::count;
///
/// let counts = count(["b", "a", "b"]);
/// assert_eq!(counts.get("b"), Some(&2));
/// assert_eq!(counts.get("a"), Some(&1));
/// ```
pub fn count<I>(keys: I) -> OwnedMapSet<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut result = empty();
    let map = result.as_map_mut();
    for key in keys {
        *map.entry(key).or_insert(0) += 1;
    }
    result
}

/// Indexes values by a derived key. On collision the last value wins.
///
/// See [`group_by`] to keep every value.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::index_by;
///
/// let by_length = index_by(["bb", "a", "cc"], |word| word.len());
/// assert_eq!(by_length.get(&2), Some(&"cc"));
/// assert_eq!(by_length.get(&1), Some(&"a"));
/// ```
pub fn index_by<I, K, F>(values: I, mut key: F) -> OwnedMapSet<K, I::Item>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let mut result = empty();
    let map = result.as_map_mut();
    for value in values {
        map.insert(key(&value), value);
    }
    result
}

/// Groups values by a derived key, keeping their relative order.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::group_by;
///
/// let by_length = group_by(["bb", "a", "cc"], |word| word.len());
/// assert_eq!(by_length.get(&2), Some(&vec!["bb", "cc"]));
/// assert_eq!(by_length.get(&1), Some(&vec!["a"]));
/// ```
pub fn group_by<I, K, F>(values: I, mut key: F) -> OwnedMapSet<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    let mut result: OwnedMapSet<K, Vec<I::Item>> = empty();
    let map = result.as_map_mut();
    for value in values {
        map.entry(key(&value)).or_default().push(value);
    }
    result
}

/// Calls `function` once per distinct key and caches the result.
///
/// # Examples
///
/// ```rust
/// use iterset::mapset::memoize;
///
/// let mut calls = 0;
/// let lengths = memoize(["bb", "a", "bb"], |word| {
///     calls += 1;
///     word.len()
/// });
/// assert_eq!(lengths.get("bb"), Some(&2));
/// assert_eq!(calls, 2);
/// ```
pub fn memoize<I, V, F>(keys: I, mut function: F) -> OwnedMapSet<I::Item, V>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
    F: FnMut(&I::Item) -> V,
{
    let mut result = empty();
    let map = result.as_map_mut();
    for key in keys {
        if let Entry::Vacant(entry) = map.entry(key) {
            let value = function(entry.key());
            entry.insert(value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_collect_from_empty_sequence() {
        let result = collect(Vec::<&str>::new(), 0);
        assert!(result.is_empty());
    }

    #[rstest]
    fn test_index_keeps_first_position() {
        let positions = index(["c", "a", "c", "b", "a"]);
        assert_eq!(positions.get("c"), Some(&0));
        assert_eq!(positions.get("a"), Some(&1));
        assert_eq!(positions.get("b"), Some(&3));
        assert_eq!(positions.sorted(), vec![&"c", &"a", &"b"]);
    }

    #[rstest]
    fn test_count_totals_match_length() {
        let keys = ["x", "y", "x", "x"];
        let counts = count(keys);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), keys.len());
        assert_eq!(counts.get("x"), Some(&3));
    }

    #[rstest]
    fn test_index_by_last_value_wins() {
        let by_parity = index_by([1, 2, 3, 4], |n| n % 2);
        assert_eq!(by_parity.get(&1), Some(&3));
        assert_eq!(by_parity.get(&0), Some(&4));
    }

    #[rstest]
    fn test_group_by_preserves_order_within_group() {
        let by_parity = group_by([5, 2, 3, 4, 1], |n| n % 2);
        assert_eq!(by_parity.get(&1), Some(&vec![5, 3, 1]));
        assert_eq!(by_parity.get(&0), Some(&vec![2, 4]));
    }

    #[rstest]
    fn test_memoize_computes_once_per_key() {
        let mut seen = Vec::new();
        let squares = memoize([3, 1, 3, 3], |n| {
            seen.push(*n);
            n * n
        });
        assert_eq!(seen, vec![3, 1]);
        assert_eq!(squares.get(&3), Some(&9));
    }
}
