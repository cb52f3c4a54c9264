//! Set algebra between a [`MapSet`] and a sequence of keys.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::{MapSet, Mapping};
use crate::hash::{DefaultHashSet, temporary_set};

// =============================================================================
// Predicates
// =============================================================================

impl<M: Mapping> MapSet<M> {
    /// Returns `true` if every key is present.
    ///
    /// Stops at the first absent key. Equivalent to [`MapSet::is_superset`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let letters = set(["b", "a", "b"]);
    /// assert!(letters.contains(["a"]));
    /// assert!(!letters.contains(["b", "c"]));
    /// ```
    pub fn contains<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map();
        keys.into_iter().all(|key| map.contains_key(key.borrow()))
    }

    /// Returns `true` if no key is present.
    ///
    /// Stops at the first present key. Equivalent to [`MapSet::is_disjoint`].
    pub fn missing<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map();
        !keys.into_iter().any(|key| map.contains_key(key.borrow()))
    }

    /// Returns `true` if the keys of the map are exactly the elements of
    /// `keys`.
    ///
    /// Stops at the first key that is not in the map. Only keys of the map
    /// are remembered, so extra space is O(min(n, k)).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let keys = ["b", "a", "b"];
    /// assert!(set(["a", "b"]).equal(keys));
    /// assert!(!set(["a"]).equal(keys));
    /// ```
    pub fn equal<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map();
        let mut seen: DefaultHashSet<&M::Key> = temporary_set();
        for key in keys {
            match map.get_key_value(key.borrow()) {
                Some((stored, _)) => {
                    seen.insert(stored);
                }
                None => return false,
            }
        }
        seen.len() == map.len()
    }

    /// Returns `true` if every key of the map occurs in `keys`.
    ///
    /// Stops as soon as all of the map's keys have been seen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let keys = ["b", "a", "b"];
    /// assert!(set(["a"]).is_subset(keys));
    /// assert!(!set(["a", "c"]).is_subset(keys));
    /// ```
    pub fn is_subset<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map();
        if map.is_empty() {
            return true;
        }
        let mut seen: DefaultHashSet<&M::Key> = temporary_set();
        for key in keys {
            if let Some((stored, _)) = map.get_key_value(key.borrow()) {
                seen.insert(stored);
                if seen.len() == map.len() {
                    return true;
                }
            }
        }
        false
    }

    /// Returns `true` if every element of `keys` is present in the map.
    pub fn is_superset<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        self.contains(keys)
    }

    /// Returns `true` if no element of `keys` is present in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let keys = ["b", "a", "b"];
    /// assert!(set(["c"]).is_disjoint(keys));
    /// assert!(!set(["a"]).is_disjoint(keys));
    /// ```
    pub fn is_disjoint<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        self.missing(keys)
    }

    /// Counts keys only in the map, in both, and only in `keys`.
    ///
    /// Each distinct key is counted once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let overlap = set(["a", "b", "c"]).overlap(["c", "d", "b", "d"]);
    /// assert_eq!(overlap, (1, 2, 1));
    /// ```
    pub fn overlap<I>(&self, keys: I) -> (usize, usize, usize)
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key> + Eq + Hash,
    {
        let map = self.as_map();
        let mut both: DefaultHashSet<&M::Key> = temporary_set();
        let mut right: DefaultHashSet<I::Item> = temporary_set();
        for key in keys {
            match map.get_key_value(key.borrow()) {
                Some((stored, _)) => {
                    both.insert(stored);
                }
                None => {
                    right.insert(key);
                }
            }
        }
        (map.len() - both.len(), both.len(), right.len())
    }
}

// =============================================================================
// Lazy Operations
// =============================================================================

impl<M: Mapping> MapSet<M> {
    /// Returns a new owned map: a copy of this one with each sequence of
    /// pairs inserted in turn, later values overwriting earlier ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use iterset::mapset::view;
    ///
    /// let left = HashMap::from([("a", 0), ("b", 1)]);
    /// let merged = view(&left).union([[("b", 2), ("c", 3)]]);
    /// assert_eq!(merged.get("b"), Some(&2));
    /// assert_eq!(merged.len(), 3);
    /// assert_eq!(left.get("b"), Some(&1));
    /// ```
    pub fn union<I, P>(&self, seqs: I) -> MapSet<HashMap<M::Key, M::Value, M::Hasher>>
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = (M::Key, M::Value)>,
        M::Key: Clone,
        M::Value: Clone,
        M::Hasher: Clone,
    {
        let mut merged = self.as_map().clone();
        for seq in seqs {
            merged.extend(seq);
        }
        MapSet::new(merged)
    }

    /// Returns the `(key, value)` pairs whose keys occur in both, lazily and
    /// in the order of `keys`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let letters = set(["a", "b"]);
    /// let common: Vec<&str> = letters.intersect(["b", "c"]).map(|(key, _)| key).collect();
    /// assert_eq!(common, vec!["b"]);
    /// ```
    pub fn intersect<I>(&self, keys: I) -> Intersection<'_, M::Key, M::Value, M::Hasher, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        Intersection {
            map: self.as_map(),
            keys: keys.into_iter(),
        }
    }

    /// Returns the map's `(key, value)` pairs whose keys do not occur in
    /// `keys`.
    ///
    /// On the first pull, `keys` is scanned once to remember which of the
    /// map's keys it covers; the scan stops early, and nothing is yielded,
    /// if it covers all of them. The map's entries are then visited once.
    /// Output order is the map's iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let letters = set(["a", "b"]);
    /// let rest: Vec<&&str> = letters.difference(["b", "c"]).map(|(key, _)| key).collect();
    /// assert_eq!(rest, vec![&"a"]);
    /// ```
    pub fn difference<I>(&self, keys: I) -> Difference<'_, M::Key, M::Value, M::Hasher, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map();
        Difference {
            map,
            keys: Some(keys.into_iter()),
            covered: temporary_set(),
            entries: map.iter(),
        }
    }

    /// Returns the elements of `keys` that are not in the map, lazily and in
    /// the order of `keys`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let rest: Vec<&str> = set(["a", "b"]).reverse_difference(["b", "c"]).collect();
    /// assert_eq!(rest, vec!["c"]);
    /// ```
    pub fn reverse_difference<I>(
        &self,
        keys: I,
    ) -> ReverseDifference<'_, M::Key, M::Value, M::Hasher, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        ReverseDifference {
            map: self.as_map(),
            keys: keys.into_iter(),
        }
    }

    /// Returns the keys that are in exactly one of the map and `keys`.
    ///
    /// Elements of `keys` absent from the map come first, in the order of
    /// `keys`, while the map keys they hit are remembered; the map's
    /// remaining keys follow in the map's iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let result: Vec<&str> = set(["a", "b"]).symmetric_difference(["b", "c"]).collect();
    /// assert_eq!(result, vec!["c", "a"]);
    /// ```
    pub fn symmetric_difference<I>(
        &self,
        keys: I,
    ) -> SymmetricDifference<'_, M::Key, M::Value, M::Hasher, I::IntoIter>
    where
        I: IntoIterator<Item = M::Key>,
        M::Key: Clone,
    {
        let map = self.as_map();
        SymmetricDifference {
            map,
            keys: keys.into_iter(),
            matched: temporary_set(),
            remainder: map.keys(),
            keys_done: false,
        }
    }
}

// =============================================================================
// Intersection
// =============================================================================

/// Iterator over the `(key, value)` pairs whose keys occur in both.
///
/// Created by [`MapSet::intersect`].
pub struct Intersection<'a, K, V, S, I> {
    map: &'a HashMap<K, V, S>,
    keys: I,
}

impl<'a, K, V, S, I> Iterator for Intersection<'a, K, V, S, I>
where
    K: Eq + Hash,
    S: BuildHasher,
    I: Iterator,
    I::Item: Borrow<K>,
{
    type Item = (I::Item, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.keys.find_map(|key| {
            let value = map.get(key.borrow())?;
            Some((key, value))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.keys.size_hint().1)
    }
}

impl<K, V, S, I: Clone> Clone for Intersection<'_, K, V, S, I> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            keys: self.keys.clone(),
        }
    }
}

// =============================================================================
// Difference
// =============================================================================

/// Iterator over the map's pairs whose keys do not occur in a key sequence.
///
/// Created by [`MapSet::difference`].
pub struct Difference<'a, K, V, S, I> {
    map: &'a HashMap<K, V, S>,
    keys: Option<I>,
    covered: DefaultHashSet<&'a K>,
    entries: hash_map::Iter<'a, K, V>,
}

impl<'a, K, V, S, I> Difference<'a, K, V, S, I>
where
    K: Eq + Hash,
    S: BuildHasher,
    I: Iterator,
    I::Item: Borrow<K>,
{
    fn cover(&mut self, keys: I) {
        let map = self.map;
        if map.is_empty() {
            return;
        }
        for key in keys {
            if let Some((stored, _)) = map.get_key_value(key.borrow()) {
                self.covered.insert(stored);
                if self.covered.len() == map.len() {
                    self.entries = hash_map::Iter::default();
                    return;
                }
            }
        }
    }
}

impl<'a, K, V, S, I> Iterator for Difference<'a, K, V, S, I>
where
    K: Eq + Hash,
    S: BuildHasher,
    I: Iterator,
    I::Item: Borrow<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(keys) = self.keys.take() {
            self.cover(keys);
        }
        let covered = &self.covered;
        self.entries.find(|(key, _)| !covered.contains(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

impl<K, V, S, I> FusedIterator for Difference<'_, K, V, S, I>
where
    K: Eq + Hash,
    S: BuildHasher,
    I: Iterator,
    I::Item: Borrow<K>,
{
}

impl<K, V, S, I: Clone> Clone for Difference<'_, K, V, S, I> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            keys: self.keys.clone(),
            covered: self.covered.clone(),
            entries: self.entries.clone(),
        }
    }
}

// =============================================================================
// ReverseDifference
// =============================================================================

/// Iterator over the elements of a key sequence that are not in the map.
///
/// Created by [`MapSet::reverse_difference`].
pub struct ReverseDifference<'a, K, V, S, I> {
    map: &'a HashMap<K, V, S>,
    keys: I,
}

impl<K, V, S, I> Iterator for ReverseDifference<'_, K, V, S, I>
where
    K: Eq + Hash,
    S: BuildHasher,
    I: Iterator,
    I::Item: Borrow<K>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.keys.find(|key| !map.contains_key(key.borrow()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.keys.size_hint().1)
    }
}

impl<K, V, S, I: Clone> Clone for ReverseDifference<'_, K, V, S, I> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            keys: self.keys.clone(),
        }
    }
}

// =============================================================================
// SymmetricDifference
// =============================================================================

/// Iterator over the keys in exactly one of the map and a key sequence.
///
/// Created by [`MapSet::symmetric_difference`].
pub struct SymmetricDifference<'a, K, V, S, I> {
    map: &'a HashMap<K, V, S>,
    keys: I,
    matched: DefaultHashSet<&'a K>,
    remainder: hash_map::Keys<'a, K, V>,
    keys_done: bool,
}

impl<K, V, S, I> Iterator for SymmetricDifference<'_, K, V, S, I>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
    I: Iterator<Item = K>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if !self.keys_done {
            let map = self.map;
            for key in self.keys.by_ref() {
                match map.get_key_value(&key) {
                    Some((stored, _)) => {
                        self.matched.insert(stored);
                    }
                    None => return Some(key),
                }
            }
            self.keys_done = true;
            if self.matched.len() == map.len() {
                self.remainder = hash_map::Keys::default();
            }
        }
        let matched = &self.matched;
        self.remainder.find(|key| !matched.contains(key)).cloned()
    }
}

impl<K, V, S, I: Clone> Clone for SymmetricDifference<'_, K, V, S, I> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            keys: self.keys.clone(),
            matched: self.matched.clone(),
            remainder: self.remainder.clone(),
            keys_done: self.keys_done,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mapset::{OwnedMapSet, index, set};
    use rstest::rstest;

    fn letters(keys: &[&'static str]) -> OwnedMapSet<&'static str, ()> {
        set(keys.iter().copied())
    }

    #[rstest]
    fn test_intersect_preserves_key_order_and_values() {
        let data: OwnedMapSet<&str, i32> = [("a", 0), ("b", 1), ("c", 2)].into_iter().collect();
        let pairs: Vec<(&str, &i32)> = data.intersect(["d", "c", "b"]).collect();
        assert_eq!(pairs, vec![("c", &2), ("b", &1)]);
    }

    #[rstest]
    fn test_intersect_accepts_borrowed_keys() {
        let data = letters(&["a", "b"]);
        let keys = vec!["b", "c"];
        let common: Vec<&&str> = data.intersect(&keys).map(|(key, _)| key).collect();
        assert_eq!(common, vec![&"b"]);
    }

    #[rstest]
    fn test_difference_is_empty_when_keys_cover_map() {
        let keys = ["a"];
        let positions = index(keys);
        assert_eq!(positions.difference(keys).count(), 0);
    }

    #[rstest]
    fn test_difference_stops_scanning_once_covered() {
        let data = letters(&["a"]);
        let mut scanned = 0;
        let keys = ["a", "b", "c"].into_iter().inspect(|_| scanned += 1);
        assert_eq!(data.difference(keys).count(), 0);
        assert_eq!(scanned, 1);
    }

    #[rstest]
    fn test_difference_of_empty_map_pulls_no_keys() {
        let data = letters(&[]);
        let mut scanned = 0;
        let keys = (0..1000).map(|_| "a").inspect(|_| scanned += 1);
        assert_eq!(data.difference(keys).count(), 0);
        assert_eq!(scanned, 0);
    }

    #[rstest]
    fn test_difference_of_empty_map_accepts_endless_keys() {
        let data = letters(&[]);
        assert_eq!(data.difference(std::iter::repeat("a")).next(), None);
    }

    #[rstest]
    fn test_difference_yields_uncovered_entries() {
        let data: OwnedMapSet<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
        let mut rest: Vec<(&i32, &char)> = data.difference([2, 5]).collect();
        rest.sort_unstable();
        assert_eq!(rest, vec![(&1, &'a'), (&3, &'c')]);
    }

    #[rstest]
    fn test_reverse_difference_keeps_duplicates_in_order() {
        let data = letters(&["b"]);
        let rest: Vec<&str> = data.reverse_difference(["c", "b", "a", "c"]).collect();
        assert_eq!(rest, vec!["c", "a", "c"]);
    }

    #[rstest]
    fn test_symmetric_difference_order() {
        let data = letters(&["a", "b"]);
        let result: Vec<&str> = data.symmetric_difference(["b", "c"]).collect();
        assert_eq!(result, vec!["c", "a"]);
    }

    #[rstest]
    fn test_symmetric_difference_of_identical_sets_is_empty() {
        let keys = ["a"];
        assert_eq!(index(keys).symmetric_difference(keys).count(), 0);
    }

    #[rstest]
    fn test_symmetric_difference_early_break() {
        let data = letters(&["b"]);
        for key in data.symmetric_difference(["a"]) {
            if key == "b" {
                break;
            }
        }
        assert_eq!(data.symmetric_difference(["a"]).next(), Some("a"));
    }

    #[rstest]
    fn test_predicates() {
        let data = letters(&["a", "b"]);
        assert!(data.contains(["a", "b"]));
        assert!(!data.contains(["a", "c"]));
        assert!(data.missing(["c", "d"]));
        assert!(!data.missing(["c", "a"]));
        assert!(data.equal(["b", "a", "b"]));
        assert!(!data.equal(["a"]));
        assert!(!data.equal(["a", "b", "c"]));
        assert!(data.is_subset(["c", "b", "a"]));
        assert!(!data.is_subset(["a"]));
        assert!(data.is_superset(["a"]));
        assert!(data.is_disjoint(["c"]));
        assert!(letters(&[]).is_subset(Vec::<&str>::new()));
    }

    #[rstest]
    #[case(&["a"], 2)]
    #[case(&["a", "b"], 3)]
    #[case(&[], 0)]
    fn test_is_subset_stops_once_every_key_is_seen(
        #[case] keys: &[&'static str],
        #[case] expected_pulls: usize,
    ) {
        let data = letters(keys);
        let mut scanned = 0;
        let sequence = ["c", "a", "b", "d", "e"].into_iter().inspect(|_| scanned += 1);
        assert!(data.is_subset(sequence));
        assert_eq!(scanned, expected_pulls);
    }

    #[rstest]
    fn test_equal_stops_at_first_foreign_key() {
        let data = letters(&["a", "b"]);
        let mut scanned = 0;
        let sequence = ["a", "x", "b", "y"].into_iter().inspect(|_| scanned += 1);
        assert!(!data.equal(sequence));
        assert_eq!(scanned, 2);
    }

    #[rstest]
    fn test_overlap_counts_distinct_keys() {
        let data = letters(&["a", "b", "c"]);
        assert_eq!(data.overlap(["c", "d", "b", "d"]), (1, 2, 1));
        assert_eq!(data.overlap(Vec::<&str>::new()), (3, 0, 0));
    }

    #[rstest]
    fn test_union_leaves_receiver_untouched() {
        let data: OwnedMapSet<&str, i32> = [("a", 0), ("b", 1)].into_iter().collect();
        let merged = data.union([vec![("b", 2), ("c", 3)], vec![("c", 4)]]);
        assert_eq!(merged.get("a"), Some(&0));
        assert_eq!(merged.get("b"), Some(&2));
        assert_eq!(merged.get("c"), Some(&4));
        assert_eq!(data.len(), 2);
    }

    #[rstest]
    fn test_union_of_nothing_is_a_copy() {
        let data = letters(&["a"]);
        let copy = data.union(Vec::<Vec<(&str, ())>>::new());
        assert_eq!(copy, data);
    }

    #[rstest]
    fn test_lazy_operations_are_restartable() {
        let data = letters(&["b"]);
        let keys = ["a", "A", "b"].into_iter();
        let difference = data.difference(keys.clone());
        assert_eq!(difference.clone().count(), difference.count());
        let symmetric = data.symmetric_difference(keys.clone());
        assert_eq!(symmetric.clone().count(), symmetric.count());
        let intersection = data.intersect(keys);
        assert_eq!(intersection.clone().count(), intersection.count());
    }
}
