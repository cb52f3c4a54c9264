//! Hash maps used as sets, without discarding their values.
//!
//! [`MapSet`] wraps a `HashMap<K, V, S>` (owned or borrowed) and treats key
//! presence as set membership. Values ride along: intersecting a map with a
//! sequence of keys yields `(key, value)` pairs, and nothing is copied into a
//! separate set type first.
//!
//! - [`cast`] / [`view`]: zero-copy wrappers around an existing map. Changes
//!   made through a cast are changes to the caller's map.
//! - [`collect`], [`set`], [`index`], [`count`], [`index_by`], [`group_by`],
//!   [`memoize`]: one-pass builders returning an owned [`OwnedMapSet`].
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use iterset::mapset::{cast, view};
//!
//! let mut data = HashMap::from([("a", 0), ("b", 1), ("c", 2)]);
//!
//! // Lazy, in the order of the keys, with values attached.
//! let shared = view(&data);
//! let pairs: Vec<(&str, &i32)> = shared.intersect(["d", "c", "b"]).collect();
//! assert_eq!(pairs, vec![("c", &2), ("b", &1)]);
//!
//! // Mutations through the cast are visible in the original map.
//! cast(&mut data).delete(["a"]);
//! assert!(!data.contains_key("a"));
//! ```

mod build;
mod ops;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::{Entry, Iter, Keys};
use std::hash::{BuildHasher, Hash};

use crate::hash::DefaultHashBuilder;

pub use build::{collect, count, group_by, index, index_by, memoize, set};
pub use ops::{Difference, Intersection, ReverseDifference, SymmetricDifference};

// =============================================================================
// Mapping
// =============================================================================

/// Storage that a [`MapSet`] can read from.
///
/// Implemented for an owned `HashMap` and for shared and exclusive
/// references to one, which is what makes casting zero-copy.
pub trait Mapping {
    /// Key type.
    type Key: Eq + Hash;
    /// Value type.
    type Value;
    /// Hasher of the underlying map.
    type Hasher: BuildHasher;

    /// Returns the underlying map.
    fn as_map(&self) -> &HashMap<Self::Key, Self::Value, Self::Hasher>;
}

/// Storage that a [`MapSet`] can modify.
pub trait MappingMut: Mapping {
    /// Returns the underlying map mutably.
    fn as_map_mut(&mut self) -> &mut HashMap<Self::Key, Self::Value, Self::Hasher>;
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping for HashMap<K, V, S> {
    type Key = K;
    type Value = V;
    type Hasher = S;

    #[inline]
    fn as_map(&self) -> &HashMap<K, V, S> {
        self
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> MappingMut for HashMap<K, V, S> {
    #[inline]
    fn as_map_mut(&mut self) -> &mut HashMap<K, V, S> {
        self
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping for &HashMap<K, V, S> {
    type Key = K;
    type Value = V;
    type Hasher = S;

    #[inline]
    fn as_map(&self) -> &HashMap<K, V, S> {
        self
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Mapping for &mut HashMap<K, V, S> {
    type Key = K;
    type Value = V;
    type Hasher = S;

    #[inline]
    fn as_map(&self) -> &HashMap<K, V, S> {
        self
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> MappingMut for &mut HashMap<K, V, S> {
    #[inline]
    fn as_map_mut(&mut self) -> &mut HashMap<K, V, S> {
        self
    }
}

// =============================================================================
// MapSet Definition
// =============================================================================

/// A hash map with set operations.
///
/// `M` is the storage: an owned `HashMap` (see [`OwnedMapSet`]), or a
/// borrowed one obtained with [`cast`] or [`view`]. Keys are unique and
/// iteration order over the map is unspecified; operations that are driven
/// by a key sequence preserve that sequence's order.
///
/// # Time Complexity
///
/// | Operation               | Complexity   | Extra space   |
/// |-------------------------|--------------|---------------|
/// | `contains` / `missing`  | O(k)         | O(1)          |
/// | `equal`                 | O(k)         | O(min(n, k))  |
/// | `is_subset`             | O(k)         | O(min(n, k))  |
/// | `is_superset`           | O(k)         | O(1)          |
/// | `is_disjoint`           | O(k)         | O(1)          |
/// | `intersect`             | O(k), lazy   | O(1)          |
/// | `difference`            | O(n + k), lazy | O(min(n, k)) |
/// | `reverse_difference`    | O(k), lazy   | O(1)          |
/// | `symmetric_difference`  | O(n + k), lazy | O(min(n, k)) |
/// | `overlap`               | O(k)         | O(k)          |
/// | `union`                 | O(n + k)     | O(n + k)      |
///
/// where n is the size of the map and k the length of the key sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MapSet<M> {
    map: M,
}

/// A [`MapSet`] that owns its map.
pub type OwnedMapSet<K, V, S = DefaultHashBuilder> = MapSet<HashMap<K, V, S>>;

/// Wraps an existing map without copying it.
///
/// Mutating operations on the returned [`MapSet`] modify `map` itself.
#[inline]
pub fn cast<K, V, S>(map: &mut HashMap<K, V, S>) -> MapSet<&mut HashMap<K, V, S>>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    MapSet::new(map)
}

/// Wraps an existing map for read-only set operations without copying it.
#[inline]
pub fn view<K, V, S>(map: &HashMap<K, V, S>) -> MapSet<&HashMap<K, V, S>>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    MapSet::new(map)
}

impl<M> MapSet<M> {
    /// Wraps `map`.
    #[inline]
    pub const fn new(map: M) -> Self {
        Self { map }
    }

    /// Unwraps the storage.
    #[inline]
    pub fn into_inner(self) -> M {
        self.map
    }
}

impl<K, V> OwnedMapSet<K, V> {
    /// Creates an empty, owned map set.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(HashMap::with_hasher(DefaultHashBuilder::default()))
    }
}

impl<M: Mapping> MapSet<M> {
    /// Returns the underlying map.
    #[inline]
    pub fn as_map(&self) -> &HashMap<M::Key, M::Value, M::Hasher> {
        self.map.as_map()
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.as_map().len()
    }

    /// Returns `true` if the map has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_map().is_empty()
    }

    /// Returns the value stored for `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&M::Value>
    where
        M::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_map().get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        M::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_map().contains_key(key)
    }

    /// Returns an iterator over the keys, in unspecified order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, M::Key, M::Value> {
        self.as_map().keys()
    }

    /// Returns an iterator over the entries, in unspecified order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, M::Key, M::Value> {
        self.as_map().iter()
    }

    /// Returns the keys sorted by their values.
    ///
    /// Applied to the result of [`index`], this recovers the order in which
    /// the keys first appeared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::index;
    ///
    /// let positions = index(["b", "a", "b"]);
    /// assert_eq!(positions.sorted(), vec![&"b", &"a"]);
    /// ```
    pub fn sorted(&self) -> Vec<&M::Key>
    where
        M::Value: Ord,
    {
        let map = self.as_map();
        let mut keys: Vec<&M::Key> = map.keys().collect();
        keys.sort_by(|left, right| map.get(*left).cmp(&map.get(*right)));
        keys
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl<M: MappingMut> MapSet<M> {
    /// Returns the underlying map mutably.
    #[inline]
    pub fn as_map_mut(&mut self) -> &mut HashMap<M::Key, M::Value, M::Hasher> {
        self.map.as_map_mut()
    }

    /// Adds keys with the default value, overwriting existing values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let mut letters = set(["a", "b"]);
    /// letters.add(["b", "c"]);
    /// assert_eq!(letters.len(), 3);
    /// ```
    pub fn add<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = M::Key>,
        M::Value: Default,
    {
        let map = self.as_map_mut();
        for key in keys {
            map.insert(key, M::Value::default());
        }
    }

    /// Inserts keys with a copy of `value`, overwriting existing values.
    pub fn insert<I>(&mut self, keys: I, value: M::Value)
    where
        I: IntoIterator<Item = M::Key>,
        M::Value: Clone,
    {
        let map = self.as_map_mut();
        for key in keys {
            map.insert(key, value.clone());
        }
    }

    /// Deletes keys, ignoring those that are absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let mut letters = set(["a", "b"]);
    /// letters.delete(["b", "c"]);
    /// assert_eq!(letters.len(), 1);
    /// ```
    pub fn delete<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map_mut();
        for key in keys {
            map.remove(key.borrow());
        }
    }

    /// Removes keys, returning the removed entries in the order of `keys`.
    pub fn remove<I>(&mut self, keys: I) -> Vec<(M::Key, M::Value)>
    where
        I: IntoIterator,
        I::Item: Borrow<M::Key>,
    {
        let map = self.as_map_mut();
        keys.into_iter()
            .filter_map(|key| map.remove_entry(key.borrow()))
            .collect()
    }

    /// Removes keys that are present and inserts `value` for those that are
    /// absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterset::mapset::set;
    ///
    /// let mut letters = set(["a", "b"]);
    /// letters.toggle(["b", "c"], ());
    /// assert!(letters.contains(["a", "c"]));
    /// assert!(letters.missing(["b"]));
    /// ```
    pub fn toggle<I>(&mut self, keys: I, value: M::Value)
    where
        I: IntoIterator<Item = M::Key>,
        M::Value: Clone,
    {
        let map = self.as_map_mut();
        for key in keys {
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    entry.remove();
                }
                Entry::Vacant(entry) => {
                    entry.insert(value.clone());
                }
            }
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<K, V, S> From<HashMap<K, V, S>> for MapSet<HashMap<K, V, S>> {
    #[inline]
    fn from(map: HashMap<K, V, S>) -> Self {
        Self::new(map)
    }
}

impl<K, V, S> FromIterator<(K, V)> for MapSet<HashMap<K, V, S>>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<M: MappingMut> Extend<(M::Key, M::Value)> for MapSet<M> {
    fn extend<I: IntoIterator<Item = (M::Key, M::Value)>>(&mut self, iter: I) {
        self.as_map_mut().extend(iter);
    }
}

impl<'a, M: Mapping> IntoIterator for &'a MapSet<M> {
    type Item = (&'a M::Key, &'a M::Value);
    type IntoIter = Iter<'a, M::Key, M::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for MapSet<HashMap<K, V, S>> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}
