//! Hasher selection for the maps and sets this crate allocates.
//!
//! Temporary dedup sets and the maps returned by the builders in
//! [`crate::mapset`] all hash with [`DefaultHashBuilder`]. The concrete
//! hasher is picked by feature flag:
//!
//! - `fxhash`: [`rustc_hash::FxBuildHasher`]
//! - `ahash`: [`ahash::RandomState`] (ignored when `fxhash` is also enabled)
//! - neither: [`std::collections::hash_map::RandomState`]
//!
//! Maps supplied by the caller keep whatever hasher they were built with.

use std::collections::{HashMap, HashSet};

// =============================================================================
// Hasher Type Alias
// =============================================================================

/// The `BuildHasher` used for every map and set allocated by this crate.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// The `BuildHasher` used for every map and set allocated by this crate.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// The `BuildHasher` used for every map and set allocated by this crate.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

/// A `HashMap` hashed with [`DefaultHashBuilder`].
pub type DefaultHashMap<K, V> = HashMap<K, V, DefaultHashBuilder>;

/// A `HashSet` hashed with [`DefaultHashBuilder`].
pub type DefaultHashSet<T> = HashSet<T, DefaultHashBuilder>;

/// Creates an empty set for tracking keys seen during one traversal.
#[inline]
pub(crate) fn temporary_set<T>() -> DefaultHashSet<T> {
    HashSet::with_hasher(DefaultHashBuilder::default())
}

/// Creates an empty map for tracking per-key state during one traversal.
#[inline]
pub(crate) fn temporary_map<K, V>() -> DefaultHashMap<K, V> {
    HashMap::with_hasher(DefaultHashBuilder::default())
}
