//! # iterset
//!
//! Lazy set algebra over hash maps and iterators.
//!
//! ## Overview
//!
//! Conventional set types force two copies: sequences are collected into a
//! set first, and whatever the keys were attached to is thrown away. This
//! library works on the primitives directly:
//!
//! - **Set-maps**: [`MapSet`](mapset::MapSet) wraps a `HashMap` (owned or
//!   borrowed, zero-copy) and treats key presence as membership while
//!   keeping the values.
//! - **Raw sequence algebra**: [`algebra`] combines two plain iterators
//!   without collecting either side up front.
//! - **Sorted algebra**: [`sorted`] merges already-sorted sequences in one
//!   pass with no auxiliary set.
//! - **Transforms**: [`transform`] deduplicates and compacts runs.
//! - **Background iteration**: [`background`] moves a producer onto a
//!   worker behind a bounded channel, with cooperative cancellation.
//!
//! Every lazy adapter is a named iterator that is `Clone` whenever its
//! inputs are, so restartable inputs give restartable results.
//!
//! ## Feature Flags
//!
//! - `async` (default): [`BackgroundStream`](background::BackgroundStream)
//!   on tokio
//! - `serde`: serialize [`MapSet`](mapset::MapSet) as its map
//! - `fxhash`: hash temporary sets with `rustc-hash`
//! - `ahash`: hash temporary sets with `ahash`
//! - `full`: `async` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use iterset::prelude::*;
//!
//! let letters = set(["a", "b"]);
//! let common: Vec<&str> = letters.intersect(["b", "c"]).map(|(key, _)| key).collect();
//! assert_eq!(common, vec!["b"]);
//!
//! let firsts: Vec<&str> = ["b", "a", "b"].into_iter().unique().collect();
//! assert_eq!(firsts, vec!["b", "a"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set-map type and builders, the free functions and the
/// [`IterSetExt`](crate::ext::IterSetExt) extension trait.
///
/// # Usage
///
/// ```rust
/// use iterset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algebra::{
        difference, difference_all, equal, equal_counts, intersect, intersect_all, is_disjoint,
        is_subset,
    };
    pub use crate::background::{Background, BackgroundBuilder, CancellationToken, background};
    pub use crate::error::{AlreadyConsumedError, BackgroundError};
    pub use crate::ext::IterSetExt;
    pub use crate::mapset::{
        MapSet, Mapping, MappingMut, OwnedMapSet, cast, collect, count, group_by, index, index_by,
        memoize, set, view,
    };
    pub use crate::sequence::{Cursor, OneShot, size};
    pub use crate::sorted::{
        sorted_difference, sorted_difference_by, sorted_intersect, sorted_intersect_by,
        sorted_union, sorted_union_by,
    };
    pub use crate::transform::{compact, compact_by, unique, unique_by};

    #[cfg(feature = "async")]
    pub use crate::background::{BackgroundStream, background_stream};
}

pub mod algebra;
pub mod background;
pub mod error;
pub mod ext;
pub mod hash;
pub mod mapset;
pub mod sequence;
pub mod sorted;
pub mod transform;

// =============================================================================
// Capability Checks
// =============================================================================

// Restartable inputs give restartable adapters.
static_assertions::assert_impl_all!(
    algebra::Difference<std::vec::IntoIter<i32>, std::vec::IntoIter<i32>>: Iterator, Clone, Send
);
static_assertions::assert_impl_all!(
    algebra::Intersect<std::vec::IntoIter<i32>, std::vec::IntoIter<i32>>: Iterator, Clone, Send
);
static_assertions::assert_impl_all!(algebra::Stages<'static, i32>: Iterator, Clone);
static_assertions::assert_impl_all!(
    sorted::SortedUnion<std::vec::IntoIter<i32>, std::vec::IntoIter<i32>, sorted::Natural<i32>>: Iterator, Clone
);
static_assertions::assert_impl_all!(
    sorted::SortedIntersect<std::vec::IntoIter<i32>, std::vec::IntoIter<i32>, sorted::Natural<i32>>: Iterator, Clone
);
static_assertions::assert_impl_all!(
    sorted::SortedDifference<std::vec::IntoIter<i32>, std::vec::IntoIter<i32>, sorted::Natural<i32>>: Iterator, Clone
);
static_assertions::assert_impl_all!(transform::Unique<std::vec::IntoIter<i32>>: Iterator, Clone);
static_assertions::assert_impl_all!(transform::Compact<std::vec::IntoIter<i32>>: Iterator, Clone);
static_assertions::assert_impl_all!(mapset::OwnedMapSet<String, usize>: Clone, Send, Sync);
static_assertions::assert_impl_all!(background::Background<i32>: Iterator, Send);
#[cfg(feature = "async")]
static_assertions::assert_impl_all!(
    background::BackgroundStream<std::marker::PhantomPinned>: futures::Stream, Unpin, Send
);

// Single-use sources give single-use adapters.
static_assertions::assert_not_impl_any!(std::io::Lines<std::io::Empty>: Clone);
static_assertions::assert_not_impl_any!(transform::Unique<std::io::Lines<std::io::Empty>>: Clone);
static_assertions::assert_not_impl_any!(
    algebra::Difference<std::io::Lines<std::io::Empty>, std::vec::IntoIter<std::io::Result<String>>>: Clone
);
