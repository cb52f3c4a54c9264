//! Set algebra over two raw sequences.
//!
//! These functions take plain sequences on both sides, without a
//! [`MapSet`](crate::mapset::MapSet) to look keys up in. They avoid
//! collecting either side up front wherever the operation allows it:
//!
//! | Function          | Output order      | Extra space                     |
//! |-------------------|-------------------|---------------------------------|
//! | [`difference`]    | `keys`            | part of `seq` pulled so far     |
//! | [`intersect`]     | interleaved       | distinct elements pulled so far |
//! | [`equal`]         | -                 | distinct elements pulled so far |
//! | [`equal_counts`]  | -                 | one counter per unmatched element |
//! | [`is_subset`]     | -                 | as [`difference`]               |
//! | [`is_disjoint`]   | -                 | as [`intersect`]                |
//!
//! When one side is already a map, the methods on
//! [`MapSet`](crate::mapset::MapSet) are cheaper: lookups replace the
//! temporary sets entirely.
//!
//! # Examples
//!
//! ```rust
//! use iterset::algebra::{difference, equal, is_subset};
//!
//! let left = ["a", "b"];
//! let right = ["b", "c"];
//!
//! assert_eq!(difference(left, right).collect::<Vec<_>>(), vec!["a"]);
//! assert!(!equal(left, right));
//! assert!(is_subset(["b"], right));
//! ```

mod compare;
mod difference;
mod intersect;
mod stages;

pub use compare::{equal, equal_counts, is_disjoint, is_subset};
pub use difference::{Difference, difference};
pub use intersect::{Intersect, intersect};
pub use stages::{Stages, difference_all, intersect_all};
