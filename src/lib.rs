//! An AVL-balanced ordered set with order statistics and depth reporting.
//!
//! [`AvlSet`] stores unique keys in a height-balanced binary search tree. Each node is
//! augmented with its subtree height and subtree size, so that besides the usual set
//! operations it answers:
//!
//! - [`find`](AvlSet::find), [`insert`](AvlSet::insert), [`erase`](AvlSet::erase) - with the
//!   depth of the node involved (root = 0)
//! - [`minimum`](AvlSet::minimum) / [`maximum`](AvlSet::maximum) - the extreme key of the
//!   subtree rooted at a given key, with its depth
//! - [`rank`](AvlSet::rank) - one more than the number of smaller keys, in O(log n)
//! - [`get_by_position`](AvlSet::get_by_position) and indexing by [`Position`]
//!
//! # Example
//!
//! ```
//! use avl_set::{AvlSet, Error, Extremum, RankReport};
//!
//! let mut set = AvlSet::new();
//! for (key, depth) in [(20, 0), (10, 1), (30, 1), (25, 2), (40, 2)] {
//!     assert_eq!(set.insert(key), Ok(depth));
//! }
//!
//! assert_eq!(set.find(&25), Ok(2));
//! assert_eq!(set.insert(25), Err(Error::DuplicateKey));
//! assert_eq!(set.maximum(&20), Ok(Extremum { key: &40, depth: 2 }));
//! assert_eq!(set.rank(&30), RankReport { depth: Some(1), rank: 4 });
//!
//! // Erasing reports the depth the node had before the tree was restructured.
//! assert_eq!(set.erase(&10), Ok(1));
//! assert_eq!(set.find(&30), Ok(0));
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their parent and children by handle, so the
//! parent back-links never form ownership cycles. Insertion restores balance with at most
//! one single or double rotation; erasure walks to the root and may rotate at several
//! levels. Rotation events are emitted through [`tracing`] at `TRACE` level.

#![no_std]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod avl_set;

pub use avl_set::{AvlSet, BalancedOrderedSet, Extremum};
pub use error::{Error, Result};
pub use order_statistic::{Position, RankReport};
