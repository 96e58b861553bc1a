//! An ordered bidirectional map based on two cross-linked binary search trees.
//!
//! A [`BiMap`](struct.BiMap.html) stores unique `(L, R)` pairs. Every pair is linked into one
//! tree ordered by its left value and one ordered by its right value, so the map can be searched,
//! bounded, and iterated in either order, and a [`Cursor`](struct.Cursor.html) to a pair on one
//! side can be flipped to the same pair on the other side in constant time.
//!
//! # Examples
//!
//! ```
//! let mut codes = bitree::BiMap::new();
//!
//! codes.insert("gold", 79);
//! codes.insert("iron", 26);
//! codes.insert("lead", 82);
//!
//! assert_eq!(codes.get_left(&"iron"), Some(&26));
//! assert_eq!(codes.get_right(&82), Some(&"lead"));
//!
//! // a value may appear at most once on its side
//! assert!(codes.insert("rust", 26).is_end());
//!
//! let iron = codes.find_left(&"iron");
//! let heavier = codes.next_right(iron.flip());
//! assert_eq!(codes.left_of(heavier), Some(&"gold"));
//!
//! assert_eq!(codes.right_values().collect::<Vec<_>>(), [&26, &79, &82]);
//! ```
//!
//! # Features
//!
//! - `quickcheck` (default): implements `quickcheck::Arbitrary` for `BiMap`.
//! - `ordered_iter` (default): implements the `ordered_iter` traits for the map's iterators.
//! - `tracing`: emits `tracing` events when trees are relinked and inserts are rejected.

#![deny(missing_docs)]

#[macro_use]
mod trace;

mod arena;
pub mod balance;
mod cursor;
mod error;
mod map;
mod node;
mod tree;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use balance::{Aa, Balance, Unbalanced};
pub use cursor::Cursor;
pub use error::Error;
pub use map::{BiMap, IntoIter, Iter, Values};
pub use node::{Facet, Left, Right, Side};
