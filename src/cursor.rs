//! Positions within one side of a bidirectional map.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use super::arena::Handle;
use super::node::Side;

/// A position in one side's order: either a stored pair or the end of that side.
///
/// A cursor does not borrow its map. It names its pair by slot and stamp, so a cursor whose pair
/// has been erased is recognized as stale by every map operation that accepts it, even if the
/// slot has since been reused. Erasing a pair invalidates the cursors to it on both sides and no
/// others.
///
/// Cursors compare equal when they name the same position on the same side.
pub struct Cursor<S> {
    handle: Option<Handle>,
    _side: PhantomData<fn() -> S>,
}

impl<S> Cursor<S> where S: Side {
    pub(crate) fn end() -> Self { Cursor { handle: None, _side: PhantomData } }

    pub(crate) fn at(handle: Handle) -> Self { Cursor { handle: Some(handle), _side: PhantomData } }

    pub(crate) fn handle(&self) -> Option<Handle> { self.handle }

    /// Checks if the cursor is past the last element of its side.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// assert!(map.begin_left().is_end());
    ///
    /// let it = map.insert(1, "a");
    /// assert!(!it.is_end());
    /// assert!(map.insert(1, "b").is_end());
    /// ```
    pub fn is_end(&self) -> bool { self.handle.is_none() }

    /// Returns the cursor to the same pair on the opposite side.
    ///
    /// The end of one side flips to the end of the other. Flipping takes constant time and never
    /// consults a comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let right = map.find_left(&2).flip();
    /// assert_eq!(map.right_of(right), Some(&"b"));
    /// assert_eq!(right, map.find_right(&"b"));
    /// assert_eq!(right.flip(), map.find_left(&2));
    ///
    /// assert_eq!(map.end_left().flip(), map.end_right());
    /// assert_eq!(map.end_right().flip(), map.end_left());
    /// ```
    pub fn flip(self) -> Cursor<S::Opposite> {
        Cursor { handle: self.handle, _side: PhantomData }
    }
}

impl<S> Clone for Cursor<S> {
    fn clone(&self) -> Self { *self }
}

impl<S> Copy for Cursor<S> {}

impl<S> PartialEq for Cursor<S> {
    fn eq(&self, other: &Self) -> bool { self.handle == other.handle }
}

impl<S> Eq for Cursor<S> {}

impl<S> Hash for Cursor<S> {
    fn hash<H: Hasher>(&self, h: &mut H) { self.handle.hash(h); }
}

impl<S> Debug for Cursor<S> where S: Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.handle {
            None => write!(f, "Cursor<{}>(end)", S::NAME),
            Some(handle) => write!(f, "Cursor<{}>({}#{})", S::NAME, handle.slot, handle.stamp),
        }
    }
}
