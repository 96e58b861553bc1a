//! An ordered bidirectional map based on two cross-linked binary search trees.

use compare::{Compare, Natural};
use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::hash::{self, Hash};
use std::iter::{self, FromIterator};
use std::marker::PhantomData;
use super::arena::Arena;
use super::balance::{Aa, Balance};
use super::cursor::Cursor;
use super::error::Error;
use super::node::{Facet, Left, Right, Side};
use super::tree::{self, Search, Tree};

/// An ordered map of unique `(L, R)` pairs, searchable and iterable from either side.
///
/// No two pairs hold left values that compare equal under the left comparator, and no two hold
/// right values that compare equal under the right comparator. Each pair is stored once and linked
/// into one search tree per side, so moving from a pair's position on one side to its position on
/// the other (see [`Cursor::flip`](struct.Cursor.html#method.flip)) takes constant time.
///
/// The trees are balanced according to `B`. [`Aa`](struct.Aa.html) keeps their height
/// logarithmic; [`Unbalanced`](struct.Unbalanced.html) never restructures them.
///
/// The behavior of this map is undefined if a value's ordering relative to any other value on its
/// side changes while the value is in the map. This is normally only possible through `Cell`,
/// `RefCell`, or unsafe code.
pub struct BiMap<L, R, CL = Natural<L>, CR = Natural<R>, B = Aa>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {

    arena: Arena<L, R, B>,
    left: Tree<Left, CL>,
    right: Tree<Right, CR>,
    len: usize,
}

impl<L, R> BiMap<L, R> where L: Ord, R: Ord {
    /// Creates an empty map ordered according to the natural order of its values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "c");
    /// map.insert(3, "a");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"a")));
    /// assert_eq!(it.next(), None);
    ///
    /// let mut it = map.iter_right();
    /// assert_eq!(it.next(), Some((&"a", &3)));
    /// assert_eq!(it.next(), Some((&"b", &2)));
    /// assert_eq!(it.next(), Some((&"c", &1)));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { BiMap::with_cmp(::compare::natural(), ::compare::natural()) }
}

impl<L, R, CL, CR, B> BiMap<L, R, CL, CR, B> where CL: Compare<L>, CR: Compare<R>, B: Balance {
    /// Creates an empty map ordering each side according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut map: bitree::BiMap<_, _, _, _> = bitree::BiMap::with_cmp(natural().rev(), natural());
    ///
    /// map.insert(2, 'x');
    /// map.insert(1, 'z');
    /// map.insert(3, 'y');
    ///
    /// assert_eq!(map.left_values().collect::<Vec<_>>(), [&3, &2, &1]);
    /// assert_eq!(map.right_values().collect::<Vec<_>>(), [&'x', &'y', &'z']);
    /// ```
    pub fn with_cmp(left: CL, right: CR) -> Self {
        BiMap { arena: Arena::new(), left: Tree::new(left), right: Tree::new(right), len: 0 }
    }

    /// Checks if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(2, "b");
    /// assert!(!map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the number of pairs in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(2, "b");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.len }

    /// Returns a reference to the comparator ordering the left side.
    pub fn left_cmp(&self) -> &CL { self.left.cmp() }

    /// Returns a reference to the comparator ordering the right side.
    pub fn right_cmp(&self) -> &CR { self.right.cmp() }

    /// Removes all pairs from the map, invalidating every cursor into it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert!(map.find_right(&"a").is_end());
    /// ```
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.arena.clear();
        self.len = 0;
    }

    /// Swaps the contents of two maps, comparators included.
    ///
    /// Cursors follow their pairs: a cursor obtained from one map afterwards refers into the
    /// other.
    pub fn swap(&mut self, other: &mut Self) { ::std::mem::swap(self, other); }

    /// Inserts a pair into the map, returning the left cursor of the new pair.
    ///
    /// If the map already holds a left value equal to `left` or a right value equal to `right`,
    /// the map is left unchanged and the end of the left side is returned. Both sides are checked
    /// before either tree is modified.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// let it = map.insert(1, "a");
    /// assert_eq!(map.get(it), Some((&1, &"a")));
    ///
    /// assert_eq!(map.insert(1, "b"), map.end_left());
    /// assert_eq!(map.insert(2, "a"), map.end_left());
    /// assert!(!map.insert(2, "b").is_end());
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn insert(&mut self, left: L, right: R) -> Cursor<Left> {
        let left_vacant = match self.left.search(&self.arena, &left) {
            Search::Found(_) => {
                debug_log!(len = self.len, "insert rejected: left value present");
                return Cursor::end();
            }
            Search::Vacant(vacant) => vacant,
        };

        let right_vacant = match self.right.search(&self.arena, &right) {
            Search::Found(_) => {
                debug_log!(len = self.len, "insert rejected: right value present");
                return Cursor::end();
            }
            Search::Vacant(vacant) => vacant,
        };

        let handle = self.arena.alloc(left, right);
        self.left.link(&mut self.arena, handle.slot, left_vacant);
        self.right.link(&mut self.arena, handle.slot, right_vacant);
        self.len += 1;
        Cursor::at(handle)
    }

    /// Removes the pair at the given left cursor and returns the cursor to the next left value.
    ///
    /// Every cursor to the removed pair, on either side, becomes stale.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the end of the left side or its pair has already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let next = map.erase_left(map.find_left(&1));
    /// assert_eq!(map.get(next), Some((&2, &"b")));
    /// assert!(map.find_right(&"a").is_end());
    ///
    /// assert!(map.erase_left(next).is_end());
    /// assert!(map.is_empty());
    /// ```
    pub fn erase_left(&mut self, cursor: Cursor<Left>) -> Cursor<Left> {
        let slot = self.live(cursor, "erase_left");
        let (_, next, _) = self.unlink(slot);
        self.cursor(next)
    }

    /// Removes the pair at the given right cursor and returns the cursor to the next right value.
    ///
    /// Every cursor to the removed pair, on either side, becomes stale.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the end of the right side or its pair has already been removed.
    pub fn erase_right(&mut self, cursor: Cursor<Right>) -> Cursor<Right> {
        let slot = self.live(cursor, "erase_right");
        let (_, _, next) = self.unlink(slot);
        self.cursor(next)
    }

    /// Removes the pairs whose left values lie in `[first, last)`, returning `last`.
    ///
    /// # Panics
    ///
    /// Panics if `last` does not follow `first` on the left side.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// map.insert(3, 'c');
    /// map.insert(4, 'd');
    ///
    /// let last = map.erase_left_range(map.find_left(&2), map.find_left(&4));
    /// assert_eq!(map.get(last), Some((&4, &'d')));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&1, &'a'), (&4, &'d')]);
    /// ```
    pub fn erase_left_range(&mut self, first: Cursor<Left>, last: Cursor<Left>) -> Cursor<Left> {
        let mut cursor = first;
        while cursor != last { cursor = self.erase_left(cursor); }
        last
    }

    /// Removes the pairs whose right values lie in `[first, last)`, returning `last`.
    ///
    /// # Panics
    ///
    /// Panics if `last` does not follow `first` on the right side.
    pub fn erase_right_range(&mut self, first: Cursor<Right>, last: Cursor<Right>)
        -> Cursor<Right> {

        let mut cursor = first;
        while cursor != last { cursor = self.erase_right(cursor); }
        last
    }

    /// Removes the pair with the given left value, returning `true` if the map contained it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// map.insert(1, "a");
    ///
    /// assert!(map.remove_left(&1));
    /// assert!(!map.remove_left(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_left<Q: ?Sized>(&mut self, key: &Q) -> bool where CL: Compare<Q, L> {
        self.take_left(key).is_some()
    }

    /// Removes the pair with the given right value, returning `true` if the map contained it.
    pub fn remove_right<Q: ?Sized>(&mut self, key: &Q) -> bool where CR: Compare<Q, R> {
        self.take_right(key).is_some()
    }

    /// Removes and returns the pair with the given left value, or `None` if the map does not
    /// contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.take_left(&1), Some((1, "a")));
    /// assert_eq!(map.take_left(&1), None);
    /// ```
    pub fn take_left<Q: ?Sized>(&mut self, key: &Q) -> Option<(L, R)> where CL: Compare<Q, L> {
        self.left.find(&self.arena, key).map(|slot| self.unlink(slot).0)
    }

    /// Removes and returns the pair with the given right value, or `None` if the map does not
    /// contain it.
    pub fn take_right<Q: ?Sized>(&mut self, key: &Q) -> Option<(L, R)> where CR: Compare<Q, R> {
        self.right.find(&self.arena, key).map(|slot| self.unlink(slot).0)
    }

    /// Returns the cursor to the given left value, or the end of the left side if the map does
    /// not contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.right_of(map.find_left(&1)), Some(&"a"));
    /// assert_eq!(map.find_left(&2), map.end_left());
    /// ```
    pub fn find_left<Q: ?Sized>(&self, key: &Q) -> Cursor<Left> where CL: Compare<Q, L> {
        self.cursor(self.left.find(&self.arena, key))
    }

    /// Returns the cursor to the given right value, or the end of the right side if the map does
    /// not contain it.
    pub fn find_right<Q: ?Sized>(&self, key: &Q) -> Cursor<Right> where CR: Compare<Q, R> {
        self.cursor(self.right.find(&self.arena, key))
    }

    /// Checks if the map contains the given left value.
    pub fn contains_left<Q: ?Sized>(&self, key: &Q) -> bool where CL: Compare<Q, L> {
        self.left.find(&self.arena, key).is_some()
    }

    /// Checks if the map contains the given right value.
    pub fn contains_right<Q: ?Sized>(&self, key: &Q) -> bool where CR: Compare<Q, R> {
        self.right.find(&self.arena, key).is_some()
    }

    /// Returns a reference to the right value paired with the given left value, or `None` if the
    /// map does not contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// assert_eq!(map.get_left(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get_left(&1), Some(&"a"));
    /// ```
    pub fn get_left<Q: ?Sized>(&self, key: &Q) -> Option<&R> where CL: Compare<Q, L> {
        self.left.find(&self.arena, key).map(|slot| self.arena.pair(slot).1)
    }

    /// Returns a reference to the left value paired with the given right value, or `None` if the
    /// map does not contain it.
    pub fn get_right<Q: ?Sized>(&self, key: &Q) -> Option<&L> where CR: Compare<Q, R> {
        self.right.find(&self.arena, key).map(|slot| self.arena.pair(slot).0)
    }

    /// Returns a reference to the right value paired with the given left value.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the map does not contain the left value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitree::Error;
    ///
    /// let mut map = bitree::BiMap::new();
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.at_left(&1), Ok(&"a"));
    /// assert_eq!(map.at_left(&2), Err(Error::KeyNotFound { side: "left" }));
    /// ```
    pub fn at_left<Q: ?Sized>(&self, key: &Q) -> Result<&R, Error> where CL: Compare<Q, L> {
        self.get_left(key).ok_or(Error::KeyNotFound { side: Left::NAME })
    }

    /// Returns a reference to the left value paired with the given right value.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the map does not contain the right value.
    pub fn at_right<Q: ?Sized>(&self, key: &Q) -> Result<&L, Error> where CR: Compare<Q, R> {
        self.get_right(key).ok_or(Error::KeyNotFound { side: Right::NAME })
    }

    /// Returns a reference to the right value paired with the given left value, first pairing it
    /// with `R::default()` if the map does not contain it.
    ///
    /// When a new pair is needed and another pair already holds the default right value, that
    /// pair is removed to make room.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// map.insert(5, "x");
    ///
    /// assert_eq!(map.at_left_or_default(5), &"x");
    ///
    /// assert_eq!(map.at_left_or_default(6), &"");
    /// assert_eq!(map.get_right(&""), Some(&6));
    ///
    /// assert_eq!(map.at_left_or_default(7), &"");
    /// assert_eq!(map.get_right(&""), Some(&7));
    /// assert!(!map.contains_left(&6));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn at_left_or_default(&mut self, key: L) -> &R where R: Default {
        if let Some(slot) = self.left.find(&self.arena, &key) {
            return self.arena.pair(slot).1;
        }

        let default = R::default();
        if let Some(slot) = self.right.find(&self.arena, &default) {
            debug_log!(len = self.len, "evicting the pair holding the default right value");
            self.unlink(slot);
        }

        match self.insert(key, default).handle() {
            Some(handle) => self.arena.pair(handle.slot).1,
            None => unreachable!("neither value of the defaulted pair is present"),
        }
    }

    /// Returns a reference to the left value paired with the given right value, first pairing it
    /// with `L::default()` if the map does not contain it.
    ///
    /// When a new pair is needed and another pair already holds the default left value, that
    /// pair is removed to make room.
    pub fn at_right_or_default(&mut self, key: R) -> &L where L: Default {
        if let Some(slot) = self.right.find(&self.arena, &key) {
            return self.arena.pair(slot).0;
        }

        let default = L::default();
        if let Some(slot) = self.left.find(&self.arena, &default) {
            debug_log!(len = self.len, "evicting the pair holding the default left value");
            self.unlink(slot);
        }

        match self.insert(default, key).handle() {
            Some(handle) => self.arena.pair(handle.slot).0,
            None => unreachable!("neither value of the defaulted pair is present"),
        }
    }

    /// Returns the cursor to the least left value not less than the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.left_of(map.lower_bound_left(&10)), Some(&10));
    /// assert_eq!(map.left_of(map.lower_bound_left(&11)), Some(&20));
    /// assert!(map.lower_bound_left(&21).is_end());
    /// ```
    pub fn lower_bound_left<Q: ?Sized>(&self, key: &Q) -> Cursor<Left> where CL: Compare<Q, L> {
        self.cursor(self.left.lower_bound(&self.arena, key))
    }

    /// Returns the cursor to the least left value greater than the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.left_of(map.upper_bound_left(&9)), Some(&10));
    /// assert_eq!(map.left_of(map.upper_bound_left(&10)), Some(&20));
    /// assert!(map.upper_bound_left(&20).is_end());
    /// ```
    pub fn upper_bound_left<Q: ?Sized>(&self, key: &Q) -> Cursor<Left> where CL: Compare<Q, L> {
        self.cursor(self.left.upper_bound(&self.arena, key))
    }

    /// Returns the cursor to the least right value not less than the given one.
    pub fn lower_bound_right<Q: ?Sized>(&self, key: &Q) -> Cursor<Right>
        where CR: Compare<Q, R> {

        self.cursor(self.right.lower_bound(&self.arena, key))
    }

    /// Returns the cursor to the least right value greater than the given one.
    pub fn upper_bound_right<Q: ?Sized>(&self, key: &Q) -> Cursor<Right>
        where CR: Compare<Q, R> {

        self.cursor(self.right.upper_bound(&self.arena, key))
    }

    /// Returns the cursor to the least left value, or the end of the left side if the map is
    /// empty.
    pub fn begin_left(&self) -> Cursor<Left> { self.cursor(self.left.first(&self.arena)) }

    /// Returns the end of the left side.
    pub fn end_left(&self) -> Cursor<Left> { Cursor::end() }

    /// Returns the cursor to the least right value, or the end of the right side if the map is
    /// empty.
    pub fn begin_right(&self) -> Cursor<Right> { self.cursor(self.right.first(&self.arena)) }

    /// Returns the end of the right side.
    pub fn end_right(&self) -> Cursor<Right> { Cursor::end() }

    /// Returns the cursor following the given one in left order.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the end of the left side or is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let mut it = map.begin_left();
    /// let mut seen = vec![];
    ///
    /// while it != map.end_left() {
    ///     seen.push(map.get(it).unwrap());
    ///     it = map.next_left(it);
    /// }
    ///
    /// assert_eq!(seen, [(&1, &"a"), (&2, &"b")]);
    /// ```
    pub fn next_left(&self, cursor: Cursor<Left>) -> Cursor<Left> {
        let slot = self.live(cursor, "next_left");
        self.cursor(tree::next::<Left, _, _, _>(&self.arena, slot))
    }

    /// Returns the cursor preceding the given one in left order. The end's predecessor is the
    /// greatest left value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the first position of the left side or is stale.
    pub fn prev_left(&self, cursor: Cursor<Left>) -> Cursor<Left> {
        let last = self.left.last(&self.arena);
        self.retreat(cursor, last, "prev_left")
    }

    /// Returns the cursor following the given one in right order.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the end of the right side or is stale.
    pub fn next_right(&self, cursor: Cursor<Right>) -> Cursor<Right> {
        let slot = self.live(cursor, "next_right");
        self.cursor(tree::next::<Right, _, _, _>(&self.arena, slot))
    }

    /// Returns the cursor preceding the given one in right order. The end's predecessor is the
    /// greatest right value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is the first position of the right side or is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(1, "b");
    /// map.insert(2, "a");
    ///
    /// let last = map.prev_right(map.end_right());
    /// assert_eq!(map.right_of(last), Some(&"b"));
    /// assert_eq!(map.prev_right(last), map.begin_right());
    /// ```
    pub fn prev_right(&self, cursor: Cursor<Right>) -> Cursor<Right> {
        let last = self.right.last(&self.arena);
        self.retreat(cursor, last, "prev_right")
    }

    /// Checks if the cursor can be used with this map: it is an end, or its pair is still stored.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// let it = map.insert(1, "a");
    /// assert!(map.is_valid(it));
    /// assert!(map.is_valid(it.flip()));
    ///
    /// map.remove_right(&"a");
    /// assert!(!map.is_valid(it));
    /// assert!(map.is_valid(map.end_left()));
    /// ```
    pub fn is_valid<S>(&self, cursor: Cursor<S>) -> bool where S: Side {
        cursor.handle().map_or(true, |handle| self.arena.resolve(handle).is_some())
    }

    /// Returns the pair at the given cursor, or `None` if it is an end or stale.
    pub fn get<S>(&self, cursor: Cursor<S>) -> Option<(&L, &R)> where S: Side {
        cursor.handle()
            .and_then(|handle| self.arena.resolve(handle))
            .map(|slot| self.arena.pair(slot))
    }

    /// Returns the left value of the pair at the given cursor, or `None` if it is an end or
    /// stale.
    pub fn left_of<S>(&self, cursor: Cursor<S>) -> Option<&L> where S: Side {
        self.get(cursor).map(|pair| pair.0)
    }

    /// Returns the right value of the pair at the given cursor, or `None` if it is an end or
    /// stale.
    pub fn right_of<S>(&self, cursor: Cursor<S>) -> Option<&R> where S: Side {
        self.get(cursor).map(|pair| pair.1)
    }

    /// Returns the pair with the least left value, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    /// assert_eq!(map.first_left(), None);
    ///
    /// map.insert(2, "a");
    /// map.insert(1, "b");
    ///
    /// assert_eq!(map.first_left(), Some((&1, &"b")));
    /// assert_eq!(map.first_right(), Some((&"a", &2)));
    /// ```
    pub fn first_left(&self) -> Option<(&L, &R)> {
        self.left.first(&self.arena).map(|slot| self.arena.pair(slot))
    }

    /// Returns the pair with the greatest left value, or `None` if the map is empty.
    pub fn last_left(&self) -> Option<(&L, &R)> {
        self.left.last(&self.arena).map(|slot| self.arena.pair(slot))
    }

    /// Returns the pair with the least right value, right value first, or `None` if the map is
    /// empty.
    pub fn first_right(&self) -> Option<(&R, &L)> {
        self.right.first(&self.arena).map(|slot| { let (l, r) = self.arena.pair(slot); (r, l) })
    }

    /// Returns the pair with the greatest right value, right value first, or `None` if the map is
    /// empty.
    pub fn last_right(&self) -> Option<(&R, &L)> {
        self.right.last(&self.arena).map(|slot| { let (l, r) = self.arena.pair(slot); (r, l) })
    }

    /// Returns an iterator over the map's pairs in ascending order of their left values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next_back(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, Left, L, R, B> {
        Iter::new(&self.arena, self.left.first(&self.arena), self.left.last(&self.arena), self.len)
    }

    /// Returns an iterator over the map's pairs in ascending order of their right values, with
    /// each right value first.
    pub fn iter_right(&self) -> Iter<'_, Right, L, R, B> {
        Iter::new(&self.arena, self.right.first(&self.arena), self.right.last(&self.arena),
                  self.len)
    }

    /// Returns an iterator over the map's left values in ascending order.
    pub fn left_values(&self) -> Values<'_, Left, L, R, B> { Values(self.iter()) }

    /// Returns an iterator over the map's right values in ascending order.
    pub fn right_values(&self) -> Values<'_, Right, L, R, B> { Values(self.iter_right()) }

    /// Returns an iterator that consumes the map, yielding its pairs in ascending order of their
    /// left values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = bitree::BiMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, "a"), (2, "b")]);
    /// ```
    pub fn into_iter(self) -> IntoIter<L, R, B> {
        let mut order = VecDeque::with_capacity(self.len);
        let mut link = self.left.first(&self.arena);

        while let Some(slot) = link {
            order.push_back(slot);
            link = tree::next::<Left, _, _, _>(&self.arena, slot);
        }

        IntoIter { arena: self.arena, order: order }
    }

    /// Panics if the map's trees disagree with each other or violate their invariants.
    #[doc(hidden)]
    pub fn validate(&self) {
        self.left.validate(&self.arena);
        self.right.validate(&self.arena);
        assert!(self.left.len() == self.len && self.right.len() == self.len,
                "trees count {} and {} pairs, map counts {}",
                self.left.len(), self.right.len(), self.len);
        assert!(self.arena.len() == self.len, "arena holds {} records", self.arena.len());
        assert!(self.left.is_empty() == (self.len == 0) && self.right.is_empty() == (self.len == 0));
    }

    // Unlinks both facets of the record, frees it, and returns its values with the successors it
    // had on each side.
    fn unlink(&mut self, slot: usize) -> ((L, R), Option<usize>, Option<usize>) {
        let left_next = self.left.remove(&mut self.arena, slot);
        let right_next = self.right.remove(&mut self.arena, slot);
        self.len -= 1;
        (self.arena.free(slot), left_next, right_next)
    }

    fn cursor<S>(&self, slot: Option<usize>) -> Cursor<S> where S: Side {
        slot.map_or(Cursor::end(), |slot| Cursor::at(self.arena.handle(slot)))
    }

    // Resolves a cursor that must name a stored pair.
    fn live<S>(&self, cursor: Cursor<S>, op: &str) -> usize where S: Side {
        match cursor.handle() {
            None => panic!("{}: the {} cursor is at the end", op, S::NAME),
            Some(handle) => match self.arena.resolve(handle) {
                Some(slot) => slot,
                None => panic!("{}: the {} cursor's pair has been removed", op, S::NAME),
            },
        }
    }

    fn retreat<S>(&self, cursor: Cursor<S>, last: Option<usize>, op: &str) -> Cursor<S>
        where S: Side {

        let prev = match cursor.handle() {
            None => last,
            Some(_) => tree::prev::<S, _, _, _>(&self.arena, self.live(cursor, op)),
        };

        match prev {
            Some(slot) => Cursor::at(self.arena.handle(slot)),
            None => panic!("{}: the {} cursor is at the first position", op, S::NAME),
        }
    }
}

impl<L, R, CL, CR, B> Clone for BiMap<L, R, CL, CR, B>
    where L: Clone, R: Clone, CL: Compare<L> + Clone, CR: Compare<R> + Clone, B: Balance {

    fn clone(&self) -> Self {
        let mut map = BiMap::with_cmp(self.left.cmp().clone(), self.right.cmp().clone());
        map.extend(self.iter().map(|(l, r)| (l.clone(), r.clone())));
        map
    }
}

impl<L, R, CL, CR, B> Debug for BiMap<L, R, CL, CR, B>
    where L: Debug, R: Debug, CL: Compare<L>, CR: Compare<R>, B: Balance {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;

        let mut it = self.iter();

        if let Some((l, r)) = it.next() {
            write!(f, "{:?} <-> {:?}", l, r)?;
            for (l, r) in it { write!(f, ", {:?} <-> {:?}", l, r)?; }
        }

        write!(f, "}}")
    }
}

impl<L, R, CL, CR, B> Default for BiMap<L, R, CL, CR, B>
    where CL: Compare<L> + Default, CR: Compare<R> + Default, B: Balance {

    fn default() -> Self { BiMap::with_cmp(Default::default(), Default::default()) }
}

impl<L, R, CL, CR, B> Extend<(L, R)> for BiMap<L, R, CL, CR, B>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {

    fn extend<I: IntoIterator<Item=(L, R)>>(&mut self, it: I) {
        for (l, r) in it { self.insert(l, r); }
    }
}

impl<L, R, CL, CR, B> FromIterator<(L, R)> for BiMap<L, R, CL, CR, B>
    where CL: Compare<L> + Default, CR: Compare<R> + Default, B: Balance {

    fn from_iter<I: IntoIterator<Item=(L, R)>>(it: I) -> Self {
        let mut map: Self = Default::default();
        map.extend(it);
        map
    }
}

/// Only naturally ordered maps are hashable, since a custom comparator may treat unequal values as
/// equal.
impl<L, R, B> Hash for BiMap<L, R, Natural<L>, Natural<R>, B>
    where L: Hash + Ord, R: Hash + Ord, B: Balance {

    fn hash<H: hash::Hasher>(&self, h: &mut H) {
        for e in self.iter() { e.hash(h); }
    }
}

impl<'a, L, R, CL, CR, B> IntoIterator for &'a BiMap<L, R, CL, CR, B>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {

    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, Left, L, R, B>;
    fn into_iter(self) -> Iter<'a, Left, L, R, B> { self.iter() }
}

impl<L, R, CL, CR, B> IntoIterator for BiMap<L, R, CL, CR, B>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {

    type Item = (L, R);
    type IntoIter = IntoIter<L, R, B>;
    fn into_iter(self) -> IntoIter<L, R, B> { self.into_iter() }
}

/// Two maps are equal when they hold the same number of pairs and, in left order, each pair's
/// values compare equal to the other map's under this map's comparators.
impl<L, R, CL, CR, B> PartialEq for BiMap<L, R, CL, CR, B>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {

    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| {
            self.left.cmp().compares_eq(a.0, b.0) && self.right.cmp().compares_eq(a.1, b.1)
        })
    }
}

impl<L, R, CL, CR, B> Eq for BiMap<L, R, CL, CR, B>
    where CL: Compare<L>, CR: Compare<R>, B: Balance {}

/// An iterator over the map's pairs in the order of one side.
///
/// Each item holds the ordering side's value first. Acquire through
/// [`BiMap::iter`](struct.BiMap.html#method.iter) (left order),
/// [`BiMap::iter_right`](struct.BiMap.html#method.iter_right) (right order), or the
/// `IntoIterator` trait.
pub struct Iter<'a, S, L: 'a, R: 'a, B: 'a> {
    arena: &'a Arena<L, R, B>,
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
    _side: PhantomData<fn() -> S>,
}

impl<'a, S, L, R, B> Iter<'a, S, L, R, B> {
    fn new(arena: &'a Arena<L, R, B>, front: Option<usize>, back: Option<usize>, len: usize)
        -> Self {

        Iter { arena: arena, front: front, back: back, len: len, _side: PhantomData }
    }
}

impl<'a, S, L, R, B> Clone for Iter<'a, S, L, R, B> {
    fn clone(&self) -> Self { Iter::new(self.arena, self.front, self.back, self.len) }
}

impl<'a, S, L, R, B> Iterator for Iter<'a, S, L, R, B> where S: Facet<L, R> {
    type Item = (&'a S::Key, &'a S::Other);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        let slot = self.front?;
        self.len -= 1;
        self.front = tree::next::<S, _, _, _>(self.arena, slot);
        let (l, r) = self.arena.pair(slot);
        Some(S::split(l, r))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.len, Some(self.len)) }
}

impl<'a, S, L, R, B> DoubleEndedIterator for Iter<'a, S, L, R, B> where S: Facet<L, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 { return None; }
        let slot = self.back?;
        self.len -= 1;
        self.back = tree::prev::<S, _, _, _>(self.arena, slot);
        let (l, r) = self.arena.pair(slot);
        Some(S::split(l, r))
    }
}

impl<'a, S, L, R, B> ExactSizeIterator for Iter<'a, S, L, R, B> where S: Facet<L, R> {}

impl<'a, S, L, R, B> iter::FusedIterator for Iter<'a, S, L, R, B> where S: Facet<L, R> {}

/// An iterator over one side's values in ascending order.
///
/// Acquire through [`BiMap::left_values`](struct.BiMap.html#method.left_values) or
/// [`BiMap::right_values`](struct.BiMap.html#method.right_values).
pub struct Values<'a, S, L: 'a, R: 'a, B: 'a>(Iter<'a, S, L, R, B>);

impl<'a, S, L, R, B> Clone for Values<'a, S, L, R, B> {
    fn clone(&self) -> Self { Values(self.0.clone()) }
}

impl<'a, S, L, R, B> Iterator for Values<'a, S, L, R, B> where S: Facet<L, R> {
    type Item = &'a S::Key;
    fn next(&mut self) -> Option<&'a S::Key> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, S, L, R, B> DoubleEndedIterator for Values<'a, S, L, R, B> where S: Facet<L, R> {
    fn next_back(&mut self) -> Option<&'a S::Key> { self.0.next_back().map(|e| e.0) }
}

impl<'a, S, L, R, B> ExactSizeIterator for Values<'a, S, L, R, B> where S: Facet<L, R> {}

/// An iterator that consumes the map, yielding its pairs in ascending order of their left values.
///
/// Acquire through [`BiMap::into_iter`](struct.BiMap.html#method.into_iter) or the
/// `IntoIterator` trait.
pub struct IntoIter<L, R, B> {
    arena: Arena<L, R, B>,
    order: VecDeque<usize>,
}

impl<L, R, B> Iterator for IntoIter<L, R, B> {
    type Item = (L, R);

    fn next(&mut self) -> Option<(L, R)> {
        self.order.pop_front().map(|slot| self.arena.free(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.order.len(), Some(self.order.len())) }
}

impl<L, R, B> DoubleEndedIterator for IntoIter<L, R, B> {
    fn next_back(&mut self) -> Option<(L, R)> {
        self.order.pop_back().map(|slot| self.arena.free(slot))
    }
}

impl<L, R, B> ExactSizeIterator for IntoIter<L, R, B> {}
