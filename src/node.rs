//! Per-side node records and the side tags that select them.

/// One side of a bidirectional map.
///
/// Each stored pair is linked into two trees, one per side. The side tag selects which tree a
/// cursor or iterator walks and which half of the pair is treated as its key.
///
/// This trait is sealed; `Left` and `Right` are its only implementations.
pub trait Side: sealed::Sealed + 'static {
    /// The other side of the map.
    type Opposite: Side<Opposite = Self>;

    /// A lowercase name for the side, used in messages.
    const NAME: &'static str;

    #[doc(hidden)]
    const INDEX: usize;
}

/// The left side of a bidirectional map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Left {}

/// The right side of a bidirectional map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Right {}

impl Side for Left {
    type Opposite = Right;
    const NAME: &'static str = "left";
    const INDEX: usize = 0;
}

impl Side for Right {
    type Opposite = Left;
    const NAME: &'static str = "right";
    const INDEX: usize = 1;
}

/// Views a `(L, R)` pair from one side: the side's own value is the key, the other is the value
/// paired with it.
pub trait Facet<L, R>: Side {
    /// The value type ordered by this side's tree.
    type Key;

    /// The value type on the opposite side.
    type Other;

    /// Splits a pair into this side's key and the opposite value.
    fn split<'a>(left: &'a L, right: &'a R) -> (&'a Self::Key, &'a Self::Other);
}

impl<L, R> Facet<L, R> for Left {
    type Key = L;
    type Other = R;

    fn split<'a>(left: &'a L, right: &'a R) -> (&'a L, &'a R) { (left, right) }
}

impl<L, R> Facet<L, R> for Right {
    type Key = R;
    type Other = L;

    fn split<'a>(left: &'a L, right: &'a R) -> (&'a R, &'a L) { (right, left) }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Left {}
    impl Sealed for super::Right {}
}

/// The child slot a vacant position hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Child {
    Left,
    Right,
}

/// A node's position in one side's tree.
///
/// The links are meaningful only while the owning record is linked into that tree. The record's
/// other facet lives next to this one in the same arena slot, so crossing sides never needs a
/// stored pointer.
#[derive(Clone, Debug)]
pub struct Links<B> {
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub balance: B,
}

impl<B> Default for Links<B> where B: Default {
    fn default() -> Self {
        Links { parent: None, left: None, right: None, balance: B::default() }
    }
}

impl<B> Links<B> {
    /// Returns the link to the given child.
    pub fn child(&self, child: Child) -> Option<usize> {
        match child {
            Child::Left => self.left,
            Child::Right => self.right,
        }
    }

    /// Returns a mutable reference to the link to the given child.
    pub fn child_mut(&mut self, child: Child) -> &mut Option<usize> {
        match child {
            Child::Left => &mut self.left,
            Child::Right => &mut self.right,
        }
    }
}
