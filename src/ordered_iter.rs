use ::ordered_iter::{OrderedMapIterator, OrderedSetIterator};
use super::map;
use super::node::{Left, Right};

impl<L, R, B> OrderedMapIterator for map::IntoIter<L, R, B> where L: Ord {
    type Key = L;
    type Val = R;
}

impl<'a, L, R, B> OrderedMapIterator for map::Iter<'a, Left, L, R, B> where L: Ord {
    type Key = &'a L;
    type Val = &'a R;
}

impl<'a, L, R, B> OrderedMapIterator for map::Iter<'a, Right, L, R, B> where R: Ord {
    type Key = &'a R;
    type Val = &'a L;
}

impl<'a, L, R, B> OrderedSetIterator for map::Values<'a, Left, L, R, B> where L: Ord {}

impl<'a, L, R, B> OrderedSetIterator for map::Values<'a, Right, L, R, B> where R: Ord {}
