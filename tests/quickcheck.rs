use bitree::{Aa, Balance, BiMap, Cursor, Left, Right, Unbalanced};
use compare::Natural;
use quickcheck::{Arbitrary, Gen, TestResult};

// Narrow value types, so that arbitrary inserts collide on both sides.
pub type Map<B> = BiMap<u8, i8, Natural<u8>, Natural<i8>, B>;

/// An operation on a map, mirrored on a vector of the pairs the map should hold.
#[derive(Clone, Debug)]
pub enum Op {
    Insert(u8, i8),
    /// Erase through a left cursor reached by stepping `n % len` times from the first pair.
    EraseLeft(usize),
    /// Erase through a right cursor reached by stepping `n % len` times from the first pair.
    EraseRight(usize),
    RemoveLeft(u8),
    TakeRight(i8),
    AtLeftOrDefault(u8),
    AtRightOrDefault(i8),
    /// Erase the left positions between two indices, either of which may be the end.
    EraseLeftRange(usize, usize),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Self {
        match u8::arbitrary(gen) % 10 {
            0 ..= 2 => Op::Insert(u8::arbitrary(gen), i8::arbitrary(gen)),
            3 => Op::EraseLeft(usize::arbitrary(gen)),
            4 => Op::EraseRight(usize::arbitrary(gen)),
            5 => Op::RemoveLeft(u8::arbitrary(gen)),
            6 => Op::TakeRight(i8::arbitrary(gen)),
            7 => Op::AtLeftOrDefault(u8::arbitrary(gen)),
            8 => Op::AtRightOrDefault(i8::arbitrary(gen)),
            _ => Op::EraseLeftRange(usize::arbitrary(gen), usize::arbitrary(gen)),
        }
    }
}

fn left_cursor<B>(map: &Map<B>, n: usize) -> Cursor<Left> where B: Balance {
    let mut cursor = map.begin_left();
    for _ in 0..n { cursor = map.next_left(cursor); }
    cursor
}

fn right_cursor<B>(map: &Map<B>, n: usize) -> Cursor<Right> where B: Balance {
    let mut cursor = map.begin_right();
    for _ in 0..n { cursor = map.next_right(cursor); }
    cursor
}

fn pair<L: Copy, R: Copy>(e: Option<(&L, &R)>) -> Option<(L, R)> { e.map(|(&l, &r)| (l, r)) }

impl Op {
    /// Performs the operation on the map and the model, asserting that their results agree.
    fn exec<B>(self, map: &mut Map<B>, model: &mut Vec<(u8, i8)>) where B: Balance {
        model.sort();

        match self {
            Op::Insert(l, r) => {
                let fresh = model.iter().all(|e| e.0 != l && e.1 != r);
                let cursor = map.insert(l, r);
                assert_eq!(cursor.is_end(), !fresh);
                if fresh {
                    assert_eq!(pair(map.get(cursor)), Some((l, r)));
                    model.push((l, r));
                }
            }
            Op::EraseLeft(n) => if !model.is_empty() {
                let n = n % model.len();
                let cursor = left_cursor(map, n);
                let next = map.erase_left(cursor);
                let (l, r) = model.remove(n);
                assert!(map.find_left(&l).is_end() && map.find_right(&r).is_end());
                assert!(!map.is_valid(cursor) && !map.is_valid(cursor.flip()));
                assert_eq!(pair(map.get(next)), model.get(n).cloned());
            },
            Op::EraseRight(n) => if !model.is_empty() {
                model.sort_by_key(|e| e.1);
                let n = n % model.len();
                let cursor = right_cursor(map, n);
                let next = map.erase_right(cursor);
                let (l, r) = model.remove(n);
                assert!(map.find_left(&l).is_end() && map.find_right(&r).is_end());
                assert_eq!(pair(map.get(next)), model.get(n).cloned());
            },
            Op::RemoveLeft(l) => {
                let index = model.iter().position(|e| e.0 == l);
                assert_eq!(map.remove_left(&l), index.is_some());
                if let Some(index) = index { model.remove(index); }
            }
            Op::TakeRight(r) => {
                let expected = model.iter().position(|e| e.1 == r).map(|index| model.remove(index));
                assert_eq!(map.take_right(&r), expected);
            }
            Op::AtLeftOrDefault(l) => {
                let expected = match model.iter().find(|e| e.0 == l) {
                    Some(e) => e.1,
                    None => {
                        model.retain(|e| e.1 != 0);
                        model.push((l, 0));
                        0
                    }
                };
                assert_eq!(*map.at_left_or_default(l), expected);
            }
            Op::AtRightOrDefault(r) => {
                let expected = match model.iter().find(|e| e.1 == r) {
                    Some(e) => e.0,
                    None => {
                        model.retain(|e| e.0 != 0);
                        model.push((0, r));
                        0
                    }
                };
                assert_eq!(*map.at_right_or_default(r), expected);
            }
            Op::EraseLeftRange(i, j) => {
                let (i, j) = (i % (model.len() + 1), j % (model.len() + 1));
                let (first, last) = (i.min(j), i.max(j));
                let last_cursor = left_cursor(map, last);
                let first_cursor = left_cursor(map, first);
                assert_eq!(map.erase_left_range(first_cursor, last_cursor), last_cursor);
                model.drain(first..last);
            }
        }
    }
}

pub fn agrees_with_model<B>(ops: Vec<Op>) -> bool where B: Balance {
    let mut map = Map::<B>::default();
    let mut model = vec![];

    for op in ops {
        op.exec(&mut map, &mut model);
        map.validate();

        model.sort();
        let lefts: Vec<_> = map.iter().map(|(&l, &r)| (l, r)).collect();
        if lefts != model { return false; }

        model.sort_by_key(|e| e.1);
        let rights: Vec<_> = map.iter_right().map(|(&r, &l)| (l, r)).collect();
        if rights != model { return false; }
    }

    map.len() == model.len()
}

pub fn values_are_unique<B>(map: Map<B>) -> bool where B: Balance {
    map.validate();

    let lefts: Vec<_> = map.left_values().collect();
    let rights: Vec<_> = map.right_values().collect();

    lefts.len() == map.len() && rights.len() == map.len() &&
    lefts.windows(2).all(|w| w[0] < w[1]) &&
    rights.windows(2).all(|w| w[0] < w[1])
}

pub fn flips_to_partner<B>(map: Map<B>) -> bool where B: Balance {
    map.end_left().flip() == map.end_right() &&
    map.end_right().flip() == map.end_left() &&
    map.iter().all(|(l, r)| {
        let left = map.find_left(l);
        let right = map.find_right(r);

        left.flip() == right && right.flip() == left && left.flip().flip() == left &&
        map.get(right) == Some((l, r))
    })
}

pub fn left_bounds_agree_with_iter<B>(map: Map<B>, key: u8) -> bool where B: Balance {
    map.left_of(map.lower_bound_left(&key)) == map.left_values().find(|&&l| l >= key) &&
    map.left_of(map.upper_bound_left(&key)) == map.left_values().find(|&&l| l > key)
}

pub fn right_bounds_agree_with_iter<B>(map: Map<B>, key: i8) -> bool where B: Balance {
    map.right_of(map.lower_bound_right(&key)) == map.right_values().find(|&&r| r >= key) &&
    map.right_of(map.upper_bound_right(&key)) == map.right_values().find(|&&r| r > key)
}

pub fn erase_is_atomic<B>(mut map: Map<B>, index: usize) -> TestResult where B: Balance {
    if map.is_empty() { return TestResult::discard(); }

    let (r, l) = match map.iter_right().nth(index % map.len()) {
        Some((&r, &l)) => (r, l),
        None => return TestResult::failed(),
    };

    let old_len = map.len();
    let cursor = map.find_right(&r);
    map.erase_right(cursor);

    TestResult::from_bool(
        map.len() == old_len - 1 &&
        map.find_left(&l).is_end() &&
        map.find_right(&r).is_end() &&
        !map.is_valid(cursor.flip())
    )
}

pub fn stale_after_slot_reuse<B>(mut map: Map<B>, l: u8, r: i8) -> TestResult where B: Balance {
    let old = map.insert(l, r);
    if old.is_end() { return TestResult::discard(); }

    map.erase_left(old);
    let new = map.insert(l, r);

    TestResult::from_bool(
        !map.is_valid(old) &&
        map.get(old).is_none() &&
        map.get(new) == Some((&l, &r)) &&
        new != old
    )
}

pub fn cursors_walk_backward<B>(map: Map<B>) -> bool where B: Balance {
    let mut seen = vec![];
    let mut cursor = map.end_left();

    while cursor != map.begin_left() {
        cursor = map.prev_left(cursor);
        seen.extend(map.get(cursor));
    }

    seen.into_iter().eq(map.iter().rev())
}

pub fn clones_and_drains_in_order<B>(map: Map<B>) -> bool where B: Balance {
    let clone = map.clone();
    let pairs: Vec<_> = map.iter().map(|(&l, &r)| (l, r)).collect();

    clone == map && map.into_iter().collect::<Vec<_>>() == pairs
}

macro_rules! properties {
    ($name:ident, $B:ty) => {
        mod $name {
            use quickcheck::{TestResult, quickcheck};
            use super::{Map, Op};

            #[test]
            fn agrees_with_model() {
                quickcheck(super::agrees_with_model::<$B> as fn(Vec<Op>) -> bool);
            }

            #[test]
            fn values_are_unique() {
                quickcheck(super::values_are_unique::<$B> as fn(Map<$B>) -> bool);
            }

            #[test]
            fn flips_to_partner() {
                quickcheck(super::flips_to_partner::<$B> as fn(Map<$B>) -> bool);
            }

            #[test]
            fn left_bounds_agree_with_iter() {
                quickcheck(super::left_bounds_agree_with_iter::<$B> as fn(Map<$B>, u8) -> bool);
            }

            #[test]
            fn right_bounds_agree_with_iter() {
                quickcheck(super::right_bounds_agree_with_iter::<$B> as fn(Map<$B>, i8) -> bool);
            }

            #[test]
            fn erase_is_atomic() {
                quickcheck(super::erase_is_atomic::<$B> as fn(Map<$B>, usize) -> TestResult);
            }

            #[test]
            fn stale_after_slot_reuse() {
                quickcheck(super::stale_after_slot_reuse::<$B> as fn(Map<$B>, u8, i8) -> TestResult);
            }

            #[test]
            fn cursors_walk_backward() {
                quickcheck(super::cursors_walk_backward::<$B> as fn(Map<$B>) -> bool);
            }

            #[test]
            fn clones_and_drains_in_order() {
                quickcheck(super::clones_and_drains_in_order::<$B> as fn(Map<$B>) -> bool);
            }
        }
    }
}

properties!{aa, super::Aa}
properties!{unbalanced, super::Unbalanced}
