use compare::{self, Natural};
use ::quickcheck::{Arbitrary, Gen, TestResult, quickcheck};
use rand::Rng;
use rand::seq::SliceRandom;
use crate::arena::Arena;
use crate::balance::{Aa, Balance, Unbalanced};
use crate::node::Left;
use super::{Tree, next, prev};

type Ints<B> = (Tree<Left, Natural<u32>>, Arena<u32, u32, B>);

fn empty<B>() -> Ints<B> { (Tree::new(compare::natural()), Arena::new()) }

fn insert<B>(ints: &mut Ints<B>, key: u32) -> Option<usize> where B: Balance {
    let (ref mut tree, ref mut arena) = *ints;
    let handle = arena.alloc(key, key);

    match tree.insert(arena, handle.slot) {
        Some(slot) => Some(slot),
        None => { arena.free(handle.slot); None }
    }
}

fn remove<B>(ints: &mut Ints<B>, key: u32) -> Option<usize> where B: Balance {
    let (ref mut tree, ref mut arena) = *ints;
    let slot = tree.find(arena, &key)?;
    let succ = tree.remove(arena, slot);
    arena.free(slot);
    succ
}

fn keys<B>(ints: &Ints<B>) -> Vec<u32> {
    let (ref tree, ref arena) = *ints;
    let mut keys = vec![];
    let mut link = tree.first(arena);

    while let Some(node) = link {
        keys.push(*arena.key::<Left>(node));
        link = next::<Left, _, _, _>(arena, node);
    }

    keys
}

/// An operation on a tree of integers.
#[derive(Clone, Debug)]
enum Op {
    /// Insert a key into the tree.
    Insert(u32),
    /// Remove the key at index `n % tree.len()` from the tree.
    Remove(usize),
}

impl Arbitrary for Op {
    fn arbitrary(gen: &mut Gen) -> Op {
        if bool::arbitrary(gen) {
            Op::Insert(Arbitrary::arbitrary(gen))
        } else {
            Op::Remove(Arbitrary::arbitrary(gen))
        }
    }
}

impl Op {
    /// Perform the operation on the given tree.
    fn exec<B>(self, ints: &mut Ints<B>) where B: Balance {
        match self {
            Op::Insert(key) => { insert(ints, key); }
            Op::Remove(index) => if !ints.0.is_empty() {
                let key = keys(ints)[index % ints.0.len()];
                remove(ints, key);
            },
        }
    }
}

#[test]
fn test_andersson() {
    fn check(ops: Vec<Op>) -> TestResult {
        let mut ints = empty::<Aa>();
        for op in ops { op.exec(&mut ints); }
        ints.0.validate(&ints.1);
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_unbalanced_links() {
    fn check(ops: Vec<Op>) -> TestResult {
        let mut ints = empty::<Unbalanced>();
        for op in ops { op.exec(&mut ints); }
        ints.0.validate(&ints.1);
        TestResult::passed()
    }

    quickcheck(check as fn(_) -> _);
}

#[test]
fn test_sorted_input_stays_shallow() {
    let mut ints = empty::<Aa>();
    for key in 0..1024 { insert(&mut ints, key); }
    ints.0.validate(&ints.1);

    fn height(arena: &Arena<u32, u32, Aa>, link: Option<usize>) -> usize {
        link.map_or(0, |node| {
            let links = arena.links::<Left>(node);
            1 + height(arena, links.left).max(height(arena, links.right))
        })
    }

    // an AA tree is at most twice as tall as a perfect one
    assert!(height(&ints.1, ints.0.root) <= 2 * 11);
}

#[test]
fn test_unbalanced_sorted_input_is_a_chain() {
    let mut ints = empty::<Unbalanced>();
    for key in 0..8 { insert(&mut ints, key); }

    let (ref tree, ref arena) = ints;
    let mut link = tree.root;
    let mut expected = 0;

    while let Some(node) = link {
        assert_eq!(*arena.key::<Left>(node), expected);
        assert_eq!(arena.links::<Left>(node).left, None);
        link = arena.links::<Left>(node).right;
        expected += 1;
    }

    assert_eq!(expected, 8);
}

#[test]
fn test_insert_rejects_equal_key() {
    let mut ints = empty::<Aa>();
    assert!(insert(&mut ints, 5).is_some());
    assert!(insert(&mut ints, 5).is_none());
    assert_eq!(ints.0.len(), 1);
    assert_eq!(ints.1.len(), 1);
}

#[test]
fn test_remove_returns_successor() {
    let mut ints = empty::<Aa>();
    for &key in &[4, 2, 6, 1, 3, 5, 7] { insert(&mut ints, key); }

    for &(key, succ) in &[(4, Some(5)), (1, Some(2)), (7, None), (2, Some(3))] {
        let succ_slot = remove(&mut ints, key);
        assert_eq!(succ_slot.map(|slot| *ints.1.key::<Left>(slot)), succ);
        ints.0.validate(&ints.1);
    }

    assert_eq!(keys(&ints), [3, 5, 6]);
}

#[test]
fn test_remove_keeps_slots() {
    let mut rng = rand::thread_rng();
    let mut ints = empty::<Aa>();
    let mut live = vec![];

    for _ in 0..500 {
        let key = rng.gen_range(0..10_000);
        if let Some(slot) = insert(&mut ints, key) { live.push((key, slot)); }
    }

    live.shuffle(&mut rng);
    let keep = live.split_off(live.len() / 2);

    for &(key, _) in &live { remove(&mut ints, key); }
    ints.0.validate(&ints.1);

    for &(key, slot) in &keep {
        assert_eq!(ints.0.find(&ints.1, &key), Some(slot));
        assert_eq!(*ints.1.key::<Left>(slot), key);
    }

    assert_eq!(ints.0.len(), keep.len());
}

#[test]
fn test_bounds() {
    let mut ints = empty::<Aa>();
    for &key in &[10, 20, 30] { insert(&mut ints, key); }

    let (ref tree, ref arena) = ints;
    let key = |link: Option<usize>| link.map(|node| *arena.key::<Left>(node));

    assert_eq!(key(tree.lower_bound(arena, &5)), Some(10));
    assert_eq!(key(tree.lower_bound(arena, &20)), Some(20));
    assert_eq!(key(tree.lower_bound(arena, &21)), Some(30));
    assert_eq!(key(tree.lower_bound(arena, &31)), None);

    assert_eq!(key(tree.upper_bound(arena, &5)), Some(10));
    assert_eq!(key(tree.upper_bound(arena, &20)), Some(30));
    assert_eq!(key(tree.upper_bound(arena, &30)), None);
}

#[test]
fn test_step_both_ways() {
    fn check(keys_in: Vec<u32>) -> bool {
        let mut ints = empty::<Aa>();
        for key in keys_in { insert(&mut ints, key); }

        let (ref tree, ref arena) = ints;
        let mut backward = vec![];
        let mut link = tree.last(arena);

        while let Some(node) = link {
            backward.push(*arena.key::<Left>(node));
            link = prev::<Left, _, _, _>(arena, node);
        }

        backward.reverse();
        backward == keys(&ints)
    }

    quickcheck(check as fn(_) -> _);
}
