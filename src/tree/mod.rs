//! An intrusive binary search tree over one side of the arena.
//!
//! The tree never owns or allocates records. It threads one facet of each record through its
//! `Links`, so records keep their slots for their whole lifetime and a cursor to one record stays
//! valid while others are linked, unlinked, or rotated around it.

#[cfg(test)]
mod test;

use compare::Compare;
use std::cmp::Ordering::*;
use std::marker::PhantomData;
use super::arena::Arena;
use super::balance::{Balance, Nodes, NodesMut};
use super::node::{Child, Facet, Links, Side};

/// The outcome of searching a tree for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Search {
    /// A node with an equal key.
    Found(usize),
    /// The position a node with the key would occupy.
    Vacant(Vacant),
}

/// An empty child slot, valid until the tree is next modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vacant {
    parent: Option<usize>,
    child: Child,
}

pub struct Tree<S, C> {
    root: Option<usize>,
    len: usize,
    cmp: C,
    _side: PhantomData<fn() -> S>,
}

impl<S, C> Tree<S, C> where S: Side {
    pub fn new(cmp: C) -> Self {
        Tree { root: None, len: 0, cmp: cmp, _side: PhantomData }
    }

    pub fn is_empty(&self) -> bool { self.root.is_none() }

    pub fn len(&self) -> usize { self.len }

    pub fn cmp(&self) -> &C { &self.cmp }

    /// Forgets every node. The caller is responsible for the records themselves.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn search<L, R, B, Q: ?Sized>(&self, arena: &Arena<L, R, B>, key: &Q) -> Search
        where S: Facet<L, R>, C: Compare<Q, S::Key> {

        let mut vacant = Vacant { parent: None, child: Child::Left };
        let mut link = self.root;

        while let Some(node) = link {
            vacant.child = match self.cmp.compare(key, arena.key::<S>(node)) {
                Equal => return Search::Found(node),
                Less => Child::Left,
                Greater => Child::Right,
            };
            vacant.parent = Some(node);
            link = arena.links::<S>(node).child(vacant.child);
        }

        Search::Vacant(vacant)
    }

    pub fn find<L, R, B, Q: ?Sized>(&self, arena: &Arena<L, R, B>, key: &Q) -> Option<usize>
        where S: Facet<L, R>, C: Compare<Q, S::Key> {

        match self.search(arena, key) {
            Search::Found(node) => Some(node),
            Search::Vacant(_) => None,
        }
    }

    /// Links the node as a new leaf at the vacant position and rebalances the path above it.
    pub fn link<L, R, B>(&mut self, arena: &mut Arena<L, R, B>, node: usize, vacant: Vacant)
        where B: Balance {

        *arena.links_mut::<S>(node) = Links { parent: vacant.parent, ..Links::default() };

        let mut facets = FacetsMut::<S, _, _, _>::new(arena, &mut self.root);

        match vacant.parent {
            None => *facets.root = Some(node),
            Some(parent) => *facets.links_mut(parent).child_mut(vacant.child) = Some(node),
        }

        let mut link = Some(node);
        while let Some(node) = link {
            let node = B::rebalance_insert(&mut facets, node);
            link = facets.links(node).parent;
        }

        self.len += 1;
        trace_log!(side = S::NAME, node, len = self.len, "linked");
    }

    /// Links the node into the tree, or returns `None` without modifying the tree if a node with
    /// an equal key is already present.
    #[cfg(test)]
    pub fn insert<L, R, B>(&mut self, arena: &mut Arena<L, R, B>, node: usize) -> Option<usize>
        where S: Facet<L, R>, C: Compare<S::Key>, B: Balance {

        let search = {
            let arena = &*arena;
            self.search(arena, arena.key::<S>(node))
        };

        match search {
            Search::Found(_) => None,
            Search::Vacant(vacant) => {
                self.link(arena, node, vacant);
                Some(node)
            }
        }
    }

    /// Unlinks the node from the tree and returns its in-order successor.
    ///
    /// A node with two children is replaced by its successor rather than swapping contents, so
    /// every other record stays in its slot.
    pub fn remove<L, R, B>(&mut self, arena: &mut Arena<L, R, B>, node: usize) -> Option<usize>
        where B: Balance {

        let succ = next::<S, _, _, _>(arena, node);
        let Links { parent, left, right, balance } =
            std::mem::take(arena.links_mut::<S>(node));

        let mut facets = FacetsMut::<S, _, _, _>::new(arena, &mut self.root);

        let start = match (left, right) {
            (Some(left), Some(right)) => {
                let heir = min::<S, _, _, _>(facets.arena, right);
                let heir_parent = facets.links(heir).parent;

                let start = if heir == right {
                    Some(heir)
                } else {
                    let heir_right = facets.links(heir).right;
                    facets.replace_child(heir_parent, heir, heir_right);
                    facets.links_mut(heir).right = Some(right);
                    facets.links_mut(right).parent = Some(heir);
                    heir_parent
                };

                facets.links_mut(heir).left = Some(left);
                facets.links_mut(left).parent = Some(heir);
                facets.links_mut(heir).balance = balance;
                facets.replace_child(parent, node, Some(heir));
                start
            }
            (child, None) | (None, child) => {
                facets.replace_child(parent, node, child);
                parent
            }
        };

        let mut link = start;
        while let Some(node) = link {
            let node = B::rebalance_remove(&mut facets, node);
            link = facets.links(node).parent;
        }

        self.len -= 1;
        trace_log!(side = S::NAME, node, len = self.len, "unlinked");
        succ
    }

    pub fn first<L, R, B>(&self, arena: &Arena<L, R, B>) -> Option<usize> {
        self.root.map(|root| min::<S, _, _, _>(arena, root))
    }

    pub fn last<L, R, B>(&self, arena: &Arena<L, R, B>) -> Option<usize> {
        self.root.map(|root| max::<S, _, _, _>(arena, root))
    }

    /// Returns the first node whose key is not less than the given key.
    pub fn lower_bound<L, R, B, Q: ?Sized>(&self, arena: &Arena<L, R, B>, key: &Q)
        -> Option<usize> where S: Facet<L, R>, C: Compare<Q, S::Key> {

        self.bound(arena, |node| self.cmp.compares_le(key, arena.key::<S>(node)))
    }

    /// Returns the first node whose key is greater than the given key.
    pub fn upper_bound<L, R, B, Q: ?Sized>(&self, arena: &Arena<L, R, B>, key: &Q)
        -> Option<usize> where S: Facet<L, R>, C: Compare<Q, S::Key> {

        self.bound(arena, |node| self.cmp.compares_lt(key, arena.key::<S>(node)))
    }

    // Finds the first node satisfying a predicate that holds for a suffix of the in-order
    // sequence.
    fn bound<L, R, B, F>(&self, arena: &Arena<L, R, B>, above: F) -> Option<usize>
        where F: Fn(usize) -> bool {

        let mut closest = None;
        let mut link = self.root;

        while let Some(node) = link {
            let links = arena.links::<S>(node);
            link = if above(node) {
                closest = Some(node);
                links.left
            } else {
                links.right
            };
        }

        closest
    }

    /// Panics if the tree's links, order, length, or balance are inconsistent.
    pub fn validate<L, R, B>(&self, arena: &Arena<L, R, B>)
        where S: Facet<L, R>, C: Compare<S::Key>, B: Balance {

        if let Some(root) = self.root {
            assert!(arena.links::<S>(root).parent.is_none(), "{} root has a parent", S::NAME);
        }

        let facets = Facets::<S, _, _, _>::new(arena);
        let mut len = 0;
        let mut prev = None;
        let mut link = self.first(arena);

        while let Some(node) = link {
            let links = arena.links::<S>(node);

            for &child in links.left.iter().chain(links.right.iter()) {
                assert!(arena.links::<S>(child).parent == Some(node),
                        "{} node {} is not its child's parent", S::NAME, node);
            }

            if let Some(prev) = prev {
                assert!(self.cmp.compares_lt(arena.key::<S>(prev), arena.key::<S>(node)),
                        "{} tree is out of order at node {}", S::NAME, node);
            }

            B::validate(&facets, node);

            len += 1;
            prev = Some(node);
            link = next::<S, _, _, _>(arena, node);
        }

        assert!(len == self.len, "{} tree holds {} nodes but counts {}", S::NAME, len, self.len);
    }
}

/// Returns the node with the least key in the subtree rooted at the given node.
pub fn min<S, L, R, B>(arena: &Arena<L, R, B>, mut node: usize) -> usize where S: Side {
    while let Some(left) = arena.links::<S>(node).left { node = left; }
    node
}

/// Returns the node with the greatest key in the subtree rooted at the given node.
pub fn max<S, L, R, B>(arena: &Arena<L, R, B>, mut node: usize) -> usize where S: Side {
    while let Some(right) = arena.links::<S>(node).right { node = right; }
    node
}

/// Returns the node's in-order successor.
pub fn next<S, L, R, B>(arena: &Arena<L, R, B>, node: usize) -> Option<usize> where S: Side {
    neighbor::<S, L, R, B>(arena, node, Child::Right)
}

/// Returns the node's in-order predecessor.
pub fn prev<S, L, R, B>(arena: &Arena<L, R, B>, node: usize) -> Option<usize> where S: Side {
    neighbor::<S, L, R, B>(arena, node, Child::Left)
}

fn neighbor<S, L, R, B>(arena: &Arena<L, R, B>, mut node: usize, toward: Child) -> Option<usize>
    where S: Side {

    if let Some(child) = arena.links::<S>(node).child(toward) {
        return Some(match toward {
            Child::Right => min::<S, L, R, B>(arena, child),
            Child::Left => max::<S, L, R, B>(arena, child),
        });
    }

    // climb until we leave a subtree hanging on the opposite side
    while let Some(parent) = arena.links::<S>(node).parent {
        if arena.links::<S>(parent).child(toward) != Some(node) { return Some(parent); }
        node = parent;
    }

    None
}

struct Facets<'a, S, L: 'a, R: 'a, B: 'a> {
    arena: &'a Arena<L, R, B>,
    _side: PhantomData<fn() -> S>,
}

impl<'a, S, L, R, B> Facets<'a, S, L, R, B> {
    fn new(arena: &'a Arena<L, R, B>) -> Self { Facets { arena: arena, _side: PhantomData } }
}

impl<'a, S, L, R, B> Nodes for Facets<'a, S, L, R, B> where S: Side, B: Balance {
    type Balance = B;

    fn balance(&self, node: usize) -> &B { &self.arena.links::<S>(node).balance }
    fn left(&self, node: usize) -> Option<usize> { self.arena.links::<S>(node).left }
    fn right(&self, node: usize) -> Option<usize> { self.arena.links::<S>(node).right }
}

struct FacetsMut<'a, S, L: 'a, R: 'a, B: 'a> {
    arena: &'a mut Arena<L, R, B>,
    root: &'a mut Option<usize>,
    _side: PhantomData<fn() -> S>,
}

impl<'a, S, L, R, B> FacetsMut<'a, S, L, R, B> where S: Side {
    fn new(arena: &'a mut Arena<L, R, B>, root: &'a mut Option<usize>) -> Self {
        FacetsMut { arena: arena, root: root, _side: PhantomData }
    }

    fn links(&self, node: usize) -> &Links<B> { self.arena.links::<S>(node) }

    fn links_mut(&mut self, node: usize) -> &mut Links<B> { self.arena.links_mut::<S>(node) }

    // Points `parent`'s link to `old` (or the root, if there is no parent) at `new` instead.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => *self.root = new,
            Some(parent) => {
                let links = self.links_mut(parent);
                if links.left == Some(old) {
                    links.left = new;
                } else {
                    debug_assert!(links.right == Some(old));
                    links.right = new;
                }
            }
        }

        if let Some(new) = new { self.links_mut(new).parent = parent; }
    }
}

impl<'a, S, L, R, B> Nodes for FacetsMut<'a, S, L, R, B> where S: Side, B: Balance {
    type Balance = B;

    fn balance(&self, node: usize) -> &B { &self.links(node).balance }
    fn left(&self, node: usize) -> Option<usize> { self.links(node).left }
    fn right(&self, node: usize) -> Option<usize> { self.links(node).right }
}

impl<'a, S, L, R, B> NodesMut for FacetsMut<'a, S, L, R, B> where S: Side, B: Balance {
    fn balance_mut(&mut self, node: usize) -> &mut B { &mut self.links_mut(node).balance }

    fn rotate_left(&mut self, node: usize) -> usize {
        let parent = self.links(node).parent;
        let right = self.links(node).right.expect("rotate_left without a right child");
        let inner = self.links(right).left;

        self.links_mut(node).right = inner;
        if let Some(inner) = inner { self.links_mut(inner).parent = Some(node); }

        self.replace_child(parent, node, Some(right));
        self.links_mut(right).left = Some(node);
        self.links_mut(node).parent = Some(right);
        right
    }

    fn rotate_right(&mut self, node: usize) -> usize {
        let parent = self.links(node).parent;
        let left = self.links(node).left.expect("rotate_right without a left child");
        let inner = self.links(left).right;

        self.links_mut(node).left = inner;
        if let Some(inner) = inner { self.links_mut(inner).parent = Some(node); }

        self.replace_child(parent, node, Some(left));
        self.links_mut(left).right = Some(node);
        self.links_mut(node).parent = Some(left);
        left
    }
}
