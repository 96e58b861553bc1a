#![forbid(missing_docs)]

//! Rebalancing policies for the trees of a bidirectional map.

/// Read access to one side's nodes, addressed by slot.
pub trait Nodes {
    /// The nodes' balance metadata.
    type Balance: Balance;

    /// Returns a reference to the node's balance metadata.
    fn balance(&self, node: usize) -> &Self::Balance;

    /// Returns the node's left child, if any.
    fn left(&self, node: usize) -> Option<usize>;

    /// Returns the node's right child, if any.
    fn right(&self, node: usize) -> Option<usize>;
}

/// Write access to one side's nodes, addressed by slot.
pub trait NodesMut: Nodes {
    /// Returns a mutable reference to the node's balance metadata.
    fn balance_mut(&mut self, node: usize) -> &mut Self::Balance;

    /// Rotates the subtree rooted at the node to the left and returns the subtree's new root.
    ///
    /// The node must have a right child.
    fn rotate_left(&mut self, node: usize) -> usize;

    /// Rotates the subtree rooted at the node to the right and returns the subtree's new root.
    ///
    /// The node must have a left child.
    fn rotate_right(&mut self, node: usize) -> usize;
}

/// Balance metadata for a single binary search tree node.
pub trait Balance: Clone + Default + 'static {
    /// Rebalances the subtree rooted at the given node after an insertion below it, returning the
    /// subtree's new root.
    fn rebalance_insert<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self>;

    /// Rebalances the subtree rooted at the given node after a removal below it, returning the
    /// subtree's new root.
    fn rebalance_remove<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self>;

    /// Panics if the node violates the scheme's invariants.
    fn validate<N>(_nodes: &N, _node: usize) where N: Nodes<Balance = Self> {}
}

/// Metadata for the AA balance scheme.
#[derive(Clone, Copy, Debug)]
pub struct Aa(usize);

impl Aa {
    fn level<N>(nodes: &N, node: Option<usize>) -> usize where N: Nodes<Balance = Self> {
        node.map_or(0, |node| nodes.balance(node).0)
    }

    // Remove left horizontal link by rotating right
    //
    // From https://github.com/Gankro/collect-rs/tree/map.rs
    fn skew<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self> {
        if nodes.left(node).map_or(false, |x| nodes.balance(x).0 == nodes.balance(node).0) {
            nodes.rotate_right(node)
        } else {
            node
        }
    }

    // Remove dual horizontal link by rotating left and increasing level of
    // the parent
    //
    // From https://github.com/Gankro/collect-rs/tree/map.rs
    fn split<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self> {
        let level = nodes.balance(node).0;

        if nodes.right(node).map_or(false,
          |x| nodes.right(x).map_or(false, |y| nodes.balance(y).0 == level)) {
            let node = nodes.rotate_left(node);
            nodes.balance_mut(node).0 += 1;
            node
        } else {
            node
        }
    }
}

impl Default for Aa {
    fn default() -> Self { Aa(1) }
}

impl Balance for Aa {
    fn rebalance_insert<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self> {
        let node = Self::skew(nodes, node);
        Self::split(nodes, node)
    }

    fn rebalance_remove<N>(nodes: &mut N, node: usize) -> usize where N: NodesMut<Balance = Self> {
        let left_level = Self::level(nodes, nodes.left(node));
        let right_level = Self::level(nodes, nodes.right(node));
        let level = nodes.balance(node).0;

        // re-balance, if necessary
        if left_level + 1 < level || right_level + 1 < level {
            let level = level - 1;
            nodes.balance_mut(node).0 = level;

            if right_level > level {
                if let Some(x) = nodes.right(node) { nodes.balance_mut(x).0 = level; }
            }

            let node = Self::skew(nodes, node);

            if let Some(right) = nodes.right(node) {
                let right = Self::skew(nodes, right);
                if let Some(x) = nodes.right(right) { Self::skew(nodes, x); }
            }

            let node = Self::split(nodes, node);
            if let Some(x) = nodes.right(node) { Self::split(nodes, x); }
            node
        } else {
            node
        }
    }

    // Adapted from https://github.com/Gankro/collect-rs/tree/map.rs
    fn validate<N>(nodes: &N, node: usize) where N: Nodes<Balance = Self> {
        let level = nodes.balance(node).0;

        match nodes.left(node) {
            None => assert!(level == 1, "leftless node {} at level {}", node, level),
            Some(left) => assert!(nodes.balance(left).0 + 1 == level,
                                  "left child of {} is not one level below it", node),
        }

        match nodes.right(node) {
            None => assert!(level == 1, "rightless node {} at level {}", node, level),
            Some(right) => {
                let right_level = nodes.balance(right).0;
                assert!(right_level == level || right_level + 1 == level,
                        "right child of {} is more than one level below it", node);
                if right_level == level {
                    assert!(Self::level(nodes, nodes.right(right)) < level,
                            "double horizontal link below {}", node);
                }
            }
        }
    }
}

/// Metadata for a tree that is never rebalanced.
///
/// Insertion order alone decides the tree's shape, so sorted input degrades lookups to linear
/// time. Ordering and uniqueness are unaffected.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    fn rebalance_insert<N>(_nodes: &mut N, node: usize) -> usize
        where N: NodesMut<Balance = Self> { node }

    fn rebalance_remove<N>(_nodes: &mut N, node: usize) -> usize
        where N: NodesMut<Balance = Self> { node }
}
