//! Immutable, reference-counted tree nodes.

use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum populated slots per node.
pub const MAX_CHILDREN: usize = 8;

/// Minimum fill the rebalancing discipline maintains for non-root nodes.
/// Enforced by the mutation layer, not here; this crate only relies on
/// slots being contiguous and non-empty.
pub const MIN_CHILDREN: usize = 4;

/// A rope tree node.
///
/// Inner nodes hold children exactly one level down; leaves (height 0) hold
/// element entries directly, one per slot. What an element is, and whether
/// it bundles a summary metric for the surrounding library, is opaque here.
///
/// Nodes are immutable after construction and shared via [`Arc`]: several
/// snapshots and sibling subtrees may reference the same node, and any
/// structural change replaces nodes along the affected spine rather than
/// mutating in place. The constructors below are the hooks the mutation
/// layer uses; they assert the structural invariants every consumer of the
/// tree depends on.
#[derive(Debug)]
pub enum Node<T> {
    Inner(InnerNode<T>),
    Leaf(LeafNode<T>),
}

#[derive(Debug)]
pub struct InnerNode<T> {
    height: u8,
    children: SmallVec<[Arc<Node<T>>; MAX_CHILDREN]>,
}

#[derive(Debug)]
pub struct LeafNode<T> {
    entries: SmallVec<[T; MAX_CHILDREN]>,
}

impl<T> Node<T> {
    /// Builds a leaf from element entries.
    ///
    /// Panics unless `1..=MAX_CHILDREN` entries are supplied.
    pub fn leaf(entries: impl IntoIterator<Item = T>) -> Self {
        let entries: SmallVec<[T; MAX_CHILDREN]> = entries.into_iter().collect();
        assert!(
            !entries.is_empty() && entries.len() <= MAX_CHILDREN,
            "a leaf holds 1..={MAX_CHILDREN} entries, got {}",
            entries.len()
        );
        Node::Leaf(LeafNode { entries })
    }

    /// Builds an inner node over children of uniform height.
    ///
    /// Panics unless `1..=MAX_CHILDREN` children are supplied and they all
    /// share one height.
    pub fn inner(children: impl IntoIterator<Item = Arc<Node<T>>>) -> Self {
        let children: SmallVec<[Arc<Node<T>>; MAX_CHILDREN]> = children.into_iter().collect();
        assert!(
            !children.is_empty() && children.len() <= MAX_CHILDREN,
            "an inner node holds 1..={MAX_CHILDREN} children, got {}",
            children.len()
        );
        let child_height = children[0].height();
        assert!(
            children.iter().all(|child| child.height() == child_height),
            "inner node children must share one height"
        );
        assert!(child_height < u8::MAX as usize, "tree is too tall");
        Node::Inner(InnerNode {
            height: (child_height + 1) as u8,
            children,
        })
    }

    /// Distance to the leaf level; leaves are height 0.
    pub fn height(&self) -> usize {
        match self {
            Node::Inner(inner) => inner.height as usize,
            Node::Leaf(_) => 0,
        }
    }

    /// Number of populated slots: children for inner nodes, entries for
    /// leaves.
    pub fn child_count(&self) -> usize {
        match self {
            Node::Inner(inner) => inner.children.len(),
            Node::Leaf(leaf) => leaf.entries.len(),
        }
    }

    pub fn as_inner(&self) -> Option<&InnerNode<T>> {
        match self {
            Node::Inner(inner) => Some(inner),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafNode<T>> {
        match self {
            Node::Inner(_) => None,
            Node::Leaf(leaf) => Some(leaf),
        }
    }
}

impl<T> InnerNode<T> {
    /// The child in `slot`. Panics on an unpopulated slot; callers check
    /// `child_count` first.
    pub fn child(&self, slot: usize) -> &Arc<Node<T>> {
        &self.children[slot]
    }

    pub fn children(&self) -> &[Arc<Node<T>>] {
        &self.children
    }
}

impl<T> LeafNode<T> {
    /// The entry in `slot`. Panics on an unpopulated slot.
    pub fn entry(&self, slot: usize) -> &T {
        &self.entries[slot]
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
