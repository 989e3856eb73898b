//! Rope snapshots and positioned lookup.

use crate::index::{PositionError, RopeIndex};
use crate::iter::RopeIter;
use crate::node::Node;
use crate::path::Path;
use smallvec::SmallVec;
use std::sync::Arc;

/// A rope snapshot: an ordered sequence stored as a balanced multiway tree.
///
/// A snapshot owns at most a root reference; cloning copies that reference,
/// never the tree, so snapshots share structure freely. A snapshot with no
/// root is the empty rope. The mutation layer guarantees that every node
/// reachable from a live snapshot stays untouched, which is what keeps the
/// cached handles in [`RopeIndex`] and [`RopeIter`] honest.
#[derive(Debug)]
pub struct Rope<T> {
    root: Option<Arc<Node<T>>>,
}

impl<T> Rope<T> {
    /// The empty rope.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Wraps a root produced by the mutation layer. The root must satisfy
    /// the structural invariants: uniform child heights and contiguous,
    /// non-empty populated slots at every level.
    pub fn from_root(root: Arc<Node<T>>) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Arc<Node<T>>> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root's height, or 0 when empty.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Element count, by walking the leaves.
    pub fn len(&self) -> usize {
        fn count<T>(node: &Node<T>) -> usize {
            match node {
                Node::Leaf(leaf) => leaf.entries().len(),
                Node::Inner(inner) => inner.children().iter().map(|c| count(c)).sum(),
            }
        }
        self.root.as_ref().map_or(0, |root| count(root))
    }

    /// The first element's path: all zero. Equals [`end_path`](Self::end_path)
    /// when the rope is empty.
    pub fn start_path(&self) -> Path {
        Path::new(self.height())
    }

    /// The canonical one-past-the-end path: one past the last populated slot
    /// at every level along the rightmost spine.
    pub fn end_path(&self) -> Path {
        let mut path = Path::new(self.height());
        let Some(mut node) = self.root.as_deref() else {
            return path;
        };
        loop {
            let count = node.child_count();
            path.set_slot(node.height(), count);
            match node {
                Node::Leaf(_) => break,
                Node::Inner(inner) => node = inner.child(count - 1).as_ref(),
            }
        }
        path
    }

    /// Handle for the first position, with its leaf cache pre-resolved.
    pub fn start_index(&self) -> RopeIndex<T> {
        let path = self.start_path();
        let leaf = self.leaf_at(&path).map(Arc::downgrade);
        RopeIndex::with_leaf(path, leaf)
    }

    /// Canonical end handle; carries no leaf cache.
    pub fn end_index(&self) -> RopeIndex<T> {
        RopeIndex::new(self.end_path())
    }

    /// Resolves `path` to the leaf it addresses, or `None` if any level's
    /// component lands past that level's populated slots. That is exactly
    /// how a path at or beyond [`end_path`](Self::end_path) reads, so the
    /// end needs no special case.
    ///
    /// The returned reference borrows from this snapshot and owns nothing.
    /// Precondition: `path.height() == self.height()`.
    pub fn leaf_at(&self, path: &Path) -> Option<&Arc<Node<T>>> {
        debug_assert_eq!(
            path.height(),
            self.height(),
            "path height must match rope height"
        );
        let mut node = self.root.as_ref()?;
        loop {
            let slot = path.slot(node.height());
            if slot >= node.child_count() {
                return None;
            }
            match node.as_ref() {
                Node::Leaf(_) => return Some(node),
                Node::Inner(inner) => node = inner.child(slot),
            }
        }
    }

    /// Like [`leaf_at`](Self::leaf_at), returning a retained reference
    /// suitable for storing beyond this call (index caches). Shares the
    /// descent, and therefore the out-of-range definition, with the
    /// borrowing variant.
    pub fn owned_leaf_at(&self, path: &Path) -> Option<Arc<Node<T>>> {
        self.leaf_at(path).cloned()
    }

    /// Re-resolves the cached leaf for `index`; a no-op when the cache is
    /// already present.
    pub fn ensure_leaf(&self, index: &mut RopeIndex<T>) {
        if !index.is_resolved() {
            index.set_leaf(self.leaf_at(index.path()).map(Arc::downgrade));
        }
    }

    /// Checks an externally supplied handle against this rope: the height
    /// must match, and the path must belong to this rope's index space,
    /// meaning a position that resolves to a leaf, or the canonical end.
    pub fn validate(&self, index: &RopeIndex<T>) -> Result<(), PositionError> {
        let path = index.path();
        if path.height() != self.height() {
            return Err(PositionError::HeightMismatch {
                expected: self.height(),
                found: path.height(),
            });
        }
        if *path == self.end_path() || self.leaf_at(path).is_some() {
            return Ok(());
        }
        Err(PositionError::OutOfBounds)
    }

    /// The tree-successor of a resolvable element path: bumps the lowest
    /// level that still has a populated next slot and zeroes every level
    /// below it, the way an odometer carries from least to most significant
    /// digit. Returns the canonical [`end_path`](Self::end_path) once every
    /// level is exhausted.
    ///
    /// Precondition: `path` resolves to a leaf in this rope.
    pub fn path_after(&self, path: &Path) -> Path {
        let Some(root) = self.root.as_ref() else {
            return self.end_path();
        };
        let mut spine: SmallVec<[&Arc<Node<T>>; 8]> = SmallVec::new();
        let mut node = root;
        loop {
            spine.push(node);
            let slot = path.slot(node.height());
            debug_assert!(slot < node.child_count(), "successor of an unresolvable path");
            match node.as_ref() {
                Node::Leaf(_) => break,
                Node::Inner(inner) => node = inner.child(slot),
            }
        }
        let mut next = path.clone();
        for node in spine.iter().rev() {
            let height = node.height();
            let slot = next.slot(height);
            if slot + 1 < node.child_count() {
                next.set_slot(height, slot + 1);
                for below in 0..height {
                    next.set_slot(below, 0);
                }
                return next;
            }
        }
        self.end_path()
    }

    /// The tree-predecessor: borrows from the lowest level with a non-zero
    /// component and selects the rightmost descendant below it. A component
    /// at or past a node's populated range (as in the canonical end path)
    /// steps directly to that node's rightmost descendant, which is what
    /// makes the predecessor of the end the last element.
    ///
    /// Precondition: `path > start_path` (callers guard the start).
    pub fn path_before(&self, path: &Path) -> Path {
        let Some(root) = self.root.as_ref() else {
            return self.start_path();
        };
        let mut prev = path.clone();
        let mut spine: SmallVec<[&Arc<Node<T>>; 8]> = SmallVec::new();
        let mut node = root;
        loop {
            let slot = prev.slot(node.height());
            if slot >= node.child_count() {
                return rightmost_under(node, prev);
            }
            spine.push(node);
            match node.as_ref() {
                Node::Leaf(_) => break,
                Node::Inner(inner) => node = inner.child(slot),
            }
        }
        for node in spine.iter().rev() {
            let height = node.height();
            let slot = prev.slot(height);
            if slot > 0 {
                prev.set_slot(height, slot - 1);
                if let Node::Inner(inner) = node.as_ref() {
                    return rightmost_under(inner.child(slot - 1), prev);
                }
                return prev;
            }
        }
        // All zero: already at the start.
        prev
    }

    /// Cursor over the whole rope, from the first position.
    pub fn iter(&self) -> RopeIter<'_, T> {
        RopeIter::new(self, self.start_index())
    }

    /// Cursor from a caller-supplied position.
    ///
    /// Panics if `start` fails [`validate`](Self::validate).
    pub fn iter_from(&self, start: RopeIndex<T>) -> RopeIter<'_, T> {
        RopeIter::new(self, start)
    }
}

/// Path of `node`'s rightmost descendant, keeping `path`'s components above
/// `node`'s level.
fn rightmost_under<T>(node: &Arc<Node<T>>, mut path: Path) -> Path {
    let mut node = node;
    loop {
        let count = node.child_count();
        path.set_slot(node.height(), count - 1);
        match node.as_ref() {
            Node::Leaf(_) => return path,
            Node::Inner(inner) => node = inner.child(count - 1),
        }
    }
}

impl<T> Clone for Rope<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T> Default for Rope<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Rope<T> {
    type Item = &'a T;
    type IntoIter = RopeIter<'a, T>;

    fn into_iter(self) -> RopeIter<'a, T> {
        self.iter()
    }
}
