//! Sequential access over a rope snapshot.

use crate::index::RopeIndex;
use crate::node::Node;
use crate::path::Path;
use crate::rope::Rope;
use std::iter::FusedIterator;
use std::sync::Arc;

/// A cursor over a rope: the current path plus a cached reference to the
/// leaf it resolves to.
///
/// Exactly two states exist: *positioned* (cache present, [`current`]
/// is valid) and *at-end* (cache absent). There is no before-start state
/// distinct from being positioned on the first element. The cache borrows
/// from the snapshot, is re-derived on every reposition, and is never
/// consulted as a source of truth.
///
/// Stepping takes `&mut self`, so one cursor is single-threaded state;
/// independent cursors over the same snapshot never interfere.
///
/// [`current`]: Self::current
pub struct RopeIter<'a, T> {
    rope: &'a Rope<T>,
    path: Path,
    leaf: Option<&'a Arc<Node<T>>>,
}

impl<'a, T> RopeIter<'a, T> {
    /// Starts a cursor at `start`, resolving its leaf immediately so the
    /// first [`current`](Self::current) access needs no descent.
    ///
    /// Panics if `start` fails [`Rope::validate`]: a mismatched height or a
    /// path outside the rope's index space is a bug in the caller's
    /// bookkeeping, not a recoverable condition.
    pub fn new(rope: &'a Rope<T>, start: RopeIndex<T>) -> Self {
        if let Err(err) = rope.validate(&start) {
            panic!("invalid iterator start position: {err}");
        }
        let path = start.path().clone();
        let leaf = rope.leaf_at(&path);
        Self { rope, path, leaf }
    }

    /// True when no current element exists.
    pub fn is_at_end(&self) -> bool {
        self.leaf.is_none()
    }

    /// True when the cursor sits on the first position. Compares path
    /// values, so on an empty rope this holds together with
    /// [`is_at_end`](Self::is_at_end).
    pub fn is_at_start(&self) -> bool {
        self.path == self.rope.start_path()
    }

    /// The element under the cursor.
    ///
    /// Panics when the cursor is at the end.
    pub fn current(&self) -> &'a T {
        match self.leaf {
            Some(leaf) => leaf_entry(leaf, &self.path),
            None => panic!("no current element: iterator is at end"),
        }
    }

    /// Applies `f` to the element under the cursor, reading the leaf in
    /// place.
    ///
    /// Panics when the cursor is at the end.
    pub fn with_current<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(self.current())
    }

    /// Moves to the tree-successor position. Returns `false`, without
    /// moving, when the path is already at or past the end. Stepping off
    /// the last element returns `true` but lands on the canonical end, so a
    /// `true` return does not promise a current element; callers re-check
    /// state.
    pub fn step_forward(&mut self) -> bool {
        if self.path >= self.rope.end_path() {
            return false;
        }
        self.reposition(self.rope.path_after(&self.path));
        true
    }

    /// Moves to the tree-predecessor position. Returns `false`, without
    /// moving, at the start.
    pub fn step_backward(&mut self) -> bool {
        if self.path <= self.rope.start_path() {
            return false;
        }
        self.reposition(self.rope.path_before(&self.path));
        true
    }

    /// Forces the canonical end state, so later comparisons against the
    /// rope's own [`end_index`](Rope::end_index) hold no matter how the
    /// boundary was reached.
    pub fn step_to_end(&mut self) {
        self.path = self.rope.end_path();
        self.leaf = None;
    }

    /// The cursor position as a standalone handle, cache included.
    pub fn index(&self) -> RopeIndex<T> {
        RopeIndex::with_leaf(self.path.clone(), self.leaf.map(Arc::downgrade))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reposition(&mut self, path: Path) {
        self.leaf = self.rope.leaf_at(&path);
        self.path = path;
    }
}

fn leaf_entry<'a, T>(leaf: &'a Arc<Node<T>>, path: &Path) -> &'a T {
    match leaf.as_ref() {
        Node::Leaf(leaf) => leaf.entry(path.slot(0)),
        Node::Inner(_) => unreachable!("lookup only ever caches leaves"),
    }
}

impl<'a, T> Iterator for RopeIter<'a, T> {
    type Item = &'a T;

    /// Yields the element under the cursor and advances. After the last
    /// element the cursor normalizes to the canonical end; every later call
    /// returns `None`; the cursor never resets itself.
    fn next(&mut self) -> Option<&'a T> {
        let leaf = self.leaf?;
        let item = leaf_entry(leaf, &self.path);
        if !self.step_forward() {
            self.step_to_end();
        }
        Some(item)
    }
}

impl<T> FusedIterator for RopeIter<'_, T> {}

impl<T> Clone for RopeIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            rope: self.rope,
            path: self.path.clone(),
            leaf: self.leaf,
        }
    }
}
