//! Reusable position handles.

use crate::node::Node;
use crate::path::Path;
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, Weak};
use thiserror::Error;

/// Caller-contract violations detected when checking a position against a
/// rope. These classify programmer errors, not data-dependent faults; the
/// panicking entry points use the same classification in their messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("path height {found} does not match rope height {expected}")]
    HeightMismatch { expected: usize, found: usize },
    #[error("path is outside the rope's index space")]
    OutOfBounds,
}

/// A position handle: a [`Path`] plus an optional cached reference to the
/// leaf it resolves to.
///
/// The cache is non-owning ([`Weak`]) and purely an optimization hint: it is
/// re-derivable from the path at any time and must be discarded whenever the
/// path changes. An absent cache is also what a normalized at-end handle
/// looks like. Equality and ordering compare the path value only, so two
/// handles built independently at the same position compare equal no matter
/// how their caches were populated.
///
/// A handle is only meaningful against the snapshot it came from (or one
/// structurally compatible at its path); callers holding an externally
/// produced handle check it with [`Rope::validate`](crate::rope::Rope::validate)
/// before use.
pub struct RopeIndex<T> {
    path: Path,
    leaf: Option<Weak<Node<T>>>,
}

impl<T> RopeIndex<T> {
    /// An unresolved handle at `path`.
    pub fn new(path: Path) -> Self {
        Self { path, leaf: None }
    }

    pub(crate) fn with_leaf(path: Path, leaf: Option<Weak<Node<T>>>) -> Self {
        Self { path, leaf }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a cached leaf handle is present.
    pub fn is_resolved(&self) -> bool {
        self.leaf.is_some()
    }

    /// Upgrades the cached leaf handle, if present and its node still alive.
    pub fn cached_leaf(&self) -> Option<Arc<Node<T>>> {
        self.leaf.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn set_leaf(&mut self, leaf: Option<Weak<Node<T>>>) {
        self.leaf = leaf;
    }
}

impl<T> Clone for RopeIndex<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            leaf: self.leaf.clone(),
        }
    }
}

impl<T> PartialEq for RopeIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<T> Eq for RopeIndex<T> {}

impl<T> Ord for RopeIndex<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl<T> PartialOrd for RopeIndex<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> fmt::Debug for RopeIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RopeIndex")
            .field("path", &self.path)
            .field("resolved", &self.leaf.is_some())
            .finish()
    }
}
