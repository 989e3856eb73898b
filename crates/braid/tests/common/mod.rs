//! Stand-in for the mutation collaborator: builds structurally valid trees
//! for the read layer to traverse. Each builder upholds the node invariants
//! (uniform child heights, contiguous non-empty slots) by construction.

#![allow(dead_code)]

use braid::{Node, Rope, MAX_CHILDREN};
use std::sync::Arc;

/// Builds a balanced rope over `values`, packing up to `fanout` slots per
/// node at every level.
pub fn build_rope<T: Clone>(values: &[T], fanout: usize) -> Rope<T> {
    assert!((2..=MAX_CHILDREN).contains(&fanout));
    if values.is_empty() {
        return Rope::new();
    }
    let mut level: Vec<Arc<Node<T>>> = values
        .chunks(fanout)
        .map(|chunk| Arc::new(Node::leaf(chunk.iter().cloned())))
        .collect();
    while level.len() > 1 {
        level = level
            .chunks(fanout)
            .map(|chunk| Arc::new(Node::inner(chunk.iter().cloned())))
            .collect();
    }
    Rope::from_root(level.pop().unwrap())
}

/// Builds a height-1 rope with one single-entry leaf per value under one
/// inner root.
pub fn flat_rope<T: Clone>(values: &[T]) -> Rope<T> {
    assert!(!values.is_empty() && values.len() <= MAX_CHILDREN);
    let leaves = values.iter().map(|v| Arc::new(Node::leaf([v.clone()])));
    Rope::from_root(Arc::new(Node::inner(leaves)))
}

/// Builds a height-1 rope with one leaf per entry in `shape`, each leaf
/// holding that many consecutive integers counted up from `base`.
pub fn shaped_rope(shape: &[usize], base: i64) -> Rope<i64> {
    assert!(!shape.is_empty() && shape.len() <= MAX_CHILDREN);
    let mut next = base;
    let leaves = shape.iter().map(|&len| {
        let entries: Vec<i64> = (0..len as i64).map(|i| next + i).collect();
        next += len as i64;
        Arc::new(Node::leaf(entries))
    });
    let leaves: Vec<_> = leaves.collect();
    Rope::from_root(Arc::new(Node::inner(leaves)))
}
