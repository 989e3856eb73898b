mod common;

use braid::{Path, PositionError, Rope, RopeIndex};
use common::{build_rope, flat_rope, shaped_rope};
use std::sync::Arc;

#[test]
fn resolution_short_circuits_on_the_first_out_of_range_slot() {
    // fanout 2 over 8 values: 4 leaves, 2 mid nodes, 1 root, height 2.
    let values: Vec<i64> = (0..8).collect();
    let rope = build_rope(&values, 2);
    assert_eq!(rope.height(), 2);

    for level in 0..=2 {
        let mut path = Path::new(2);
        path.set_slot(level, 2); // every node on the zero spine has 2 slots
        assert!(
            rope.leaf_at(&path).is_none(),
            "slot past the populated range at level {level}"
        );
    }

    assert!(rope.leaf_at(&rope.start_path()).is_some());
    assert!(rope.leaf_at(&rope.end_path()).is_none());
}

#[test]
fn resolution_on_the_empty_rope_is_none() {
    let rope = Rope::<i64>::new();
    assert!(rope.leaf_at(&rope.start_path()).is_none());
    assert!(rope.owned_leaf_at(&rope.end_path()).is_none());
}

#[test]
fn repeated_resolution_returns_the_same_leaf() {
    let rope = build_rope(&(0..20).collect::<Vec<_>>(), 4);
    let path = rope.start_path();
    let first = rope.leaf_at(&path).unwrap();
    let second = rope.leaf_at(&path).unwrap();
    assert!(Arc::ptr_eq(first, second));
}

#[test]
fn weak_and_owned_resolution_agree_at_every_position() {
    let rope = build_rope(&(0..50).collect::<Vec<_>>(), 3);
    let mut iter = rope.iter();
    loop {
        let path = iter.path().clone();
        match rope.leaf_at(&path) {
            Some(leaf) => {
                let owned = rope.owned_leaf_at(&path).unwrap();
                assert!(Arc::ptr_eq(leaf, &owned));
            }
            None => assert!(rope.owned_leaf_at(&path).is_none()),
        }
        if !iter.step_forward() {
            break;
        }
    }
}

#[test]
fn resolved_leaves_hold_the_expected_entries() {
    let rope = shaped_rope(&[2, 3, 1], 100);
    let mut path = Path::new(1);
    path.set_slot(1, 1);
    path.set_slot(0, 2);
    let leaf = rope.leaf_at(&path).unwrap();
    assert_eq!(leaf.as_leaf().unwrap().entries(), &[102, 103, 104]);
    assert_eq!(leaf.child_count(), 3);
    assert_eq!(leaf.height(), 0);
}

#[test]
fn ensure_leaf_populates_an_index_cache() {
    let rope = flat_rope(&['a', 'b', 'c']);
    let mut index = RopeIndex::new(rope.start_path());
    assert!(!index.is_resolved());
    assert!(index.cached_leaf().is_none());

    rope.ensure_leaf(&mut index);
    assert!(index.is_resolved());
    let cached = index.cached_leaf().unwrap();
    assert!(Arc::ptr_eq(&cached, rope.leaf_at(&rope.start_path()).unwrap()));

    // Caches never outlive the tree they point into.
    drop(cached);
    drop(rope);
    assert!(index.cached_leaf().is_none());
}

#[test]
fn start_index_arrives_pre_resolved() {
    let rope = flat_rope(&[1, 2]);
    assert!(rope.start_index().is_resolved());
    assert!(!rope.end_index().is_resolved());
    assert!(Rope::<i32>::new().start_index().cached_leaf().is_none());
}

#[test]
fn validate_classifies_contract_violations() {
    let rope = flat_rope(&[10, 20, 30]);
    assert_eq!(rope.validate(&rope.start_index()), Ok(()));
    assert_eq!(rope.validate(&rope.end_index()), Ok(()));

    let wrong_height = RopeIndex::<i32>::new(Path::new(3));
    assert_eq!(
        rope.validate(&wrong_height),
        Err(PositionError::HeightMismatch {
            expected: 1,
            found: 3
        })
    );

    let mut foreign = Path::new(1);
    foreign.set_slot(1, 3);
    assert_eq!(
        rope.validate(&RopeIndex::new(foreign)),
        Err(PositionError::OutOfBounds)
    );
}

#[test]
fn end_path_is_one_past_every_rightmost_slot() {
    let rope = shaped_rope(&[3, 2], 0);
    let end = rope.end_path();
    assert_eq!(end.slot(1), 2); // root has two leaves
    assert_eq!(end.slot(0), 2); // rightmost leaf has two entries

    let last = rope.path_before(&end);
    assert_eq!(last.slot(1), 1);
    assert_eq!(last.slot(0), 1);
    assert_eq!(rope.path_after(&last), end);
}
