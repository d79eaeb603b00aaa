//! End-to-end scenarios for the instrumented red-black tree.

use rand::prelude::*;
use rbv_engine::{Color, OperationKind, RbTree, StepKind};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build(keys: &[i64]) -> RbTree {
    let mut tree = RbTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_scenario_ascending_insert_single_left_rotation() {
    init_tracing();
    let tree = build(&[10, 20, 30]);

    assert_eq!(tree.root_key(), Some(20));
    assert_eq!(tree.in_order_keys(), vec![10, 20, 30]);

    let last = tree.steps().last().unwrap();
    let root = last.snapshot.get(last.snapshot.root).unwrap();
    assert_eq!((root.key, root.color), (20, Color::Black));
    let left = last.snapshot.get(root.left).unwrap();
    let right = last.snapshot.get(root.right).unwrap();
    assert_eq!((left.key, left.color), (10, Color::Red));
    assert_eq!((right.key, right.color), (30, Color::Red));

    let rotations: Vec<StepKind> = tree
        .steps()
        .iter()
        .filter(|step| matches!(step.kind, StepKind::RotateLeft | StepKind::RotateRight))
        .map(|step| step.kind)
        .collect();
    assert_eq!(rotations, vec![StepKind::RotateLeft]);
}

#[test]
fn test_scenario_zig_zag_insert_double_rotation() {
    let tree = build(&[10, 20, 15]);

    assert_eq!(tree.root_key(), Some(15));
    let last = tree.steps().last().unwrap();
    let root = last.snapshot.get(last.snapshot.root).unwrap();
    assert_eq!((root.key, root.color), (15, Color::Black));
    assert_eq!(last.snapshot.get(root.left).unwrap().key, 10);
    assert_eq!(last.snapshot.get(root.right).unwrap().key, 20);
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn test_scenario_delete_root_with_two_children() {
    let mut tree = build(&[20, 10, 30, 5, 15, 25, 35]);
    tree.delete(20);

    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root_key(), Some(25), "in-order successor replaces the root");
    assert_eq!(tree.in_order_keys(), vec![5, 10, 15, 25, 30, 35]);
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn test_scenario_delete_from_empty_tree() {
    let mut tree = RbTree::new();
    let steps = tree.delete(1);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].kind, StepKind::NotFound);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_invariants_hold_after_every_random_insert() {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(0xB1AC0);
    for _ in 0..20 {
        let mut tree = RbTree::new();
        for _ in 0..200 {
            tree.insert(rng.gen_range(-500..500));
            tree.check_invariants()
                .expect("invariants must hold after every insert");
        }
        let keys = tree.in_order_keys();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn test_random_insert_then_delete_leaves_set_difference() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut inserted: Vec<i64> = (0..120).map(|_| rng.gen_range(-300..300)).collect();
        inserted.sort_unstable();
        inserted.dedup();
        inserted.shuffle(&mut rng);

        let mut tree = RbTree::new();
        for &key in &inserted {
            tree.insert(key);
        }

        let deleted: Vec<i64> = inserted
            .choose_multiple(&mut rng, inserted.len() / 2)
            .copied()
            .collect();
        for &key in &deleted {
            tree.delete(key);
            tree.check_invariants()
                .expect("invariants must hold after every delete");
        }

        let mut expected: Vec<i64> = inserted
            .iter()
            .filter(|key| !deleted.contains(key))
            .copied()
            .collect();
        expected.sort_unstable();
        assert_eq!(tree.in_order_keys(), expected);
    }
}

#[test]
fn test_drain_whole_tree_in_random_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<i64> = (0..100).collect();
    keys.shuffle(&mut rng);
    let mut tree = build(&keys);

    keys.shuffle(&mut rng);
    for &key in &keys {
        tree.delete(key);
        tree.check_invariants().expect("invariants while draining");
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root_key(), None);
}

#[test]
fn test_duplicate_insert_is_idempotent() {
    let mut tree = build(&[20, 10, 30]);
    let before_keys = tree.in_order_keys();
    let before_len = tree.steps().len();

    let steps = tree.insert(10);
    assert_eq!(tree.in_order_keys(), before_keys);
    assert_eq!(tree.len(), 3);
    assert_eq!(steps.last().unwrap().kind, StepKind::Found);
    assert!(steps.last().unwrap().description.contains("already present"));
    assert_eq!(tree.steps().len(), before_len + steps.len());
}

#[test]
fn test_reset_round_trip_replays_identically() {
    let script = |tree: &mut RbTree| {
        for key in [20, 10, 30, 5, 15] {
            tree.insert(key);
        }
        tree.delete(10);
        tree.search(15);
    };

    let mut fresh = RbTree::new();
    script(&mut fresh);

    let mut reused = RbTree::new();
    reused.insert(999);
    reused.delete(999);
    reused.reset();
    script(&mut reused);

    assert_eq!(reused.steps(), fresh.steps());
    assert_eq!(reused.operations(), fresh.operations());
    assert_eq!(reused.in_order_keys(), fresh.in_order_keys());
    assert_eq!(reused.steps()[0].id, 1, "step ids restart at 1 after reset");
}

#[test]
fn test_snapshots_are_immutable_under_later_mutation() {
    let mut tree = build(&[20, 10, 30]);
    let captured: Vec<_> = tree.steps().to_vec();

    for key in [5, 15, 25, 35] {
        tree.insert(key);
    }
    tree.delete(20);

    assert_eq!(
        &tree.steps()[..captured.len()],
        &captured[..],
        "previously recorded steps must never change"
    );
}

#[test]
fn test_batch_operation_spans_multiple_calls() {
    let mut tree = RbTree::new();
    tree.start_operation(OperationKind::Batch("INSERT_BATCH".to_owned()), &[1, 2, 3]);
    for key in [1, 2, 3] {
        tree.insert(key);
    }
    tree.end_operation();
    tree.delete(2);

    assert_eq!(tree.operations().len(), 2);
    let batch = &tree.operations()[0];
    assert_eq!(batch.kind, OperationKind::Batch("INSERT_BATCH".to_owned()));
    assert_eq!(batch.keys, vec![1, 2, 3]);

    let delete_op = tree.operations()[1].id;
    let batch_steps = tree
        .steps()
        .iter()
        .filter(|step| step.operation == batch.id)
        .count();
    let delete_steps = tree
        .steps()
        .iter()
        .filter(|step| step.operation == delete_op)
        .count();
    assert_eq!(batch_steps + delete_steps, tree.steps().len());
    assert!(batch_steps > 0 && delete_steps > 0);
}

#[test]
fn test_every_mutating_operation_ends_with_done() {
    let mut tree = RbTree::new();
    for key in [8, 4, 12, 2, 6] {
        let steps = tree.insert(key);
        assert_eq!(steps.last().unwrap().kind, StepKind::Done);
    }
    let steps = tree.delete(4);
    assert_eq!(steps.last().unwrap().kind, StepKind::Done);
}
