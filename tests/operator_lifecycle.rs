//! Operator Lifecycle Invariant Tests
//!
//! The shared state machine must hold for every operator:
//! - Pulling before open or after close is a state error, not empty output
//! - Opening an open operator is a state error
//! - Closing a closed operator is tolerated
//! - next() past exhaustion is an end-of-stream error; has_next() is false
//! - Rewinding and re-draining yields the identical sequence

use rowmill::operator::{
    BoxedOperator, Filter, Join, Operator, OperatorBase, TupleIterator,
};
use rowmill::predicate::{CompareOp, JoinPredicate, Predicate};
use rowmill::tuple::{Field, FieldType, Schema, Tuple};

// =============================================================================
// Helper Functions
// =============================================================================

fn int_source(values: &[i64]) -> OperatorBase<TupleIterator> {
    TupleIterator::new(
        Schema::unnamed(vec![FieldType::Int]),
        values
            .iter()
            .map(|v| Tuple::new(vec![Field::Int(*v)]))
            .collect(),
    )
}

fn boxed_source(values: &[i64]) -> BoxedOperator {
    int_source(values).boxed()
}

fn drain(op: &mut dyn Operator) -> Vec<Tuple> {
    let mut out = Vec::new();
    while op.has_next().unwrap() {
        out.push(op.next().unwrap());
    }
    out
}

// =============================================================================
// State Machine Tests
// =============================================================================

/// Pulling from an unopened operator reports a state error.
#[test]
fn test_fetch_before_open_is_error() {
    let mut op = int_source(&[1]);
    assert!(op.has_next().unwrap_err().is_state_error());
    assert!(op.next().unwrap_err().is_state_error());
    assert!(op.rewind().unwrap_err().is_state_error());
}

/// Opening an already open operator reports a state error.
#[test]
fn test_open_while_open_is_error() {
    let mut op = int_source(&[1]);
    op.open().unwrap();
    let err = op.open().unwrap_err();
    assert_eq!(err.code(), "MILL_OPERATOR_STATE");
}

/// Closing twice is a tolerated no-op.
#[test]
fn test_close_idempotent() {
    let mut op = int_source(&[1]);
    op.open().unwrap();
    op.close().unwrap();
    assert!(op.close().is_ok());
}

/// Pulling after close reports a state error, never a silent empty
/// result.
#[test]
fn test_fetch_after_close_is_error() {
    let mut op = int_source(&[1]);
    op.open().unwrap();
    op.close().unwrap();
    assert!(op.has_next().unwrap_err().is_state_error());
    assert!(op.next().unwrap_err().is_state_error());
}

/// The same contract holds for a composed operator, not just leaves.
#[test]
fn test_composed_operator_state_machine() {
    let pred = Predicate::with_const(0, CompareOp::Gt, Field::Int(0));
    let mut filter = Filter::new(pred, boxed_source(&[1, 2]));

    assert!(filter.next().unwrap_err().is_state_error());
    filter.open().unwrap();
    assert!(filter.open().unwrap_err().is_state_error());
    filter.close().unwrap();
    assert!(filter.has_next().unwrap_err().is_state_error());
}

/// A closed-then-reopened operator serves its sequence from the top.
#[test]
fn test_reopen_restarts() {
    let mut op = int_source(&[1, 2]);
    op.open().unwrap();
    op.next().unwrap();
    op.close().unwrap();
    op.open().unwrap();
    assert_eq!(drain(&mut op).len(), 2);
}

// =============================================================================
// Exhaustion Tests
// =============================================================================

/// has_next() reports false at exhaustion; next() reports end-of-stream.
#[test]
fn test_exhaustion_is_not_a_state_error() {
    let mut op = int_source(&[1]);
    op.open().unwrap();
    op.next().unwrap();
    assert!(!op.has_next().unwrap());
    let err = op.next().unwrap_err();
    assert!(err.is_end_of_stream());
    assert!(!err.is_state_error());
}

/// Exhaustion is stable: repeated pulls keep signalling it.
#[test]
fn test_exhaustion_is_stable() {
    let mut op = int_source(&[]);
    op.open().unwrap();
    for _ in 0..3 {
        assert!(!op.has_next().unwrap());
    }
}

// =============================================================================
// Rewind Determinism Tests
// =============================================================================

/// Rewinding a leaf and re-draining yields the identical sequence.
#[test]
fn test_leaf_rewind_determinism() {
    let mut op = int_source(&[3, 1, 2]);
    op.open().unwrap();
    let first = drain(&mut op);
    op.rewind().unwrap();
    let second = drain(&mut op);
    assert_eq!(first, second);
}

/// Rewinding a filter yields the identical filtered sequence.
#[test]
fn test_filter_rewind_determinism() {
    let pred = Predicate::with_const(0, CompareOp::GtEq, Field::Int(2));
    let mut filter = Filter::new(pred, boxed_source(&[1, 2, 3, 1, 4]));
    filter.open().unwrap();
    let first = drain(&mut filter);
    assert_eq!(first.len(), 3);
    filter.rewind().unwrap();
    assert_eq!(drain(&mut filter), first);
}

/// Rewinding a join mid-drain restarts the full cross product.
#[test]
fn test_join_rewind_determinism() {
    let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
    let mut join = Join::new(pred, boxed_source(&[1, 2, 3]), boxed_source(&[2, 3, 4]));
    join.open().unwrap();
    let first = drain(&mut join);
    assert_eq!(first.len(), 2);

    join.rewind().unwrap();
    join.next().unwrap();
    join.rewind().unwrap();
    assert_eq!(drain(&mut join), first);
}

// =============================================================================
// Composition Tests
// =============================================================================

/// Operators compose to unbounded depth; a filter over a join over a
/// join still honors the pull contract.
#[test]
fn test_deep_composition() {
    let inner = Join::new(
        JoinPredicate::new(0, CompareOp::Eq, 0),
        boxed_source(&[1, 2]),
        boxed_source(&[1, 2]),
    );
    let outer = Join::new(
        JoinPredicate::new(0, CompareOp::Eq, 0),
        inner.boxed(),
        boxed_source(&[2]),
    );
    let pred = Predicate::new(0, CompareOp::Eq, rowmill::predicate::Operand::Column(1));
    let mut root = Filter::new(pred, outer.boxed());

    root.open().unwrap();
    let rows = drain(&mut root);
    // Only (2, 2, 2) survives the equijoins
    assert_eq!(rows, vec![Tuple::new(vec![
        Field::Int(2),
        Field::Int(2),
        Field::Int(2),
    ])]);
    assert_eq!(root.schema().len(), 3);
}
