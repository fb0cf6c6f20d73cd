//! Grouped incremental aggregation for rowmill
//!
//! An aggregator consumes child tuples one at a time via
//! `merge_tuple_into_group`, bucketing them by an optional group-by
//! column, then exposes the finished groups as a restartable
//! sub-iterator. The `Aggregate` operator owns exactly one aggregator
//! and drains its child into it before yielding any row.
//!
//! This module provides:
//! - `AggregateOp` - MIN / MAX / SUM / AVG / COUNT
//! - `GroupKey` - No-grouping sentinel or extracted group value
//! - `GroupState` - Per-group accumulator (running value + count)
//! - `EmptyAggregatePolicy` - Zero-input behavior in no-grouping mode
//! - `IntegerAggregator` - Full operator set over Int columns
//! - `StringAggregator` - COUNT over columns of any type

mod integer;
mod string;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::{OperatorBase, OperatorError, OperatorResult, TupleIterator};
use crate::tuple::{Field, Tuple};

pub use integer::IntegerAggregator;
pub use string::StringAggregator;

/// Aggregation operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    /// Smallest value seen
    Min,
    /// Largest value seen
    Max,
    /// Sum of all values
    Sum,
    /// Integer average, divided at read time
    Avg,
    /// Number of tuples merged
    Count,
}

impl AggregateOp {
    /// Returns the operator name
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Count => "count",
        }
    }

    /// Reads the final aggregate value out of a group accumulator.
    ///
    /// AVG divides here and only here, so rounding error never compounds
    /// across merges. Division is integer division, truncating toward
    /// zero like the Int field domain.
    pub fn result(&self, state: &GroupState) -> i64 {
        match self {
            AggregateOp::Min | AggregateOp::Max | AggregateOp::Sum => {
                state.running.unwrap_or(0)
            }
            AggregateOp::Avg => state.running.unwrap_or(0) / state.count,
            AggregateOp::Count => state.count,
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Key of the aggregation map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// No-grouping sentinel; never a valid field value
    Global,
    /// Value of the group-by column
    Value(Field),
}

impl GroupKey {
    /// Extracts the group key for a tuple given the grouping column.
    ///
    /// A grouping column that falls outside the tuple is a schema
    /// contract violation.
    pub fn from_tuple(group_column: Option<usize>, tuple: &Tuple) -> OperatorResult<GroupKey> {
        match group_column {
            None => Ok(GroupKey::Global),
            Some(index) => tuple
                .field(index)
                .cloned()
                .map(GroupKey::Value)
                .ok_or_else(|| {
                    OperatorError::schema_mismatch(format!(
                        "group-by column {} out of range for tuple of {} fields",
                        index,
                        tuple.len()
                    ))
                }),
        }
    }
}

/// Per-group accumulator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupState {
    /// MIN/MAX/SUM/AVG accumulation; None until the first value is seen
    pub running: Option<i64>,
    /// Number of tuples merged into the group
    pub count: i64,
}

/// What a no-grouping aggregate yields when the child produced zero
/// tuples.
///
/// SUM and COUNT have an identity value (0); MIN, MAX, and AVG do not
/// and stay empty under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyAggregatePolicy {
    /// Yield an empty result sequence
    #[default]
    EmptyResult,
    /// Yield a single identity-valued row where one exists
    IdentityRow,
}

/// Grouped incremental aggregation engine.
///
/// Implementations accumulate merged tuples and surface the finished
/// groups through `iterator()`, a restartable sequence the owning
/// Aggregate operator serves rows from.
pub trait Aggregator {
    /// Merges one tuple into its group's accumulator
    fn merge_tuple_into_group(&mut self, tuple: &Tuple) -> OperatorResult<()>;

    /// Builds the result sequence: one row per distinct group key, in
    /// first-appearance order
    fn iterator(&self) -> OperatorBase<TupleIterator>;
}
