//! Aggregation over Int columns
//!
//! Supports the full operator set. MIN and MAX seed from the first value
//! merged, never from zero; SUM and AVG accumulate from zero; COUNT
//! never touches the running value.

use std::collections::HashMap;

use crate::operator::{OperatorBase, OperatorError, OperatorResult, TupleIterator};
use crate::tuple::{Column, Field, FieldType, Schema, Tuple};

use super::{AggregateOp, Aggregator, EmptyAggregatePolicy, GroupKey, GroupState};

/// Computes one aggregate over an Int column, per group.
///
/// Groups are kept in first-appearance order so the result sequence is
/// deterministic for a given input order.
pub struct IntegerAggregator {
    group_column: Option<usize>,
    group_type: Option<FieldType>,
    agg_column: usize,
    op: AggregateOp,
    policy: EmptyAggregatePolicy,
    entries: Vec<(GroupKey, GroupState)>,
    index: HashMap<GroupKey, usize>,
}

impl IntegerAggregator {
    /// Creates an aggregator.
    ///
    /// `group` carries the group-by column index and its type, or None
    /// for no grouping.
    pub fn new(
        group: Option<(usize, FieldType)>,
        agg_column: usize,
        op: AggregateOp,
        policy: EmptyAggregatePolicy,
    ) -> Self {
        Self {
            group_column: group.map(|(index, _)| index),
            group_type: group.map(|(_, field_type)| field_type),
            agg_column,
            op,
            policy,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn state_mut(&mut self, key: GroupKey) -> &mut GroupState {
        if let Some(&slot) = self.index.get(&key) {
            return &mut self.entries[slot].1;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, GroupState::default()));
        &mut self.entries.last_mut().unwrap().1
    }

    fn extract_value(&self, tuple: &Tuple) -> OperatorResult<i64> {
        let field = tuple.field(self.agg_column).ok_or_else(|| {
            OperatorError::schema_mismatch(format!(
                "aggregate column {} out of range for tuple of {} fields",
                self.agg_column,
                tuple.len()
            ))
        })?;
        field.as_int().ok_or_else(|| {
            OperatorError::type_mismatch(format!(
                "{} aggregate requires an int column, got {}",
                self.op,
                field.field_type()
            ))
        })
    }
}

impl Aggregator for IntegerAggregator {
    fn merge_tuple_into_group(&mut self, tuple: &Tuple) -> OperatorResult<()> {
        let key = GroupKey::from_tuple(self.group_column, tuple)?;
        // COUNT accepts any field type and ignores the value.
        let value = match self.op {
            AggregateOp::Count => 0,
            _ => self.extract_value(tuple)?,
        };

        let op = self.op;
        let state = self.state_mut(key);
        state.count += 1;
        match op {
            AggregateOp::Min => {
                state.running = Some(state.running.map_or(value, |r| r.min(value)));
            }
            AggregateOp::Max => {
                state.running = Some(state.running.map_or(value, |r| r.max(value)));
            }
            AggregateOp::Sum | AggregateOp::Avg => {
                state.running = Some(state.running.unwrap_or(0) + value);
            }
            AggregateOp::Count => {}
        }
        Ok(())
    }

    fn iterator(&self) -> OperatorBase<TupleIterator> {
        match self.group_type {
            None => {
                let schema = Schema::unnamed(vec![FieldType::Int]);
                let mut rows = Vec::new();
                if let Some((_, state)) = self.entries.first() {
                    rows.push(Tuple::new(vec![Field::Int(self.op.result(state))]));
                } else if self.policy == EmptyAggregatePolicy::IdentityRow
                    && matches!(self.op, AggregateOp::Sum | AggregateOp::Count)
                {
                    rows.push(Tuple::new(vec![Field::Int(0)]));
                }
                TupleIterator::new(schema, rows)
            }
            Some(group_type) => {
                let schema = Schema::new(vec![
                    Column::anonymous(group_type),
                    Column::anonymous(FieldType::Int),
                ]);
                let rows = self
                    .entries
                    .iter()
                    .filter_map(|(key, state)| match key {
                        GroupKey::Value(group) => Some(Tuple::new(vec![
                            group.clone(),
                            Field::Int(self.op.result(state)),
                        ])),
                        GroupKey::Global => None,
                    })
                    .collect();
                TupleIterator::new(schema, rows)
            }
        }
    }
}
