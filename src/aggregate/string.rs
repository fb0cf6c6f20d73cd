//! Aggregation over non-Int columns
//!
//! Only COUNT is defined over a Text aggregate column; asking for any
//! other operator is rejected at construction.

use std::collections::HashMap;

use crate::operator::{OperatorBase, OperatorError, OperatorResult, TupleIterator};
use crate::tuple::{Column, Field, FieldType, Schema, Tuple};

use super::{AggregateOp, Aggregator, EmptyAggregatePolicy, GroupKey};

/// Counts tuples per group; the aggregate column's type is irrelevant.
#[derive(Debug)]
pub struct StringAggregator {
    group_column: Option<usize>,
    group_type: Option<FieldType>,
    policy: EmptyAggregatePolicy,
    entries: Vec<(GroupKey, i64)>,
    index: HashMap<GroupKey, usize>,
}

impl StringAggregator {
    /// Creates a COUNT aggregator over a non-Int column.
    ///
    /// Any operator other than COUNT is a construction-time contract
    /// violation.
    pub fn new(
        group: Option<(usize, FieldType)>,
        op: AggregateOp,
        policy: EmptyAggregatePolicy,
    ) -> OperatorResult<Self> {
        if op != AggregateOp::Count {
            return Err(OperatorError::schema_mismatch(format!(
                "only count is defined over text columns, got {}",
                op
            )));
        }
        Ok(Self {
            group_column: group.map(|(index, _)| index),
            group_type: group.map(|(_, field_type)| field_type),
            policy,
            entries: Vec::new(),
            index: HashMap::new(),
        })
    }
}

impl Aggregator for StringAggregator {
    fn merge_tuple_into_group(&mut self, tuple: &Tuple) -> OperatorResult<()> {
        let key = GroupKey::from_tuple(self.group_column, tuple)?;
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, 1));
        }
        Ok(())
    }

    fn iterator(&self) -> OperatorBase<TupleIterator> {
        match self.group_type {
            None => {
                let schema = Schema::unnamed(vec![FieldType::Int]);
                let mut rows = Vec::new();
                if let Some((_, count)) = self.entries.first() {
                    rows.push(Tuple::new(vec![Field::Int(*count)]));
                } else if self.policy == EmptyAggregatePolicy::IdentityRow {
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
                    .filter_map(|(key, count)| match key {
                        GroupKey::Value(group) => {
                            Some(Tuple::new(vec![group.clone(), Field::Int(*count)]))
                        }
                        GroupKey::Global => None,
                    })
                    .collect();
                TupleIterator::new(schema, rows)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Operator;

    #[test]
    fn test_only_count_accepted() {
        let err =
            StringAggregator::new(None, AggregateOp::Min, EmptyAggregatePolicy::default())
                .unwrap_err();
        assert_eq!(err.code(), "MILL_SCHEMA_MISMATCH");

        assert!(
            StringAggregator::new(None, AggregateOp::Count, EmptyAggregatePolicy::default())
                .is_ok()
        );
    }

    #[test]
    fn test_counts_per_group() {
        let mut agg = StringAggregator::new(
            Some((0, FieldType::Text)),
            AggregateOp::Count,
            EmptyAggregatePolicy::default(),
        )
        .unwrap();
        for group in ["a", "b", "a", "a"] {
            agg.merge_tuple_into_group(&Tuple::new(vec![
                Field::Text(group.into()),
                Field::Text("payload".into()),
            ]))
            .unwrap();
        }

        let mut iter = agg.iterator();
        iter.open().unwrap();
        assert_eq!(
            iter.next().unwrap(),
            Tuple::new(vec![Field::Text("a".into()), Field::Int(3)])
        );
        assert_eq!(
            iter.next().unwrap(),
            Tuple::new(vec![Field::Text("b".into()), Field::Int(1)])
        );
        assert!(!iter.has_next().unwrap());
    }

    #[test]
    fn test_empty_input_policies() {
        let empty =
            StringAggregator::new(None, AggregateOp::Count, EmptyAggregatePolicy::EmptyResult)
                .unwrap();
        let mut iter = empty.iterator();
        iter.open().unwrap();
        assert!(!iter.has_next().unwrap());

        let identity =
            StringAggregator::new(None, AggregateOp::Count, EmptyAggregatePolicy::IdentityRow)
                .unwrap();
        let mut iter = identity.iterator();
        iter.open().unwrap();
        assert_eq!(iter.next().unwrap(), Tuple::new(vec![Field::Int(0)]));
    }
}
