//! Aggregate operator
//!
//! The one blocking operator in the core: on open it drains its child
//! completely into an aggregator engine, then serves rows from the
//! engine's materialized result sequence. Rewind rewinds that sequence
//! only; the child is never re-read.

use crate::aggregate::{
    AggregateOp, Aggregator, EmptyAggregatePolicy, IntegerAggregator, StringAggregator,
};
use crate::tuple::{Column, FieldType, Schema, Tuple};

use super::base::{BoxedOperator, FetchNext, Operator, OperatorBase};
use super::errors::{OperatorError, OperatorResult};
use super::tuple_iterator::TupleIterator;

/// Grouped aggregation over a single column of the child's output
pub struct Aggregate {
    child: BoxedOperator,
    agg_column: usize,
    agg_type: FieldType,
    group: Option<(usize, FieldType)>,
    op: AggregateOp,
    policy: EmptyAggregatePolicy,
    schema: Schema,
    results: Option<OperatorBase<TupleIterator>>,
}

impl Aggregate {
    /// Creates an aggregate over `child[agg_column]`, optionally grouped
    /// by `group_column`.
    ///
    /// Construction validates column indices against the child schema
    /// and rejects non-COUNT operators over Text aggregate columns.
    pub fn new(
        child: BoxedOperator,
        agg_column: usize,
        group_column: Option<usize>,
        op: AggregateOp,
        policy: EmptyAggregatePolicy,
    ) -> OperatorResult<OperatorBase<Aggregate>> {
        let agg_type = child.schema().field_type(agg_column).ok_or_else(|| {
            OperatorError::schema_mismatch(format!(
                "aggregate column {} out of range for child schema of {} columns",
                agg_column,
                child.schema().len()
            ))
        })?;
        if agg_type != FieldType::Int && op != AggregateOp::Count {
            return Err(OperatorError::schema_mismatch(format!(
                "{} aggregate requires an int column, child column {} is {}",
                op, agg_column, agg_type
            )));
        }

        let group = match group_column {
            None => None,
            Some(index) => {
                let group_type = child.schema().field_type(index).ok_or_else(|| {
                    OperatorError::schema_mismatch(format!(
                        "group-by column {} out of range for child schema of {} columns",
                        index,
                        child.schema().len()
                    ))
                })?;
                Some((index, group_type))
            }
        };

        let schema = match group {
            None => Schema::unnamed(vec![FieldType::Int]),
            Some((_, group_type)) => Schema::new(vec![
                Column::anonymous(group_type),
                Column::anonymous(FieldType::Int),
            ]),
        };

        Ok(OperatorBase::new(Aggregate {
            child,
            agg_column,
            agg_type,
            group,
            op,
            policy,
            schema,
            results: None,
        }))
    }

    /// The aggregation operator
    pub fn op(&self) -> AggregateOp {
        self.op
    }

    fn build_aggregator(&self) -> OperatorResult<Box<dyn Aggregator>> {
        if self.agg_type == FieldType::Int {
            Ok(Box::new(IntegerAggregator::new(
                self.group,
                self.agg_column,
                self.op,
                self.policy,
            )))
        } else {
            Ok(Box::new(StringAggregator::new(
                self.group,
                self.op,
                self.policy,
            )?))
        }
    }
}

impl FetchNext for Aggregate {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn on_open(&mut self) -> OperatorResult<()> {
        self.child.open()?;

        // Eager drain: the whole input is consumed before the first row
        // is observable.
        let mut aggregator = self.build_aggregator()?;
        while self.child.has_next()? {
            aggregator.merge_tuple_into_group(&self.child.next()?)?;
        }

        let mut results = aggregator.iterator();
        results.open()?;
        self.results = Some(results);
        Ok(())
    }

    fn on_close(&mut self) -> OperatorResult<()> {
        if let Some(mut results) = self.results.take() {
            results.close()?;
        }
        self.child.close()
    }

    fn on_rewind(&mut self) -> OperatorResult<()> {
        // Cheap: the result sequence restarts; nothing is recomputed.
        self.results
            .as_mut()
            .ok_or_else(|| OperatorError::state("rewind called before aggregate results exist"))?
            .rewind()
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        let results = self
            .results
            .as_mut()
            .ok_or_else(|| OperatorError::state("fetch called before aggregate results exist"))?;
        if results.has_next()? {
            Ok(Some(results.next()?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::Field;

    fn two_column_source(rows: &[(&str, i64)]) -> BoxedOperator {
        TupleIterator::new(
            Schema::new(vec![
                Column::named("g", FieldType::Text),
                Column::named("v", FieldType::Int),
            ]),
            rows.iter()
                .map(|(g, v)| Tuple::new(vec![Field::Text((*g).into()), Field::Int(*v)]))
                .collect(),
        )
        .boxed()
    }

    #[test]
    fn test_grouped_sum_two_groups() {
        let child = two_column_source(&[("A", 10), ("B", 20), ("A", 30)]);
        let mut agg = Aggregate::new(
            child,
            1,
            Some(0),
            AggregateOp::Sum,
            EmptyAggregatePolicy::default(),
        )
        .unwrap();
        agg.open().unwrap();

        let mut rows = Vec::new();
        while agg.has_next().unwrap() {
            rows.push(agg.next().unwrap());
        }
        assert_eq!(rows.len(), 2);
        assert!(rows.contains(&Tuple::new(vec![Field::Text("A".into()), Field::Int(40)])));
        assert!(rows.contains(&Tuple::new(vec![Field::Text("B".into()), Field::Int(20)])));
    }

    #[test]
    fn test_result_schema_shapes() {
        let grouped = Aggregate::new(
            two_column_source(&[]),
            1,
            Some(0),
            AggregateOp::Sum,
            EmptyAggregatePolicy::default(),
        )
        .unwrap();
        assert_eq!(grouped.schema().len(), 2);
        assert_eq!(grouped.schema().field_type(0), Some(FieldType::Text));
        assert_eq!(grouped.schema().field_type(1), Some(FieldType::Int));

        let global = Aggregate::new(
            two_column_source(&[]),
            1,
            None,
            AggregateOp::Sum,
            EmptyAggregatePolicy::default(),
        )
        .unwrap();
        assert_eq!(global.schema(), &Schema::unnamed(vec![FieldType::Int]));
    }

    #[test]
    fn test_min_over_text_column_rejected_at_construction() {
        let err = Aggregate::new(
            two_column_source(&[]),
            0,
            None,
            AggregateOp::Min,
            EmptyAggregatePolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "MILL_SCHEMA_MISMATCH");
    }

    #[test]
    fn test_count_over_text_column_allowed() {
        let child = two_column_source(&[("A", 1), ("B", 2)]);
        let mut agg = Aggregate::new(
            child,
            0,
            None,
            AggregateOp::Count,
            EmptyAggregatePolicy::default(),
        )
        .unwrap();
        agg.open().unwrap();
        assert_eq!(agg.next().unwrap(), Tuple::new(vec![Field::Int(2)]));
    }

    #[test]
    fn test_out_of_range_columns_rejected() {
        assert!(Aggregate::new(
            two_column_source(&[]),
            5,
            None,
            AggregateOp::Sum,
            EmptyAggregatePolicy::default(),
        )
        .is_err());
        assert!(Aggregate::new(
            two_column_source(&[]),
            1,
            Some(5),
            AggregateOp::Sum,
            EmptyAggregatePolicy::default(),
        )
        .is_err());
    }
}
