//! Nested-loop join operator
//!
//! For each outer (left) tuple, the inner (right) child is rewound and
//! scanned in full; every inner tuple the predicate accepts is emitted
//! concatenated after the outer tuple. Output schema is
//! left-then-right, with duplicate join columns kept.
//!
//! Cursor state machine across `fetch_next` calls:
//!
//! ```text
//! NeedOuter --outer available, inner rewound--> ScanningInner
//! ScanningInner --inner exhausted--> NeedOuter
//! NeedOuter --outer exhausted--> done (None)
//! ```

use crate::predicate::JoinPredicate;
use crate::tuple::{Schema, Tuple};

use super::base::{BoxedOperator, FetchNext, Operator, OperatorBase};
use super::errors::OperatorResult;

/// Cross-call cursor: the one piece of hidden state in the core
enum JoinCursor {
    /// No outer tuple in hand; the next pull advances the left child
    NeedOuter,
    /// Pairing this outer tuple against the remaining inner tuples
    ScanningInner {
        /// Current left tuple
        outer: Tuple,
    },
}

/// Nested-loop join of two children on a binary column predicate
pub struct Join {
    predicate: JoinPredicate,
    left: BoxedOperator,
    right: BoxedOperator,
    schema: Schema,
    cursor: JoinCursor,
}

impl Join {
    /// Creates a join; output schema is merge(left, right)
    pub fn new(
        predicate: JoinPredicate,
        left: BoxedOperator,
        right: BoxedOperator,
    ) -> OperatorBase<Join> {
        let schema = Schema::merge(left.schema(), right.schema());
        OperatorBase::new(Join {
            predicate,
            left,
            right,
            schema,
            cursor: JoinCursor::NeedOuter,
        })
    }

    /// The join predicate
    pub fn predicate(&self) -> &JoinPredicate {
        &self.predicate
    }
}

impl FetchNext for Join {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn on_open(&mut self) -> OperatorResult<()> {
        self.cursor = JoinCursor::NeedOuter;
        self.left.open()?;
        self.right.open()
    }

    fn on_close(&mut self) -> OperatorResult<()> {
        self.cursor = JoinCursor::NeedOuter;
        self.left.close()?;
        self.right.close()
    }

    fn on_rewind(&mut self) -> OperatorResult<()> {
        // Dropping the outer tuple forces a fresh inner rewind on the
        // next pull.
        self.cursor = JoinCursor::NeedOuter;
        self.left.rewind()?;
        self.right.rewind()
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        loop {
            let outer = match &self.cursor {
                JoinCursor::NeedOuter => {
                    if !self.left.has_next()? {
                        return Ok(None);
                    }
                    let outer = self.left.next()?;
                    self.right.rewind()?;
                    self.cursor = JoinCursor::ScanningInner {
                        outer: outer.clone(),
                    };
                    outer
                }
                JoinCursor::ScanningInner { outer } => outer.clone(),
            };

            while self.right.has_next()? {
                let inner = self.right.next()?;
                if self.predicate.eval(&outer, &inner)? {
                    return Ok(Some(Tuple::concat(&outer, &inner)));
                }
            }
            self.cursor = JoinCursor::NeedOuter;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{Operator, TupleIterator};
    use crate::predicate::CompareOp;
    use crate::tuple::{Field, FieldType};

    fn source(values: &[i64]) -> BoxedOperator {
        TupleIterator::new(
            Schema::unnamed(vec![FieldType::Int]),
            values
                .iter()
                .map(|v| Tuple::new(vec![Field::Int(*v)]))
                .collect(),
        )
        .boxed()
    }

    fn drain(op: &mut dyn Operator) -> Vec<Tuple> {
        let mut out = Vec::new();
        while op.has_next().unwrap() {
            out.push(op.next().unwrap());
        }
        out
    }

    #[test]
    fn test_equijoin_pairs() {
        let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
        let mut join = Join::new(pred, source(&[1, 2, 2]), source(&[2, 3, 2]));
        join.open().unwrap();
        let rows = drain(&mut join);
        // Each left 2 pairs with each right 2
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.len(), 2);
            assert_eq!(row.field(0), row.field(1));
        }
    }

    #[test]
    fn test_output_schema_is_left_then_right() {
        let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
        let join = Join::new(pred, source(&[]), source(&[]));
        assert_eq!(
            join.schema(),
            &Schema::unnamed(vec![FieldType::Int, FieldType::Int])
        );
    }

    #[test]
    fn test_empty_sides() {
        let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
        let mut join = Join::new(pred, source(&[]), source(&[1]));
        join.open().unwrap();
        assert!(!join.has_next().unwrap());

        let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
        let mut join = Join::new(pred, source(&[1]), source(&[]));
        join.open().unwrap();
        assert!(!join.has_next().unwrap());
    }

    #[test]
    fn test_inequality_join() {
        let pred = JoinPredicate::new(0, CompareOp::Lt, 0);
        let mut join = Join::new(pred, source(&[1, 2]), source(&[2]));
        join.open().unwrap();
        let rows = drain(&mut join);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], Tuple::new(vec![Field::Int(1), Field::Int(2)]));
    }

    #[test]
    fn test_rewind_mid_scan_restarts_cross_product() {
        let pred = JoinPredicate::new(0, CompareOp::Eq, 0);
        let mut join = Join::new(pred, source(&[1, 2]), source(&[1, 2]));
        join.open().unwrap();

        let first = drain(&mut join);
        join.rewind().unwrap();
        let second = drain(&mut join);
        assert_eq!(first, second);

        // Rewind after a partial drain must also restart from the top
        join.rewind().unwrap();
        join.next().unwrap();
        join.rewind().unwrap();
        assert_eq!(drain(&mut join), first);
    }
}
