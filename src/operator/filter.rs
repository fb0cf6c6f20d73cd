//! Filter operator: relational select
//!
//! Pulls from its child and passes through exactly the tuples the
//! predicate accepts, in the child's order. Output schema is the child
//! schema, unchanged.

use crate::predicate::Predicate;
use crate::tuple::{Schema, Tuple};

use super::base::{BoxedOperator, FetchNext, Operator, OperatorBase};
use super::errors::OperatorResult;

/// Order-preserving predicate pass-through
pub struct Filter {
    predicate: Predicate,
    child: BoxedOperator,
}

impl Filter {
    /// Creates a filter over the child's output
    pub fn new(predicate: Predicate, child: BoxedOperator) -> OperatorBase<Filter> {
        OperatorBase::new(Filter { predicate, child })
    }

    /// The predicate tuples are tested against
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}

impl FetchNext for Filter {
    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn on_open(&mut self) -> OperatorResult<()> {
        self.child.open()
    }

    fn on_close(&mut self) -> OperatorResult<()> {
        self.child.close()
    }

    fn on_rewind(&mut self) -> OperatorResult<()> {
        self.child.rewind()
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        while self.child.has_next()? {
            let tuple = self.child.next()?;
            if self.predicate.eval(&tuple)? {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }
}
