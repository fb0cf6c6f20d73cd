//! In-memory leaf operator
//!
//! Serves a fixed tuple sequence under the full lifecycle contract.
//! Backs the aggregate result sub-iterator and any caller that needs a
//! materialized leaf.

use crate::tuple::{Schema, Tuple};

use super::base::{FetchNext, OperatorBase};
use super::errors::OperatorResult;

/// Restartable iterator over a materialized tuple sequence
pub struct TupleIterator {
    schema: Schema,
    tuples: Vec<Tuple>,
    position: usize,
}

impl TupleIterator {
    /// Creates a leaf over the given schema and rows
    pub fn new(schema: Schema, tuples: Vec<Tuple>) -> OperatorBase<TupleIterator> {
        OperatorBase::new(TupleIterator {
            schema,
            tuples,
            position: 0,
        })
    }

    /// Number of rows in the backing sequence
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// True when the backing sequence is empty
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

impl FetchNext for TupleIterator {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn on_open(&mut self) -> OperatorResult<()> {
        self.position = 0;
        Ok(())
    }

    fn on_close(&mut self) -> OperatorResult<()> {
        self.position = 0;
        Ok(())
    }

    fn on_rewind(&mut self) -> OperatorResult<()> {
        self.position = 0;
        Ok(())
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        match self.tuples.get(self.position) {
            Some(tuple) => {
                self.position += 1;
                Ok(Some(tuple.clone()))
            }
            None => Ok(None),
        }
    }
}
