//! Delete operator
//!
//! One-shot mirror of Insert: the first fetch drains the child and asks
//! the storage facade to delete each tuple from the table it belongs
//! to, then reports the success count. Per-tuple I/O failures are
//! logged and skipped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::observability::Logger;
use crate::storage::{StoreError, TransactionId, TupleStore};
use crate::tuple::{Field, FieldType, Schema, Tuple};

use super::base::{BoxedOperator, FetchNext, Operator, OperatorBase};
use super::errors::{OperatorError, OperatorResult};

/// Deletes child tuples from their table, counting successes
pub struct Delete {
    txn: TransactionId,
    child: BoxedOperator,
    store: Rc<RefCell<dyn TupleStore>>,
    schema: Schema,
    done: bool,
}

impl Delete {
    /// Creates a delete under `txn` reading doomed tuples from `child`
    pub fn new(
        txn: TransactionId,
        child: BoxedOperator,
        store: Rc<RefCell<dyn TupleStore>>,
    ) -> OperatorBase<Delete> {
        OperatorBase::new(Delete {
            txn,
            child,
            store,
            schema: Schema::unnamed(vec![FieldType::Int]),
            done: false,
        })
    }
}

impl FetchNext for Delete {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn on_open(&mut self) -> OperatorResult<()> {
        self.child.open()
    }

    fn on_close(&mut self) -> OperatorResult<()> {
        self.child.close()
    }

    fn on_rewind(&mut self) -> OperatorResult<()> {
        // One-shot flag survives rewind, same as Insert.
        self.child.rewind()
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        if self.done {
            return Ok(None);
        }
        self.done = true;

        let mut deleted: i64 = 0;
        while self.child.has_next()? {
            let tuple = self.child.next()?;
            match self.store.borrow_mut().delete_tuple(self.txn, &tuple) {
                Ok(()) => deleted += 1,
                Err(StoreError::Io(reason)) => {
                    Logger::warn(
                        "TUPLE_DELETE_FAILED",
                        &[
                            ("reason", reason),
                            ("txn", self.txn.value().to_string()),
                        ],
                    );
                }
                Err(StoreError::Aborted) => return Err(OperatorError::Aborted),
            }
        }
        Ok(Some(Tuple::new(vec![Field::Int(deleted)])))
    }
}
