//! Insert operator
//!
//! One-shot: the first fetch drains the child and inserts every tuple
//! into the target table through the storage facade, then reports the
//! success count as a single-column row. Later fetches signal normal
//! exhaustion. A per-tuple I/O failure is logged and skipped; it never
//! aborts the scan.

use std::cell::RefCell;
use std::rc::Rc;

use crate::observability::Logger;
use crate::storage::{StoreError, TableId, TransactionId, TupleStore};
use crate::tuple::{Field, FieldType, Schema, Tuple};

use super::base::{BoxedOperator, FetchNext, Operator, OperatorBase};
use super::errors::{OperatorError, OperatorResult};

/// Inserts child tuples into a table, counting successes
pub struct Insert {
    txn: TransactionId,
    table: TableId,
    child: BoxedOperator,
    store: Rc<RefCell<dyn TupleStore>>,
    schema: Schema,
    done: bool,
}

impl Insert {
    /// Creates an insert into `table` under `txn`.
    ///
    /// The child's schema must match the target table's schema; a
    /// mismatch is rejected here, not at fetch time.
    pub fn new(
        txn: TransactionId,
        child: BoxedOperator,
        table: TableId,
        table_schema: &Schema,
        store: Rc<RefCell<dyn TupleStore>>,
    ) -> OperatorResult<OperatorBase<Insert>> {
        if child.schema() != table_schema {
            return Err(OperatorError::schema_mismatch(format!(
                "child schema has {} columns, table {} expects {}",
                child.schema().len(),
                table.value(),
                table_schema.len()
            )));
        }
        Ok(OperatorBase::new(Insert {
            txn,
            table,
            child,
            store,
            schema: Schema::unnamed(vec![FieldType::Int]),
            done: false,
        }))
    }
}

impl FetchNext for Insert {
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
        // The one-shot flag survives rewind: the effectful work happens
        // once per operator lifetime.
        self.child.rewind()
    }

    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>> {
        if self.done {
            return Ok(None);
        }
        self.done = true;

        let mut inserted: i64 = 0;
        while self.child.has_next()? {
            let tuple = self.child.next()?;
            match self
                .store
                .borrow_mut()
                .insert_tuple(self.txn, self.table, &tuple)
            {
                Ok(()) => inserted += 1,
                Err(StoreError::Io(reason)) => {
                    Logger::warn(
                        "TUPLE_INSERT_FAILED",
                        &[
                            ("reason", reason),
                            ("table", self.table.value().to_string()),
                            ("txn", self.txn.value().to_string()),
                        ],
                    );
                }
                Err(StoreError::Aborted) => return Err(OperatorError::Aborted),
            }
        }
        Ok(Some(Tuple::new(vec![Field::Int(inserted)])))
    }
}
