//! Storage collaborator interface
//!
//! rowmill does not own physical storage. The mutating operators talk to
//! it through the `TupleStore` facade, under a transaction-scoped handle.
//! Locking and isolation discipline belong entirely to the implementor;
//! the core treats each mutate call as an atomic, independently-failing
//! unit.

use thiserror::Error;

use crate::tuple::Tuple;

/// An opaque, transaction-scoped handle.
///
/// Explicit construction only; no Default exists so a handle cannot be
/// conjured by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Creates a handle with the given value
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value, for logging and debugging only
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Identifies a target table in the external catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(u64);

impl TableId {
    /// Creates a table identifier with the given value
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value, for logging and debugging only
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Failures a mutate call can report
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The write failed for this tuple; the scan may continue
    #[error("storage i/o failure: {0}")]
    Io(String),
    /// The owning transaction was aborted; the scan must stop
    #[error("transaction aborted by storage layer")]
    Aborted,
}

/// Facade over the external storage engine.
///
/// Schema compatibility between a child operator and the target table is
/// checked at operator construction, not here.
pub trait TupleStore {
    /// Inserts a tuple into the given table under the given transaction
    fn insert_tuple(
        &mut self,
        txn: TransactionId,
        table: TableId,
        tuple: &Tuple,
    ) -> Result<(), StoreError>;

    /// Deletes a tuple from the table it belongs to under the given
    /// transaction
    fn delete_tuple(&mut self, txn: TransactionId, tuple: &Tuple) -> Result<(), StoreError>;
}
