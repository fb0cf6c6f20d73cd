//! rowmill - a strict, pull-based relational query execution core
//!
//! Operators pull tuples from their children one at a time, under a shared
//! open/close/rewind lifecycle. Storage, transactions, and planning live
//! outside this crate; the execution tree only sees the `TupleStore` facade
//! and a transaction-scoped handle.

pub mod aggregate;
pub mod observability;
pub mod operator;
pub mod predicate;
pub mod storage;
pub mod tuple;
