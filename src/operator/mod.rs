//! Operator subsystem for rowmill
//!
//! Composable, pull-based execution operators sharing one lifecycle
//! state machine.
//!
//! # Lifecycle
//!
//! `Closed -> open() -> Open -> close() -> Closed`; `rewind`,
//! `has_next`, and `next` are valid only while Open. The shared
//! `OperatorBase` wrapper enforces the machine and buffers at most one
//! tuple of lookahead; concrete operators implement only `FetchNext`.
//!
//! # Operators
//!
//! - `TupleIterator` - Materialized in-memory leaf
//! - `Filter` - Order-preserving relational select
//! - `Join` - Nested-loop join, left-then-right output schema
//! - `Aggregate` - Blocking grouped aggregation (drains its child on open)
//! - `Insert` / `Delete` - One-shot mutation, reporting a success count

mod aggregate;
mod base;
mod delete;
mod errors;
mod filter;
mod insert;
mod join;
mod tuple_iterator;

pub use aggregate::Aggregate;
pub use base::{BoxedOperator, FetchNext, Operator, OperatorBase};
pub use delete::Delete;
pub use errors::{OperatorError, OperatorResult};
pub use filter::Filter;
pub use insert::Insert;
pub use join::Join;
pub use tuple_iterator::TupleIterator;
