//! Tuple and schema model for rowmill
//!
//! This module provides:
//! - `Field` - Closed tagged value union (Int / Text)
//! - `FieldType` - Type tag for a field position
//! - `Column` - Named, typed column descriptor
//! - `Schema` - Ordered column list with concatenating `merge`
//! - `Tuple` - Ordered row of field values matching a schema
//!
//! Comparison is only defined within a field variant; crossing variants is
//! a caller error surfaced as `FieldTypeError`, never a silent false.

mod field;
mod row;
mod schema;

pub use field::{Field, FieldType, FieldTypeError};
pub use row::Tuple;
pub use schema::{Column, Schema};
