//! Schema: the ordered column list describing a tuple's shape
//!
//! A schema is fixed once an operator is opened: column count and
//! per-position type never change across rewind.

use serde::{Deserialize, Serialize};

use super::field::FieldType;
use super::row::Tuple;

/// A single column descriptor: optional name plus type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, if the producing operator assigns one
    pub name: Option<String>,
    /// Type of every field at this position
    pub field_type: FieldType,
}

impl Column {
    /// Creates a named column
    pub fn named(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: Some(name.into()),
            field_type,
        }
    }

    /// Creates an anonymous column
    pub fn anonymous(field_type: FieldType) -> Self {
        Self {
            name: None,
            field_type,
        }
    }
}

/// An ordered list of columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema from an ordered column list
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Creates a schema of anonymous columns from an ordered type list
    pub fn unnamed(types: Vec<FieldType>) -> Self {
        Self {
            columns: types.into_iter().map(Column::anonymous).collect(),
        }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the column at `index`, if in range
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns the type of the column at `index`, if in range
    pub fn field_type(&self, index: usize) -> Option<FieldType> {
        self.columns.get(index).map(|c| c.field_type)
    }

    /// Iterates over the columns in order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Concatenates two schemas, left columns first.
    ///
    /// Duplicate column names are kept; removing them is a projection
    /// concern, not a schema one.
    pub fn merge(left: &Schema, right: &Schema) -> Schema {
        let mut columns = Vec::with_capacity(left.len() + right.len());
        columns.extend(left.columns.iter().cloned());
        columns.extend(right.columns.iter().cloned());
        Schema { columns }
    }

    /// Checks that a tuple has this schema's arity and per-position types
    pub fn matches(&self, tuple: &Tuple) -> bool {
        tuple.len() == self.len()
            && tuple
                .fields()
                .zip(self.columns.iter())
                .all(|(field, column)| field.field_type() == column.field_type)
    }
}
