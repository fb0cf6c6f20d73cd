//! Field values and their type tags
//!
//! A field is a closed tagged union over the two supported domains:
//! 64-bit signed integers and UTF-8 text. Equality and ordering are only
//! defined within a variant.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 64-bit signed integer
    Int,
    /// UTF-8 string
    Text,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Raised when two fields of different variants are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compare {left} field with {right} field")]
pub struct FieldTypeError {
    /// Type of the left operand
    pub left: FieldType,
    /// Type of the right operand
    pub right: FieldType,
}

/// A single tagged field value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// Integer value
    Int(i64),
    /// Text value
    Text(String),
}

impl Field {
    /// Returns the type tag of this value
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Int(_) => FieldType::Int,
            Field::Text(_) => FieldType::Text,
        }
    }

    /// Compares two fields of the same variant.
    ///
    /// Cross-variant comparison is a contract violation and fails with
    /// `FieldTypeError` rather than producing an arbitrary ordering.
    pub fn try_cmp(&self, other: &Field) -> Result<Ordering, FieldTypeError> {
        match (self, other) {
            (Field::Int(a), Field::Int(b)) => Ok(a.cmp(b)),
            (Field::Text(a), Field::Text(b)) => Ok(a.cmp(b)),
            (l, r) => Err(FieldTypeError {
                left: l.field_type(),
                right: r.field_type(),
            }),
        }
    }

    /// Returns the integer value, if this is an Int field
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Field::Int(v) => Some(*v),
            Field::Text(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{}", v),
            Field::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Int(v)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}
