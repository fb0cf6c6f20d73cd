//! Predicate evaluators for rowmill
//!
//! Evaluation is strict: no type coercion, and a cross-variant comparison
//! is an error, not a non-match.
//!
//! This module provides:
//! - `CompareOp` - The six comparison operators
//! - `Operand` - Right-hand side of a single-tuple predicate
//! - `Predicate` - Single-tuple comparison (column vs constant or column)
//! - `JoinPredicate` - Two-tuple comparison (left column vs right column)

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tuple::{Field, FieldTypeError, Tuple};

/// Comparison operators over same-variant field pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    /// Equal
    Eq,
    /// Not equal
    NotEq,
    /// Strictly greater
    Gt,
    /// Greater or equal
    GtEq,
    /// Strictly less
    Lt,
    /// Less or equal
    LtEq,
}

impl CompareOp {
    /// Applies the operator to an already-computed ordering
    pub fn matches(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::NotEq => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::GtEq => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::LtEq => ordering != Ordering::Greater,
        }
    }

    /// Symbol for error messages and display
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Right-hand side of a single-tuple predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A constant value
    Const(Field),
    /// Another column of the same tuple
    Column(usize),
}

/// A single-tuple predicate: `tuple[column] <op> rhs`
#[derive(Debug, Clone)]
pub struct Predicate {
    column: usize,
    op: CompareOp,
    rhs: Operand,
}

impl Predicate {
    /// Creates a predicate comparing a column against a constant or a
    /// sibling column
    pub fn new(column: usize, op: CompareOp, rhs: Operand) -> Self {
        Self { column, op, rhs }
    }

    /// Shorthand for a column-vs-constant predicate
    pub fn with_const(column: usize, op: CompareOp, value: Field) -> Self {
        Self::new(column, op, Operand::Const(value))
    }

    /// The tested column index
    pub fn column(&self) -> usize {
        self.column
    }

    /// The comparison operator
    pub fn op(&self) -> CompareOp {
        self.op
    }

    /// Evaluates the predicate against one tuple.
    ///
    /// Missing columns never match; a cross-variant comparison is an
    /// error.
    pub fn eval(&self, tuple: &Tuple) -> Result<bool, FieldTypeError> {
        let lhs = match tuple.field(self.column) {
            Some(f) => f,
            None => return Ok(false),
        };
        let rhs = match &self.rhs {
            Operand::Const(value) => value,
            Operand::Column(index) => match tuple.field(*index) {
                Some(f) => f,
                None => return Ok(false),
            },
        };
        Ok(self.op.matches(lhs.try_cmp(rhs)?))
    }
}

/// A two-tuple predicate: `left[left_column] <op> right[right_column]`
#[derive(Debug, Clone)]
pub struct JoinPredicate {
    left_column: usize,
    op: CompareOp,
    right_column: usize,
}

impl JoinPredicate {
    /// Creates a join predicate over designated left and right columns
    pub fn new(left_column: usize, op: CompareOp, right_column: usize) -> Self {
        Self {
            left_column,
            op,
            right_column,
        }
    }

    /// The designated left column index
    pub fn left_column(&self) -> usize {
        self.left_column
    }

    /// The designated right column index
    pub fn right_column(&self) -> usize {
        self.right_column
    }

    /// Evaluates the predicate against a (left, right) tuple pair
    pub fn eval(&self, left: &Tuple, right: &Tuple) -> Result<bool, FieldTypeError> {
        let lhs = match left.field(self.left_column) {
            Some(f) => f,
            None => return Ok(false),
        };
        let rhs = match right.field(self.right_column) {
            Some(f) => f,
            None => return Ok(false),
        };
        Ok(self.op.matches(lhs.try_cmp(rhs)?))
    }
}
