//! Operator error types
//!
//! Error codes:
//! - MILL_OPERATOR_STATE (lifecycle contract violated, programming error)
//! - MILL_END_OF_STREAM (pulled past exhaustion)
//! - MILL_TXN_ABORTED (storage layer aborted the owning transaction)
//! - MILL_TYPE_MISMATCH (cross-variant field comparison)
//! - MILL_SCHEMA_MISMATCH (tuple or column shape conflict)

use std::fmt;

use crate::tuple::FieldTypeError;

/// Errors raised by the operator lifecycle and pull chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// The open/close/rewind/fetch contract was violated. Always a
    /// programming error; never retried.
    State {
        /// What was attempted, and in which state
        message: String,
    },
    /// `next()` was called past exhaustion. The base layer converts this
    /// into `has_next() == false` before callers ever see it there.
    EndOfStream,
    /// The owning transaction was aborted by the storage layer. No
    /// operator catches this; it passes through every ancestor.
    Aborted,
    /// Two fields of different variants were compared
    TypeMismatch {
        /// Evaluation context
        message: String,
    },
    /// A tuple or column did not have the shape the operator was built
    /// for
    SchemaMismatch {
        /// Shape conflict description
        message: String,
    },
}

impl OperatorError {
    /// Creates a lifecycle violation error
    pub fn state(message: impl Into<String>) -> Self {
        OperatorError::State {
            message: message.into(),
        }
    }

    /// Creates a type mismatch error
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        OperatorError::TypeMismatch {
            message: message.into(),
        }
    }

    /// Creates a schema mismatch error
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        OperatorError::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Returns the stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            OperatorError::State { .. } => "MILL_OPERATOR_STATE",
            OperatorError::EndOfStream => "MILL_END_OF_STREAM",
            OperatorError::Aborted => "MILL_TXN_ABORTED",
            OperatorError::TypeMismatch { .. } => "MILL_TYPE_MISMATCH",
            OperatorError::SchemaMismatch { .. } => "MILL_SCHEMA_MISMATCH",
        }
    }

    /// True for lifecycle contract violations
    pub fn is_state_error(&self) -> bool {
        matches!(self, OperatorError::State { .. })
    }

    /// True for the normal exhaustion signal
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, OperatorError::EndOfStream)
    }
}

impl fmt::Display for OperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorError::State { message }
            | OperatorError::TypeMismatch { message }
            | OperatorError::SchemaMismatch { message } => {
                write!(f, "[{}] {}", self.code(), message)
            }
            OperatorError::EndOfStream => {
                write!(f, "[{}] pulled past end of stream", self.code())
            }
            OperatorError::Aborted => {
                write!(f, "[{}] transaction aborted by storage layer", self.code())
            }
        }
    }
}

impl std::error::Error for OperatorError {}

impl From<FieldTypeError> for OperatorError {
    fn from(err: FieldTypeError) -> Self {
        OperatorError::TypeMismatch {
            message: err.to_string(),
        }
    }
}

/// Result type for operator calls
pub type OperatorResult<T> = Result<T, OperatorError>;
