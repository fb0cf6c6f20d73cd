//! Observability for rowmill
//!
//! Structured one-line JSON logging with deterministic key ordering.
//! The execution core logs in exactly one place: per-tuple mutate
//! failures inside Insert and Delete.

mod logger;

pub use logger::{Logger, Severity};
