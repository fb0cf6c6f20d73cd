//! Operator lifecycle contract and shared state machine
//!
//! Every operator obeys the same state machine: `Closed -> Open ->
//! (Closed)`. Pulling from a closed operator is a programming error, not
//! an empty result. The buffered `has_next`/`next` pair is implemented
//! once, here: concrete operators only provide `fetch_next`, and at most
//! one tuple is held in flight.

use crate::tuple::{Schema, Tuple};

use super::errors::{OperatorError, OperatorResult};

/// A pull-based, schema-producing component of the execution tree.
///
/// Trees are single-owner: every operator exclusively owns its children,
/// and one logical thread of control drives the whole tree. Leaves
/// backed by storage live outside this crate; anything honoring this
/// contract can serve as a child.
pub trait Operator {
    /// The schema of every tuple this operator emits. Fixed once the
    /// operator is opened; unchanged across rewind.
    fn schema(&self) -> &Schema;

    /// Opens this operator and, first, all of its children. Valid only
    /// from the Closed state.
    fn open(&mut self) -> OperatorResult<()>;

    /// Closes this operator and all of its children, releasing any
    /// buffered tuple. Closing an already-closed operator is a no-op.
    fn close(&mut self) -> OperatorResult<()>;

    /// Resets positional progress to the beginning of the output
    /// sequence without a close/open cycle. Valid only while Open.
    fn rewind(&mut self) -> OperatorResult<()>;

    /// True when another tuple is available. Valid only while Open.
    fn has_next(&mut self) -> OperatorResult<bool>;

    /// Returns the next tuple, or `EndOfStream` past exhaustion. Valid
    /// only while Open.
    fn next(&mut self) -> OperatorResult<Tuple>;
}

/// An exclusively-owned child operator
pub type BoxedOperator = Box<dyn Operator>;

/// The single extension point concrete operators implement.
///
/// `OperatorBase` turns this into the full `Operator` contract; the
/// `on_*` hooks run child lifecycle work while the wrapper enforces the
/// state machine.
pub trait FetchNext {
    /// Output schema of the produced tuples
    fn schema(&self) -> &Schema;

    /// Opens children and per-operator cursors
    fn on_open(&mut self) -> OperatorResult<()>;

    /// Closes children
    fn on_close(&mut self) -> OperatorResult<()>;

    /// Resets children and per-operator cursors
    fn on_rewind(&mut self) -> OperatorResult<()>;

    /// Produces the next tuple, or None once exhausted
    fn fetch_next(&mut self) -> OperatorResult<Option<Tuple>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Closed,
    Open,
}

/// Shared lifecycle wrapper: owns the Closed/Open flag and the one-tuple
/// lookahead buffer for every concrete operator.
pub struct OperatorBase<F: FetchNext> {
    inner: F,
    status: Status,
    lookahead: Option<Tuple>,
}

impl<F: FetchNext> std::fmt::Debug for OperatorBase<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorBase")
            .field("status", &self.status)
            .field("lookahead", &self.lookahead.is_some())
            .finish()
    }
}

impl<F: FetchNext> OperatorBase<F> {
    /// Wraps a fetch implementation in the shared state machine
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            status: Status::Closed,
            lookahead: None,
        }
    }

    /// Read access to the wrapped operator implementation
    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn ensure_open(&self, call: &str) -> OperatorResult<()> {
        match self.status {
            Status::Open => Ok(()),
            Status::Closed => Err(OperatorError::state(format!(
                "{} called on a closed operator",
                call
            ))),
        }
    }

    fn fill_lookahead(&mut self) -> OperatorResult<()> {
        if self.lookahead.is_none() {
            self.lookahead = self.inner.fetch_next()?;
        }
        Ok(())
    }
}

impl<F: FetchNext + 'static> OperatorBase<F> {
    /// Boxes this operator for use as a child in an operator tree
    pub fn boxed(self) -> BoxedOperator {
        Box::new(self)
    }
}

impl<F: FetchNext> Operator for OperatorBase<F> {
    fn schema(&self) -> &Schema {
        self.inner.schema()
    }

    fn open(&mut self) -> OperatorResult<()> {
        if self.status == Status::Open {
            return Err(OperatorError::state(
                "open called on an already open operator",
            ));
        }
        // Children first, so a child is never pulled before it is open.
        self.inner.on_open()?;
        self.status = Status::Open;
        Ok(())
    }

    fn close(&mut self) -> OperatorResult<()> {
        if self.status == Status::Closed {
            return Ok(());
        }
        self.lookahead = None;
        self.inner.on_close()?;
        self.status = Status::Closed;
        Ok(())
    }

    fn rewind(&mut self) -> OperatorResult<()> {
        self.ensure_open("rewind")?;
        self.lookahead = None;
        self.inner.on_rewind()
    }

    fn has_next(&mut self) -> OperatorResult<bool> {
        self.ensure_open("has_next")?;
        self.fill_lookahead()?;
        Ok(self.lookahead.is_some())
    }

    fn next(&mut self) -> OperatorResult<Tuple> {
        self.ensure_open("next")?;
        self.fill_lookahead()?;
        self.lookahead.take().ok_or(OperatorError::EndOfStream)
    }
}
