//! Value types describing a single read or write and the opaque,
//! collaborator-supplied context attached to it.

use std::fmt;
use std::sync::Arc;

use crate::ids::{SeqNum, StreamId};

/// Whether an [`Access`] reads or writes the buffer it's attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => write!(f, "reading from"),
            AccessKind::Write => write!(f, "writing to"),
        }
    }
}

/// A captured call stack, opaque to the core beyond its rendered form.
///
/// The core invokes [`StackSnapshot::format`] at most once per launch or
/// allocation it reports on — it never assumes capture is cheap, and never
/// formats a stack it ends up not needing to report.
pub trait StackSnapshot: fmt::Debug + Send + Sync {
    fn format(&self) -> String;
}

/// The kernel signature carried into a report, opaque beyond its rendered
/// form.
pub trait OperatorDescriptor: fmt::Debug + Send + Sync {
    fn format(&self) -> String;
}

/// A ready-made [`StackSnapshot`] for collaborators, tests, and the bundled
/// demo that have nothing richer than a pre-formatted string to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringStack(pub String);

impl StackSnapshot for StringStack {
    fn format(&self) -> String {
        self.0.clone()
    }
}

/// A ready-made [`OperatorDescriptor`] for collaborators, tests, and the
/// bundled demo that have nothing richer than a kernel name to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringOperator(pub String);

impl OperatorDescriptor for StringOperator {
    fn format(&self) -> String {
        self.0.clone()
    }
}

/// A single read or write performed by a kernel launch.
///
/// Accesses are value objects: once constructed they are never mutated, and
/// are cheaply cloned (the heavy fields are behind `Arc`) because the same
/// access is simultaneously referenced from the buffer's state and from any
/// report that cites it.
#[derive(Debug, Clone)]
pub struct Access {
    pub kind: AccessKind,
    pub seq_num: SeqNum,
    pub stream: StreamId,
    pub operator: Arc<dyn OperatorDescriptor>,
    pub arg_names: Vec<String>,
    pub stack: Arc<dyn StackSnapshot>,
}

impl Access {
    pub fn new(
        kind: AccessKind,
        seq_num: SeqNum,
        stream: StreamId,
        operator: Arc<dyn OperatorDescriptor>,
        arg_names: Vec<String>,
        stack: Arc<dyn StackSnapshot>,
    ) -> Self {
        Access {
            kind,
            seq_num,
            stream,
            operator,
            arg_names,
            stack,
        }
    }
}
