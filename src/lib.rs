//! A dynamic data-race detector for kernels launched across asynchronous
//! execution streams over a shared device memory pool.
//!
//! This crate is the happens-before engine only: a [`Context`] consumes a
//! normalized stream of four kinds of events — stream creation,
//! synchronization (event creation/deletion/record/wait), buffer
//! allocation/deallocation, and kernel launches tagged with the read/write
//! effect of each argument — and returns, per launch, every [`Report`] of a
//! prior conflicting access not ordered before the current one.
//!
//! Argument extraction (deciding which buffer arguments of a real kernel
//! call are read versus written), interception of the host dispatch layer,
//! and call-stack capture are collaborator concerns: this crate models them
//! as the [`OperatorDescriptor`] and [`StackSnapshot`] traits and a
//! caller-supplied read/write partition, nothing more.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use racecheck::{BufferId, Context, StreamId, StringOperator, StringStack};
//!
//! let mut ctx = Context::default();
//! ctx.on_stream_create(StreamId(0));
//! ctx.on_stream_create(StreamId(1));
//! ctx.on_buffer_alloc(BufferId(0xB), None);
//!
//! let op: Arc<dyn racecheck::OperatorDescriptor> = Arc::new(StringOperator("add".into()));
//! let stack: Arc<dyn racecheck::StackSnapshot> = Arc::new(StringStack("<no stack>".into()));
//! let names = HashMap::new();
//!
//! // Stream 0 writes the buffer, stream 1 reads it with no synchronization.
//! ctx.on_launch(StreamId(0), &[], &[BufferId(0xB)], op.clone(), &names, stack.clone());
//! let reports = ctx.on_launch(StreamId(1), &[BufferId(0xB)], &[], op, &names, stack);
//!
//! assert_eq!(reports.len(), 1);
//! ```

mod access;
mod analyzer;
mod buffer_log;
mod config;
mod diagnostic;
mod ids;
mod report;
mod sync_table;
mod vector_clock;

#[cfg(feature = "tracing-subscriber")]
mod log;

#[cfg(test)]
mod tests;

pub use access::{Access, AccessKind, OperatorDescriptor, StackSnapshot, StringOperator, StringStack};
pub use analyzer::Context;
pub use config::Config;
pub use diagnostic::Diagnostic;
pub use ids::{BufferId, EventId, SeqNum, StreamId};
pub use report::Report;

#[cfg(feature = "tracing-subscriber")]
pub use log::{init_logging, LogError};
