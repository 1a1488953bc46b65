//! Structured logging for recovered trace anomalies.
//!
//! Nothing in this module is fallible. A [`Diagnostic`] is emitted through
//! `tracing` at `info` level the moment a recovery runs; it is never
//! accumulated or returned to the caller, since the detector may run for the
//! lifetime of a long host process and a growing `Vec<Diagnostic>` would be
//! an unbounded leak. A caller that wants to collect these subscribes its own
//! `tracing` layer.

use std::fmt;

use crate::ids::{BufferId, EventId, StreamId};

/// A single recovered trace anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An access referenced a buffer with no recorded allocation.
    BufferBackfilled { buffer: BufferId },
    /// A deallocation referenced a buffer that was already live; the prior
    /// state was dropped before recreating it.
    BufferReplaced { buffer: BufferId },
    /// `create_stream` was called for a stream that already exists.
    StreamDuplicateCreate { stream: StreamId },
    /// `bump` or `record`/`wait` referenced a stream with no recorded clock.
    StreamBackfilled { stream: StreamId },
    /// `delete_event` referenced an event with no recorded snapshot.
    EventBackfilled { event: EventId },
    /// `create_event` referenced an event that already exists; it was
    /// deleted and recreated.
    EventRecreated { event: EventId },
    /// `record`/`wait` referenced an event with no recorded snapshot.
    EventBackfilledOnSync { event: EventId },
}

impl Diagnostic {
    /// The `tracing` event name this diagnostic is logged under.
    fn target(&self) -> &'static str {
        match self {
            Diagnostic::BufferBackfilled { .. } => "buffer.backfill",
            Diagnostic::BufferReplaced { .. } => "buffer.replace",
            Diagnostic::StreamDuplicateCreate { .. } => "stream.duplicate_create",
            Diagnostic::StreamBackfilled { .. } => "stream.backfill",
            Diagnostic::EventBackfilled { .. } => "event.backfill",
            Diagnostic::EventRecreated { .. } => "event.recreate",
            Diagnostic::EventBackfilledOnSync { .. } => "event.backfill",
        }
    }

    /// Logs this diagnostic at `info` level with structured fields for the
    /// identifier involved.
    pub fn emit(&self) {
        match *self {
            Diagnostic::BufferBackfilled { buffer } => {
                tracing::info!(target: "racecheck", event = self.target(), buffer = buffer.0, "back-filled missing buffer allocation");
            }
            Diagnostic::BufferReplaced { buffer } => {
                tracing::info!(target: "racecheck", event = self.target(), buffer = buffer.0, "replaced already-live buffer state");
            }
            Diagnostic::StreamDuplicateCreate { stream } => {
                tracing::info!(target: "racecheck", event = self.target(), stream = stream.0, "ignored duplicate stream creation");
            }
            Diagnostic::StreamBackfilled { stream } => {
                tracing::info!(target: "racecheck", event = self.target(), stream = stream.0, "back-filled missing stream clock");
            }
            Diagnostic::EventBackfilled { event } => {
                tracing::info!(target: "racecheck", event = self.target(), event_id = event.0, "back-filled missing event on delete");
            }
            Diagnostic::EventRecreated { event } => {
                tracing::info!(target: "racecheck", event = self.target(), event_id = event.0, "recreated already-live event");
            }
            Diagnostic::EventBackfilledOnSync { event } => {
                tracing::info!(target: "racecheck", event = self.target(), event_id = event.0, "back-filled missing event on record/wait");
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BufferBackfilled { buffer } => {
                write!(f, "back-filled missing allocation for buffer {buffer}")
            }
            Diagnostic::BufferReplaced { buffer } => {
                write!(f, "replaced already-live state for buffer {buffer}")
            }
            Diagnostic::StreamDuplicateCreate { stream } => {
                write!(f, "ignored duplicate creation of stream {stream}")
            }
            Diagnostic::StreamBackfilled { stream } => {
                write!(f, "back-filled missing clock for stream {stream}")
            }
            Diagnostic::EventBackfilled { event } => {
                write!(f, "back-filled missing event {event} on delete")
            }
            Diagnostic::EventRecreated { event } => {
                write!(f, "recreated already-live event {event}")
            }
            Diagnostic::EventBackfilledOnSync { event } => {
                write!(f, "back-filled missing event {event} on record/wait")
            }
        }
    }
}
