//! The orchestrator: owns the buffer access log and stream sync table, and
//! turns a normalized event stream into race reports.

use std::collections::HashMap;
use std::sync::Arc;

use crate::access::{Access, AccessKind, OperatorDescriptor, StackSnapshot};
use crate::buffer_log::BufferAccessLog;
use crate::config::Config;
use crate::ids::{BufferId, EventId, SeqNum, StreamId};
use crate::report::Report;
use crate::sync_table::StreamSyncTable;

/// The single owning value a collaborator constructs, holds, and (if its
/// host program dispatches events from multiple threads) serializes access
/// to. Aggregates the buffer access log, the stream sync table, and the
/// monotonic launch counter.
///
/// `Context` is `Send` but intentionally not required to be `Sync`: a
/// multi-threaded host wraps it in its own mutex across the
/// "observe -> handle -> record access" critical section of each launch,
/// rather than the core providing internal locking.
#[derive(Debug)]
pub struct Context {
    config: Config,
    buffers: BufferAccessLog,
    streams: StreamSyncTable,
    next_seq_num: i64,
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Config::default())
    }
}

impl Context {
    pub fn new(config: Config) -> Self {
        let hint = config.capacity_hint();
        Context {
            config,
            buffers: BufferAccessLog::with_capacity(hint),
            streams: StreamSyncTable::with_capacity(hint, hint),
            next_seq_num: 0,
        }
    }

    fn next_seq_num(&mut self) -> SeqNum {
        let n = self.next_seq_num;
        self.next_seq_num += 1;
        SeqNum(n)
    }

    fn trace_event(&self, msg: &str) {
        if self.config.trace_events() {
            tracing::trace!(target: "racecheck", "{msg}");
        }
    }

    pub fn on_stream_create(&mut self, s: StreamId) {
        self.streams.create_stream(s);
        self.trace_event(&format!("stream {s} created"));
    }

    pub fn on_event_create(&mut self, e: EventId) {
        self.streams.create_event(e);
        self.trace_event(&format!("event {e} created"));
    }

    pub fn on_event_delete(&mut self, e: EventId) {
        self.streams.delete_event(e);
        self.trace_event(&format!("event {e} deleted"));
    }

    pub fn on_event_record(&mut self, e: EventId, s: StreamId) {
        self.streams.record(e, s);
        self.trace_event(&format!("event {e} recorded on stream {s}"));
    }

    pub fn on_event_wait(&mut self, e: EventId, s: StreamId) {
        self.streams.wait(s, e);
        self.trace_event(&format!("stream {s} waited on event {e}"));
    }

    pub fn on_buffer_alloc(&mut self, b: BufferId, stack: Option<Arc<dyn StackSnapshot>>) {
        self.buffers.ensure_absent(b);
        self.buffers.create(b, stack);
        self.trace_event(&format!("buffer {b} allocated"));
    }

    pub fn on_buffer_free(&mut self, b: BufferId) {
        self.buffers.ensure_exists(b);
        self.buffers.drop(b);
        self.trace_event(&format!("buffer {b} freed"));
    }

    /// Runs the core launch algorithm: bumps the launching stream's clock,
    /// checks every referenced buffer's prior accesses against the current
    /// happens-before state, records the new accesses, and returns every
    /// race found.
    ///
    /// `read_only` and `read_write` are assumed disjoint, as guaranteed by
    /// the partitioner collaborator (read+write -> read-write only; see
    /// [`crate`] docs). A buffer present in both would otherwise be checked
    /// twice, once as a reader and once as a writer, which the launch
    /// algorithm's write-subsumes-read rule exists precisely to avoid.
    pub fn on_launch(
        &mut self,
        stream: StreamId,
        read_only: &[BufferId],
        read_write: &[BufferId],
        operator: Arc<dyn OperatorDescriptor>,
        names: &HashMap<BufferId, Vec<String>>,
        stack: Arc<dyn StackSnapshot>,
    ) -> Vec<Report> {
        let n = self.next_seq_num();
        self.streams.bump(stream, n);

        let mut reports = Vec::new();
        let arg_names = |buffer: &BufferId| names.get(buffer).cloned().unwrap_or_default();

        for &buffer in read_only {
            let cur = Access::new(
                AccessKind::Read,
                n,
                stream,
                Arc::clone(&operator),
                arg_names(&buffer),
                Arc::clone(&stack),
            );
            self.buffers.ensure_exists(buffer);
            if let Some(previous) = self.buffers.last_writer(buffer) {
                self.check_conflict(buffer, &cur, previous, &mut reports);
            }
            self.buffers.add_read(buffer, cur);
        }

        for &buffer in read_write {
            let cur = Access::new(
                AccessKind::Write,
                n,
                stream,
                Arc::clone(&operator),
                arg_names(&buffer),
                Arc::clone(&stack),
            );
            self.buffers.ensure_exists(buffer);
            let readers = self.buffers.readers(buffer).to_vec();
            if readers.is_empty() {
                if let Some(previous) = self.buffers.last_writer(buffer) {
                    self.check_conflict(buffer, &cur, previous, &mut reports);
                }
            } else {
                for previous in &readers {
                    self.check_conflict(buffer, &cur, previous, &mut reports);
                }
            }
            self.buffers.set_write(buffer, cur);
        }

        self.trace_event(&format!("kernel launched on stream {stream} (seq {n})"));
        reports
    }

    /// The conflict check shared by the read-only and read-write phases:
    /// `cur` conflicts with `previous` iff `previous` is not ordered before
    /// `cur` by the current happens-before state.
    fn check_conflict(
        &self,
        buffer: BufferId,
        cur: &Access,
        previous: &Access,
        reports: &mut Vec<Report>,
    ) {
        if self
            .streams
            .ordered_after(cur.stream, previous.seq_num, previous.stream)
        {
            return;
        }
        reports.push(Report::UnsynchronizedAccess {
            buffer,
            alloc_stack: self.buffers.alloc_stack(buffer).cloned(),
            current: cur.clone(),
            previous: previous.clone(),
        });
    }
}
