//! Per-buffer access history: the last writer and every reader since.

use std::collections::HashMap;
use std::sync::Arc;

use crate::access::{Access, AccessKind, StackSnapshot};
use crate::diagnostic::Diagnostic;
use crate::ids::BufferId;

/// Per-buffer record: the allocation call stack (if captured), the reads
/// since the last write, and the last writer (if any).
///
/// Invariant: after [`BufferState::set_write`] the reads list is empty, and
/// the writer (once set) always has a strictly smaller `seq_num` than every
/// read currently in the reads list, since reads are only appended after a
/// launch that comes later than the write they follow.
#[derive(Debug, Default)]
pub struct BufferState {
    alloc_stack: Option<Arc<dyn StackSnapshot>>,
    reads: Vec<Access>,
    last_writer: Option<Access>,
}

impl BufferState {
    fn new(alloc_stack: Option<Arc<dyn StackSnapshot>>) -> Self {
        BufferState {
            alloc_stack,
            reads: Vec::new(),
            last_writer: None,
        }
    }

    pub fn last_writer(&self) -> Option<&Access> {
        self.last_writer.as_ref()
    }

    pub fn readers(&self) -> &[Access] {
        &self.reads
    }

    pub fn alloc_stack(&self) -> Option<&Arc<dyn StackSnapshot>> {
        self.alloc_stack.as_ref()
    }

    fn add_read(&mut self, access: Access) {
        debug_assert_eq!(access.kind, AccessKind::Read);
        self.reads.push(access);
    }

    fn set_write(&mut self, access: Access) {
        debug_assert_eq!(access.kind, AccessKind::Write);
        self.reads.clear();
        self.last_writer = Some(access);
    }
}

/// A mapping from [`BufferId`] to the most-recent accesses on that buffer.
#[derive(Debug, Default)]
pub struct BufferAccessLog {
    buffers: HashMap<BufferId, BufferState>,
}

impl BufferAccessLog {
    pub fn new() -> Self {
        BufferAccessLog {
            buffers: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BufferAccessLog {
            buffers: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts an empty state for `buffer`. Must not pre-exist; if it does,
    /// the prior state is dropped with a diagnostic before recreating.
    pub fn create(&mut self, buffer: BufferId, stack: Option<Arc<dyn StackSnapshot>>) {
        if self.buffers.contains_key(&buffer) {
            Diagnostic::BufferReplaced { buffer }.emit();
        }
        self.buffers.insert(buffer, BufferState::new(stack));
    }

    /// Removes `buffer`'s state. Back-fills (then immediately drops) if
    /// absent.
    pub fn drop(&mut self, buffer: BufferId) {
        if self.buffers.remove(&buffer).is_none() {
            Diagnostic::BufferBackfilled { buffer }.emit();
        }
    }

    /// Back-fills an empty, stack-less state for `buffer` if missing.
    pub fn ensure_exists(&mut self, buffer: BufferId) {
        self.buffers.entry(buffer).or_insert_with(|| {
            Diagnostic::BufferBackfilled { buffer }.emit();
            BufferState::new(None)
        });
    }

    /// Drops `buffer`'s state if present, with a diagnostic; used before
    /// allocation to clear a state the detector never saw freed.
    pub fn ensure_absent(&mut self, buffer: BufferId) {
        if self.buffers.remove(&buffer).is_some() {
            Diagnostic::BufferReplaced { buffer }.emit();
        }
    }

    pub fn last_writer(&self, buffer: BufferId) -> Option<&Access> {
        self.buffers.get(&buffer).and_then(BufferState::last_writer)
    }

    pub fn readers(&self, buffer: BufferId) -> &[Access] {
        self.buffers
            .get(&buffer)
            .map(BufferState::readers)
            .unwrap_or(&[])
    }

    pub fn alloc_stack(&self, buffer: BufferId) -> Option<&Arc<dyn StackSnapshot>> {
        self.buffers.get(&buffer).and_then(BufferState::alloc_stack)
    }

    /// Appends `access` to `buffer`'s reads list. `buffer` must already
    /// exist (callers run `ensure_exists` first).
    pub fn add_read(&mut self, buffer: BufferId, access: Access) {
        if let Some(state) = self.buffers.get_mut(&buffer) {
            state.add_read(access);
        }
    }

    /// Replaces `buffer`'s last writer and clears its reads list. `buffer`
    /// must already exist (callers run `ensure_exists` first).
    pub fn set_write(&mut self, buffer: BufferId, access: Access) {
        if let Some(state) = self.buffers.get_mut(&buffer) {
            state.set_write(access);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{StringOperator, StringStack};
    use crate::ids::{SeqNum, StreamId};
    use std::sync::Arc;

    fn access(kind: AccessKind, seq: i64, stream: u64) -> Access {
        Access::new(
            kind,
            SeqNum(seq),
            StreamId(stream),
            Arc::new(StringOperator("op".into())),
            vec!["x".into()],
            Arc::new(StringStack("stack".into())),
        )
    }

    #[test]
    fn set_write_clears_readers() {
        let mut log = BufferAccessLog::new();
        log.create(BufferId(0), None);
        log.add_read(BufferId(0), access(AccessKind::Read, 0, 1));
        assert_eq!(log.readers(BufferId(0)).len(), 1);

        let write = access(AccessKind::Write, 1, 0);
        log.set_write(BufferId(0), write.clone());

        assert!(log.readers(BufferId(0)).is_empty());
        assert_eq!(log.last_writer(BufferId(0)).unwrap().seq_num, write.seq_num);
    }

    #[test]
    fn ensure_exists_backfills_without_stack() {
        let mut log = BufferAccessLog::new();
        log.ensure_exists(BufferId(42));
        assert!(log.alloc_stack(BufferId(42)).is_none());
        assert!(log.last_writer(BufferId(42)).is_none());
    }

    #[test]
    fn drop_then_create_preserves_new_stack() {
        let mut log = BufferAccessLog::new();
        log.create(BufferId(0), Some(Arc::new(StringStack("a".into()))));
        log.drop(BufferId(0));
        log.create(BufferId(0), Some(Arc::new(StringStack("b".into()))));
        assert_eq!(log.alloc_stack(BufferId(0)).unwrap().format(), "b");
    }
}
