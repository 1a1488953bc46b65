//! The happens-before state: a vector clock per live stream, and a vector
//! clock snapshot per live sync event.

use std::collections::HashMap;

use crate::diagnostic::Diagnostic;
use crate::ids::{EventId, SeqNum, StreamId};
use crate::vector_clock::VectorClock;

/// Holds, for every live stream, its current vector clock; and, for every
/// live sync event, a snapshot of some stream's clock taken at record time.
///
/// Every operation here back-fills missing streams/events rather than
/// failing: the observed trace may begin mid-program, and an empty clock is
/// the most conservative possible state (it cannot falsely witness an
/// ordering that didn't happen).
#[derive(Debug, Default)]
pub struct StreamSyncTable {
    current: HashMap<StreamId, VectorClock>,
    recorded: HashMap<EventId, VectorClock>,
}

impl StreamSyncTable {
    pub fn new() -> Self {
        StreamSyncTable {
            current: HashMap::new(),
            recorded: HashMap::new(),
        }
    }

    pub fn with_capacity(streams: usize, events: usize) -> Self {
        StreamSyncTable {
            current: HashMap::with_capacity(streams),
            recorded: HashMap::with_capacity(events),
        }
    }

    /// Inserts an empty clock for `stream`. A duplicate create is ignored
    /// (diagnostic), leaving the existing clock untouched.
    pub fn create_stream(&mut self, stream: StreamId) {
        if self.current.contains_key(&stream) {
            Diagnostic::StreamDuplicateCreate { stream }.emit();
            return;
        }
        self.current.insert(stream, VectorClock::new());
    }

    /// Inserts an empty snapshot for `event`. A duplicate create silently
    /// deletes-then-recreates (diagnostic).
    pub fn create_event(&mut self, event: EventId) {
        if self.recorded.contains_key(&event) {
            Diagnostic::EventRecreated { event }.emit();
        }
        self.recorded.insert(event, VectorClock::new());
    }

    /// Drops `event`. Back-fill-creates (then immediately drops) if absent.
    pub fn delete_event(&mut self, event: EventId) {
        if self.recorded.remove(&event).is_none() {
            Diagnostic::EventBackfilled { event }.emit();
        }
    }

    fn stream_clock_mut(&mut self, stream: StreamId) -> &mut VectorClock {
        self.current.entry(stream).or_insert_with(|| {
            Diagnostic::StreamBackfilled { stream }.emit();
            VectorClock::new()
        })
    }

    /// Sets `current[stream][stream] := n`. Back-fills `stream` if absent.
    pub fn bump(&mut self, stream: StreamId, n: SeqNum) {
        self.stream_clock_mut(stream).set(stream, n);
    }

    /// Snapshots `current[stream]` into `recorded[event]`. Back-fills
    /// whichever of `event`/`stream` is missing.
    pub fn record(&mut self, event: EventId, stream: StreamId) {
        let snapshot = self.current.entry(stream).or_insert_with(|| {
            Diagnostic::StreamBackfilled { stream }.emit();
            VectorClock::new()
        });
        let snapshot = snapshot.clone();
        if !self.recorded.contains_key(&event) {
            Diagnostic::EventBackfilledOnSync { event }.emit();
        }
        self.recorded.insert(event, snapshot);
    }

    /// Joins `recorded[event]` into `current[stream]`, coordinate-wise
    /// maximum. Back-fills whichever of `stream`/`event` is missing.
    pub fn wait(&mut self, stream: StreamId, event: EventId) {
        let snapshot = match self.recorded.get(&event) {
            Some(snapshot) => snapshot.clone(),
            None => {
                Diagnostic::EventBackfilledOnSync { event }.emit();
                let snapshot = VectorClock::new();
                self.recorded.insert(event, snapshot.clone());
                snapshot
            }
        };
        self.stream_clock_mut(stream).join(&snapshot);
    }

    /// Returns true iff `n <= current[s_cur][s_prev]` (default `-1`).
    ///
    /// `s_cur == s_prev` always returns true provided `s_cur` has bumped at
    /// least as far as `n`, which the launch analyzer guarantees by bumping
    /// before checking conflicts — so same-stream accesses never race.
    ///
    /// This is a pure query: unlike the trace this crate's algorithm was
    /// modeled on, it does not back-fill `s_cur`/`s_prev` as a side effect.
    /// Every call site in the launch analyzer already ensures both streams
    /// are bumped (and hence present) before checking a conflict, so an
    /// absent entry here genuinely means "no clock ever recorded for that
    /// stream" and correctly resolves to the conservative `SeqNum::NONE`.
    pub fn ordered_after(&self, s_cur: StreamId, n: SeqNum, s_prev: StreamId) -> bool {
        let observed = self
            .current
            .get(&s_cur)
            .map(|clock| clock.get(s_prev))
            .unwrap_or(SeqNum::NONE);
        n <= observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_sets_self_coordinate() {
        let mut table = StreamSyncTable::new();
        table.create_stream(StreamId(0));
        table.bump(StreamId(0), SeqNum(3));
        assert!(table.ordered_after(StreamId(0), SeqNum(3), StreamId(0)));
        assert!(!table.ordered_after(StreamId(0), SeqNum(4), StreamId(0)));
    }

    #[test]
    fn record_then_wait_propagates_clock() {
        let mut table = StreamSyncTable::new();
        table.create_stream(StreamId(0));
        table.create_stream(StreamId(1));
        table.create_event(EventId(0));

        table.bump(StreamId(0), SeqNum(5));
        table.record(EventId(0), StreamId(0));
        table.wait(StreamId(1), EventId(0));

        assert!(table.ordered_after(StreamId(1), SeqNum(5), StreamId(0)));
        assert!(!table.ordered_after(StreamId(1), SeqNum(6), StreamId(0)));
    }

    #[test]
    fn unsynchronized_streams_are_not_ordered() {
        let mut table = StreamSyncTable::new();
        table.create_stream(StreamId(0));
        table.create_stream(StreamId(1));
        table.bump(StreamId(0), SeqNum(1));
        assert!(!table.ordered_after(StreamId(1), SeqNum(1), StreamId(0)));
    }

    #[test]
    fn backfills_unknown_stream_on_bump() {
        let mut table = StreamSyncTable::new();
        table.bump(StreamId(9), SeqNum(0));
        assert!(table.ordered_after(StreamId(9), SeqNum(0), StreamId(9)));
    }

    #[test]
    fn event_delete_then_recreate_then_sync() {
        let mut table = StreamSyncTable::new();
        table.create_stream(StreamId(0));
        table.create_stream(StreamId(1));

        table.create_event(EventId(1));
        table.delete_event(EventId(1));
        table.create_event(EventId(1));

        table.bump(StreamId(0), SeqNum(2));
        table.record(EventId(1), StreamId(0));
        table.wait(StreamId(1), EventId(1));

        assert!(table.ordered_after(StreamId(1), SeqNum(2), StreamId(0)));
    }
}
