//! Opaque identifiers used throughout the detector.
//!
//! All four are thin newtypes over integers. They are intentionally not
//! interchangeable with each other or with bare `u64`/`i64` so that a typo
//! swapping, say, a `BufferId` for a `StreamId` is caught at compile time
//! rather than producing a silently wrong report.

use std::fmt;

/// Identifies a device buffer (memory allocation) by its starting address
/// or any other host-assigned handle that is unique among live buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

/// Identifies an independent execution stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(pub u64);

/// Identifies a synchronization event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

/// A position in the global launch order. Monotonically increasing, assigned
/// by the launch analyzer. The vector clock default for a stream coordinate
/// that has never been bumped is `SeqNum(-1)`, i.e. "no known event" — not
/// zero, since zero is a legitimate first launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeqNum(pub i64);

impl SeqNum {
    /// The implicit value of a vector clock coordinate that has never been
    /// written: "no kernel on that stream is known to happen-before".
    pub const NONE: SeqNum = SeqNum(-1);
}

impl Default for SeqNum {
    fn default() -> Self {
        SeqNum::NONE
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
