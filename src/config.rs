//! Tuning knobs for a [`Context`](crate::Context). None of these change
//! *which* reports are produced — only observability and pre-sizing.

/// Construction-time configuration for a [`Context`](crate::Context).
///
/// Built field-by-field with chained setters, mirroring the value-type
/// construction style used elsewhere in this crate's lineage:
///
/// ```
/// use racecheck::Config;
///
/// let config = Config::default()
///     .with_trace_events(true)
///     .with_capacity_hint(256);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(crate) trace_events: bool,
    pub(crate) capacity_hint: usize,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// When enabled, every successfully handled event (not just recovered
    /// anomalies) additionally emits a `trace`-level `tracing` event.
    /// Expensive in a hot path; useful when replaying a captured trace
    /// offline. Disabled by default.
    pub fn with_trace_events(mut self, enabled: bool) -> Self {
        self.trace_events = enabled;
        self
    }

    /// An initial-capacity hint forwarded to the sync table's and access
    /// log's backing maps, to avoid reallocation churn when the caller
    /// roughly knows the stream/buffer count up front. Zero (the default)
    /// means "no hint".
    pub fn with_capacity_hint(mut self, hint: usize) -> Self {
        self.capacity_hint = hint;
        self
    }

    pub fn trace_events(&self) -> bool {
        self.trace_events
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }
}
