//! Whitebox test aggregator, one file per concern, following this crate's
//! `src/tests/mod.rs` convention for tests that reach into crate-internal
//! types rather than exercising only the public handler surface.

mod fixtures;
