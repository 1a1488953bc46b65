//! Optional default `tracing-subscriber` installation, gated behind the
//! `tracing-subscriber` Cargo feature.
//!
//! The core never calls this itself — it only ever emits `tracing` events
//! (see [`crate::diagnostic`]) — so a collaborator that already owns a
//! subscriber never needs this module at all. It exists for host binaries
//! and examples that want a reasonable default without picking their own.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The only failure mode of [`init_logging`]: a global subscriber is already
/// installed.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error(transparent)]
    SetGlobalDefault(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs a compact, env-filter-driven `tracing-subscriber` registry as
/// the global default.
///
/// `filter` is parsed as an [`EnvFilter`] directive string (e.g.
/// `"racecheck=debug,info"`); a filter that fails to parse falls back to
/// plain `"info"` rather than erroring, since a malformed filter string is
/// an operator typo, not a reason to refuse to log at all.
pub fn init_logging(filter: impl AsRef<str>) -> Result<(), LogError> {
    let env_filter = EnvFilter::try_new(filter.as_ref()).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(true))
        .try_init()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_filter_falls_back_without_panicking() {
        // Installing a global subscriber more than once in the same test
        // binary errors, which is exactly the `LogError` path this checks:
        // a bad filter string must not itself be the failure.
        let _ = init_logging("this is not a valid directive{{{");
    }
}
