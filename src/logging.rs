//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so they interleave with child output in the same
//! terminal. The filter comes from `RUNWAY_LOG` (standard `EnvFilter`
//! directives) and defaults to `warn`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var holding the log filter.
pub const ENV_LOG_FILTER: &str = "RUNWAY_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(color: bool) {
    let filter = filter_from_value(std::env::var(ENV_LOG_FILTER).ok().as_deref());
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

/// Build the filter, falling back to the default on blank or invalid input.
pub(crate) fn filter_from_value(value: Option<&str>) -> EnvFilter {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
