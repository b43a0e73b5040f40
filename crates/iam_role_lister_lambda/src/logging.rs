//! Structured logging for the Lambda process.
//!
//! `RUST_LOG` filters events (default `info`). Timestamps are left out because
//! CloudWatch records ingestion time for every line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Installs the global subscriber. Later calls are ignored so a warm container
/// or a test binary can call this more than once.
pub fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_ansi(false),
            )
            .try_init(),
    };

    if let Err(error) = result {
        tracing::debug!(%error, "logging already initialised");
    }
}
