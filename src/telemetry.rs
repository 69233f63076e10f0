use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,notes_service=debug,tower_http=debug";

/// Initialize application logging.
///
/// Configures:
/// - `tracing-subscriber::fmt`, compact or JSON lines.
/// - `EnvFilter` for dynamic log levels (`RUST_LOG`).
pub fn init(format: LogFormat) {
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter_layer);
    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .json(),
            )
            .init(),
    }
}
