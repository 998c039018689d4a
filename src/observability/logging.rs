//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` applies to this crate
/// and its binaries.
pub fn init(log_level: &str) {
    let default_directive =
        format!("load_generator={log_level},target_service={log_level},tower_http=warn");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_directive)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
