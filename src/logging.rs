//! Logging setup for embedders.
//!
//! The library itself only emits `tracing` events; this helper wires up a
//! subscriber for hosts that do not bring their own.

use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes a compact tracing subscriber.
///
/// `level` seeds the default filter (`info` when `None`); a `RUST_LOG`
/// environment variable overrides the whole filter.
pub fn init_logging(level: Option<&str>) {
    let default_filter = format!("{},auth_registry=debug", level.unwrap_or("info"));
    let filter = env::var("RUST_LOG").unwrap_or(default_filter);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
