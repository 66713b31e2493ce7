//! Tracing initialization for the serverless function.
//!
//! Emits JSON-formatted events suitable for the hosting platform's log
//! collector. The log level is controlled via `RUST_LOG`, defaulting to
//! `info`.

use tracing_subscriber::EnvFilter;

/// Initialize the global JSON subscriber.
///
/// Call once from `run()` before starting the Lambda runtime.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .flatten_event(true)
        .init();
}
