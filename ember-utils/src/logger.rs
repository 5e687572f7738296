use std::io;

use tracing_subscriber::{
    EnvFilter,
    util::{SubscriberInitExt, TryInitError},
};

/// Installs a formatting `tracing` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `default_directive` (for example `"info"` or
/// `"ember_protocol=debug"`) when `RUST_LOG` is unset or invalid. Records
/// emitted through the `log` facade are forwarded to the subscriber.
pub fn init(default_directive: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .finish()
        .try_init()
}
