//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_filter` when set.
pub fn init(default_filter: &str) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| ServerError::Logging(format!("bad filter {default_filter:?}: {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
