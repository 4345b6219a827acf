//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{BridgeError, Result};

/// Installs a `fmt` subscriber writing to stderr, filtered by `RUST_LOG` or,
/// when that is unset, by `default_directive` (e.g. `"info"` or
/// `"relay_bridge=debug"`).
///
/// # Errors
///
/// [`BridgeError::Logging`] if `default_directive` is not a valid filter or a
/// global subscriber was already installed.
pub fn init(default_directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| BridgeError::Logging(format!("invalid log filter {default_directive:?}: {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| BridgeError::Logging("a global subscriber is already installed".into()))
}
