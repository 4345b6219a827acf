//! Error types for the bridging layer.

use relay_collections::ListError;
use thiserror::Error;

use crate::message::Platform;

/// Result alias used throughout the bridge.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Failure surfaced by the bridging layer.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Reading a config or event file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`BridgeConfig`](crate::BridgeConfig).
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The config parsed but holds values the bridge can not run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The log filter could not be parsed or a subscriber is already set.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// A replay event line is not valid JSON for [`ReplayEvent`](crate::ReplayEvent).
    #[error("event parse error on line {line}: {source}")]
    Event {
        /// 1-based line number in the event log.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Correlation list operation failed.
    #[error(transparent)]
    List(#[from] ListError),

    /// A platform refused or failed a delete call.
    #[error("failed to delete {platform} message {message_id}: {reason}")]
    Moderation {
        /// Platform the delete was sent to.
        platform: Platform,
        /// Id of the message that should have been deleted.
        message_id: String,
        /// Platform-provided failure description.
        reason: String,
    },
}
