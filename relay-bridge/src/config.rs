//! Bridge configuration loaded from TOML.
//!
//! ```toml
//! max_msg_cache = 100
//!
//! [discord]
//! channel_id = "123456789012345678"
//!
//! [twitch]
//! channel = "somechannel"
//! bot_user_id = "987654"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Number of bridged messages kept for delete propagation by default.
pub const DEFAULT_MAX_MSG_CACHE: usize = 100;

/// Top-level bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Size of the correlation window. Older pairs are evicted.
    #[serde(default = "default_max_msg_cache")]
    pub max_msg_cache: usize,
    /// Discord side.
    pub discord: DiscordConfig,
    /// Twitch side.
    pub twitch: TwitchConfig,
}

/// Discord channel to bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Target text channel id.
    pub channel_id: String,
}

/// Twitch chat to bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwitchConfig {
    /// Channel login to join.
    pub channel: String,
    /// User id of the moderator bot that issues deletes. When absent,
    /// deletes are issued as the broadcaster.
    #[serde(default)]
    pub bot_user_id: Option<String>,
}

fn default_max_msg_cache() -> usize {
    DEFAULT_MAX_MSG_CACHE
}

impl BridgeConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Rejects settings the bridge can not run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_msg_cache == 0 {
            return Err(BridgeError::InvalidConfig(
                "max_msg_cache must be greater than zero".into(),
            ));
        }
        if self.discord.channel_id.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "discord.channel_id must not be empty".into(),
            ));
        }
        if self.twitch.channel.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "twitch.channel must not be empty".into(),
            ));
        }
        Ok(())
    }
}
