//! Message records exchanged with the chat platform clients.
//!
//! The platform SDKs are outside this crate; they hand the bridge these
//! plain records, keyed by the platform's own message id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two bridged platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Discord text channel.
    Discord,
    /// Twitch chat.
    Twitch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Discord => f.write_str("discord"),
            Platform::Twitch => f.write_str("twitch"),
        }
    }
}

/// External key of the bridge's index: a platform message id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// Discord message snowflake.
    Discord(String),
    /// Twitch chat message id.
    Twitch(String),
}

impl MessageKey {
    /// Platform the id belongs to.
    pub fn platform(&self) -> Platform {
        match self {
            MessageKey::Discord(_) => Platform::Discord,
            MessageKey::Twitch(_) => Platform::Twitch,
        }
    }

    /// The raw platform id.
    pub fn id(&self) -> &str {
        match self {
            MessageKey::Discord(id) | MessageKey::Twitch(id) => id,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform(), self.id())
    }
}

/// A message seen in the bridged Discord channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordMessage {
    /// Message snowflake.
    pub id: String,
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Display name of the author.
    pub author: String,
    /// Message text.
    #[serde(default)]
    pub content: String,
}

/// A message seen in the bridged Twitch chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitchMessage {
    /// Chat message id.
    pub id: String,
    /// Broadcaster (room) id, needed to delete the message.
    pub channel_id: String,
    /// Login of the chatter.
    pub user: String,
    /// Message text.
    #[serde(default)]
    pub text: String,
}

/// A message from either platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformMessage {
    /// Discord side.
    Discord(DiscordMessage),
    /// Twitch side.
    Twitch(TwitchMessage),
}

impl PlatformMessage {
    /// Index key of this message.
    pub fn key(&self) -> MessageKey {
        match self {
            PlatformMessage::Discord(msg) => MessageKey::Discord(msg.id.clone()),
            PlatformMessage::Twitch(msg) => MessageKey::Twitch(msg.id.clone()),
        }
    }
}

/// Correlation record: a Discord message and its Twitch counterparts.
///
/// Built in steps. The side that was posted first is known at insertion,
/// the mirrored side is attached when its echo arrives. A long Discord
/// message may be split into several Twitch messages, hence the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConjoinedMessage {
    /// Discord side, if known yet.
    pub discord: Option<DiscordMessage>,
    /// Twitch side, oldest first.
    pub twitch: Vec<TwitchMessage>,
}

impl ConjoinedMessage {
    /// Record seeded from a message posted on `message`'s platform.
    pub fn from_message(message: PlatformMessage) -> Self {
        let mut record = Self::default();
        record.attach(message);
        record
    }

    /// Adds the other side (or another part of it).
    ///
    /// A Discord message replaces any previous one; Twitch messages
    /// accumulate.
    pub(crate) fn attach(&mut self, message: PlatformMessage) -> Option<DiscordMessage> {
        match message {
            PlatformMessage::Discord(msg) => self.discord.replace(msg),
            PlatformMessage::Twitch(msg) => {
                self.twitch.push(msg);
                None
            }
        }
    }

    /// Every index key embedded in the record.
    pub fn keys(&self) -> impl Iterator<Item = MessageKey> + '_ {
        self.discord
            .iter()
            .map(|msg| MessageKey::Discord(msg.id.clone()))
            .chain(self.twitch.iter().map(|msg| MessageKey::Twitch(msg.id.clone())))
    }
}
