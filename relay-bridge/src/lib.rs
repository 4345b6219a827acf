//! Discord/Twitch bridging layer over the correlation list.
//!
//! Every message the bridge relays exists twice: once where it was posted
//! and once as the mirrored copy on the other platform. This crate keeps a
//! sliding window of those pairs so that deleting either copy deletes the
//! other one too.
//!
//! ```text
//! platform clients --events--> Bridge --lock--> MessageCache
//!                                 |               |- CorrelationList<ConjoinedMessage>
//!                                 |               `- HashMap<MessageKey, NodeKey>
//!                                 `--spawn--> Moderator::delete_* (async)
//! ```
//!
//! The platform SDKs, the OAuth handshake and message formatting are not
//! part of this crate; clients hand the bridge plain [`PlatformMessage`]
//! records and implement [`Moderator`] for deletes.
//!
//! # Example
//!
//! ```
//! use relay_bridge::{MessageCache, ConjoinedMessage, MessageKey, PlatformMessage, TwitchMessage};
//!
//! let mut cache = MessageCache::new(100);
//! let posted = PlatformMessage::Twitch(TwitchMessage {
//!     id: "t1".into(),
//!     channel_id: "room".into(),
//!     user: "bob".into(),
//!     text: "hello".into(),
//! });
//!
//! let (node, evicted) = cache.record(ConjoinedMessage::from_message(posted));
//! assert!(evicted.is_none());
//! assert_eq!(cache.lookup(&MessageKey::Twitch("t1".into())).map(|(n, _)| n), Some(node));
//!
//! let record = cache.forget(node).unwrap();
//! assert_eq!(record.twitch.len(), 1);
//! assert_eq!(cache.index_len(), 0);
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;
pub mod moderation;
pub mod replay;

pub use bridge::Bridge;
pub use cache::MessageCache;
pub use config::{BridgeConfig, DEFAULT_MAX_MSG_CACHE, DiscordConfig, TwitchConfig};
pub use error::{BridgeError, Result};
pub use message::{ConjoinedMessage, DiscordMessage, MessageKey, Platform, PlatformMessage, TwitchMessage};
pub use moderation::{DeleteFuture, LogOnlyModerator, Moderator};
pub use replay::{ReplayEvent, ReplayOutcome, parse_events, replay};
