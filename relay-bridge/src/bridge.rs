//! Event handling for the bridge.
//!
//! [`Bridge`] is what the platform clients call into. It keeps the
//! [`MessageCache`] behind one lock so the list splice and the index purge
//! happen in the same critical section, and turns upstream deletes into
//! delete tasks for every mirrored counterpart.

use std::sync::Arc;

use parking_lot::Mutex;
use relay_collections::{ListError, NodeKey};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::cache::MessageCache;
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::message::{ConjoinedMessage, DiscordMessage, MessageKey, PlatformMessage, TwitchMessage};
use crate::moderation::{DeleteFuture, Moderator};

/// Shared bridge state plus the moderator used to propagate deletes.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Bridge {
    cache: Arc<Mutex<MessageCache>>,
    moderator: Arc<dyn Moderator>,
    runtime: Handle,
}

impl Bridge {
    /// Creates a bridge sized from `config`.
    ///
    /// Delete tasks are spawned on `runtime`.
    pub fn new(config: &BridgeConfig, moderator: Arc<dyn Moderator>, runtime: Handle) -> Self {
        Self::with_capacity(config.max_msg_cache, moderator, runtime)
    }

    /// Creates a bridge keeping the `capacity` most recent pairs.
    pub fn with_capacity(capacity: usize, moderator: Arc<dyn Moderator>, runtime: Handle) -> Self {
        Self {
            cache: Arc::new(Mutex::new(MessageCache::new(capacity))),
            moderator,
            runtime,
        }
    }

    /// The shared cache. Lock it only for short, non-async sections.
    pub fn cache(&self) -> &Arc<Mutex<MessageCache>> {
        &self.cache
    }

    /// Records a message posted on either platform.
    ///
    /// The mirrored counterpart is attached later through
    /// [`on_mirrored`](Self::on_mirrored).
    pub fn on_message(&self, message: PlatformMessage) -> NodeKey {
        let key = message.key();
        let (node, evicted) = self
            .cache
            .lock()
            .record(ConjoinedMessage::from_message(message));
        debug!(%key, evicted = evicted.is_some(), "recorded bridged message");
        node
    }

    /// Records a message posted in the Discord channel.
    pub fn on_discord_message(&self, message: DiscordMessage) -> NodeKey {
        self.on_message(PlatformMessage::Discord(message))
    }

    /// Records a message posted in the Twitch chat.
    pub fn on_twitch_message(&self, message: TwitchMessage) -> NodeKey {
        self.on_message(PlatformMessage::Twitch(message))
    }

    /// Attaches the mirrored copy of `origin` once its echo arrives.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::List`] with [`ListError::NotInList`] when
    /// `origin` already left the window.
    pub fn mirror(&self, origin: &MessageKey, mirror: PlatformMessage) -> Result<NodeKey> {
        let mut cache = self.cache.lock();
        let (node, _) = cache.lookup(origin).ok_or(ListError::NotInList)?;
        cache.attach(node, mirror)?;
        Ok(node)
    }

    /// Like [`mirror`](Self::mirror), but logs and drops a mirror whose
    /// origin is gone.
    pub fn on_mirrored(&self, origin: &MessageKey, mirror: PlatformMessage) -> Option<NodeKey> {
        let mirror_key = mirror.key();
        match self.mirror(origin, mirror) {
            Ok(node) => Some(node),
            Err(err) => {
                warn!(%origin, mirror = %mirror_key, %err, "origin not cached, dropping mirror");
                None
            }
        }
    }

    /// Handles a message deleted upstream.
    ///
    /// The record is removed from the cache before anything else, then one
    /// delete task is spawned per mirrored counterpart. A failed delete is
    /// logged and never touches the cache.
    ///
    /// Returns `None` if no cached record holds `key`, otherwise the spawned
    /// tasks (possibly none, when nothing was mirrored yet).
    pub fn on_deleted(&self, key: &MessageKey) -> Option<Vec<JoinHandle<()>>> {
        let removed = self.cache.lock().forget_key(key);
        let record = match removed {
            Ok(record) => record,
            Err(err) => {
                debug!(%key, %err, "deleted message not in window");
                return None;
            }
        };

        let mut tasks = Vec::new();
        if let Some(msg) = &record.discord {
            let target = MessageKey::Discord(msg.id.clone());
            if target != *key {
                tasks.push(self.spawn_delete(target, self.moderator.delete_discord(msg)));
            }
        }
        for msg in &record.twitch {
            let target = MessageKey::Twitch(msg.id.clone());
            if target != *key {
                tasks.push(self.spawn_delete(target, self.moderator.delete_twitch(msg)));
            }
        }

        info!(%key, mirrors = tasks.len(), "propagating delete");
        Some(tasks)
    }

    /// Copies the current window, oldest first.
    pub fn snapshot(&self) -> Vec<ConjoinedMessage> {
        self.cache.lock().iter().cloned().collect()
    }

    fn spawn_delete(&self, target: MessageKey, delete: DeleteFuture) -> JoinHandle<()> {
        self.runtime.spawn(async move {
            match delete.await {
                Ok(()) => debug!(%target, "deleted mirrored message"),
                Err(err) => error!(%target, %err, "hit a snag deleting mirrored message"),
            }
        })
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("Bridge");
        match self.cache.try_lock() {
            Some(cache) => out
                .field("len", &cache.len())
                .field("capacity", &cache.capacity()),
            None => out.field("cache", &format_args!("<locked>")),
        };
        out.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::moderation::LogOnlyModerator;

    fn bridge(capacity: usize) -> Bridge {
        Bridge::with_capacity(capacity, Arc::new(LogOnlyModerator::default()), Handle::current())
    }

    fn discord(id: &str) -> DiscordMessage {
        DiscordMessage {
            id: id.into(),
            channel_id: "chan".into(),
            author: "ann".into(),
            content: String::new(),
        }
    }

    fn twitch(id: &str) -> TwitchMessage {
        TwitchMessage {
            id: id.into(),
            channel_id: "room".into(),
            user: "bob".into(),
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn mirror_for_unknown_origin_is_list_error() {
        let bridge = bridge(2);
        let err = bridge
            .mirror(
                &MessageKey::Discord("gone".into()),
                PlatformMessage::Twitch(twitch("t1")),
            )
            .unwrap_err();
        assert!(matches!(err, BridgeError::List(ListError::NotInList)));
        assert_eq!(bridge.cache().lock().index_len(), 0);
    }

    #[tokio::test]
    async fn mirror_returns_origin_node() {
        let bridge = bridge(2);
        let node = bridge.on_discord_message(discord("d1"));
        let attached = bridge
            .mirror(
                &MessageKey::Discord("d1".into()),
                PlatformMessage::Twitch(twitch("t1")),
            )
            .unwrap();
        assert_eq!(attached, node);
    }

    #[tokio::test]
    async fn debug_does_not_block_while_cache_locked() {
        let bridge = bridge(3);
        bridge.on_discord_message(discord("d1"));

        assert_eq!(
            format!("{bridge:?}"),
            "Bridge { len: 1, capacity: 3, .. }"
        );

        let _guard = bridge.cache().lock();
        assert_eq!(format!("{bridge:?}"), "Bridge { cache: <locked>, .. }");
    }
}
