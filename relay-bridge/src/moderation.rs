//! Delete calls against the chat platforms.
//!
//! The platform API clients live outside this crate. They plug in through
//! [`Moderator`], which returns each delete as a boxed future so the bridge
//! can run it as a task, detached from the cache update that triggered it.

use std::future::Future;
use std::pin::Pin;

use tracing::info;

use crate::error::Result;
use crate::message::{DiscordMessage, TwitchMessage};

/// A pending platform delete call.
pub type DeleteFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// Issues message deletes on the two platforms.
///
/// Implementations must capture whatever they need from the message before
/// returning; the future outlives the borrow.
pub trait Moderator: Send + Sync {
    /// Deletes a message from the bridged Discord channel.
    fn delete_discord(&self, message: &DiscordMessage) -> DeleteFuture;

    /// Deletes a message from the bridged Twitch chat.
    fn delete_twitch(&self, message: &TwitchMessage) -> DeleteFuture;
}

/// Moderator that only logs the deletes it would issue.
///
/// Used by the replay tool, where no platform is connected.
#[derive(Debug, Clone, Default)]
pub struct LogOnlyModerator {
    /// Bot account the Twitch deletes would be issued as.
    pub bot_user_id: Option<String>,
}

impl Moderator for LogOnlyModerator {
    fn delete_discord(&self, message: &DiscordMessage) -> DeleteFuture {
        let id = message.id.clone();
        let channel = message.channel_id.clone();
        Box::pin(async move {
            info!(message_id = %id, channel = %channel, "would delete discord message");
            Ok(())
        })
    }

    fn delete_twitch(&self, message: &TwitchMessage) -> DeleteFuture {
        let id = message.id.clone();
        let broadcaster = message.channel_id.clone();
        let moderator = self
            .bot_user_id
            .clone()
            .unwrap_or_else(|| broadcaster.clone());
        Box::pin(async move {
            info!(
                message_id = %id,
                broadcaster = %broadcaster,
                moderator = %moderator,
                "would delete twitch message"
            );
            Ok(())
        })
    }
}
