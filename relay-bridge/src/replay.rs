//! Replays a recorded event log through a [`Bridge`].
//!
//! The log is JSON lines; blank lines and lines starting with `#` are
//! skipped:
//!
//! ```text
//! {"event":"posted","message":{"discord":{"id":"1","channel_id":"c","author":"ann","content":"hi"}}}
//! {"event":"mirrored","origin":{"discord":"1"},"message":{"twitch":{"id":"t1","channel_id":"r","user":"bot","text":"ann: hi"}}}
//! {"event":"deleted","key":{"discord":"1"}}
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::message::{MessageKey, PlatformMessage};

/// One entry of an event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// A message was posted on one platform.
    Posted {
        /// The posted message.
        message: PlatformMessage,
    },
    /// The bridge's copy of `origin` showed up on the other platform.
    Mirrored {
        /// Key of the original message.
        origin: MessageKey,
        /// The mirrored copy.
        message: PlatformMessage,
    },
    /// A message was deleted on its platform.
    Deleted {
        /// Key of the deleted message.
        key: MessageKey,
    },
}

/// Counters and pending delete tasks from a replay.
#[derive(Debug, Default)]
pub struct ReplayOutcome {
    /// `posted` events applied.
    pub posted: usize,
    /// `mirrored` events attached to a cached origin.
    pub mirrored: usize,
    /// `mirrored` events whose origin had left the window.
    pub orphaned: usize,
    /// `deleted` events that hit a cached record.
    pub deleted: usize,
    /// Delete tasks still running; await them before reading results.
    pub tasks: Vec<JoinHandle<()>>,
}

/// Parses a JSON-lines event log.
pub fn parse_events(reader: impl BufRead) -> Result<Vec<ReplayEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event = serde_json::from_str(line).map_err(|source| BridgeError::Event {
            line: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Feeds `events` to `bridge` in order.
pub fn replay(bridge: &Bridge, events: impl IntoIterator<Item = ReplayEvent>) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();
    for event in events {
        match event {
            ReplayEvent::Posted { message } => {
                bridge.on_message(message);
                outcome.posted += 1;
            }
            ReplayEvent::Mirrored { origin, message } => {
                if bridge.on_mirrored(&origin, message).is_some() {
                    outcome.mirrored += 1;
                } else {
                    outcome.orphaned += 1;
                }
            }
            ReplayEvent::Deleted { key } => {
                if let Some(tasks) = bridge.on_deleted(&key) {
                    outcome.deleted += 1;
                    outcome.tasks.extend(tasks);
                }
            }
        }
    }
    outcome
}
