//! Correlation window plus the key index that addresses it.
//!
//! [`MessageCache`] pairs a [`CorrelationList`] of [`ConjoinedMessage`]s with
//! a `MessageKey -> NodeKey` map. Every path that detaches a record from the
//! list (eviction or explicit removal) purges the record's keys from the map
//! before returning, so the map never names a node that is gone.

use std::collections::HashMap;

use relay_collections::{CorrelationList, ListError, NodeKey};
use tracing::{debug, trace};

use crate::message::{ConjoinedMessage, MessageKey, PlatformMessage};

/// Upper bound on up-front allocation; larger windows grow on demand.
const PRESIZE_LIMIT: usize = 4096;

/// Bounded window of bridged message pairs with O(1) lookup by platform id.
#[derive(Debug)]
pub struct MessageCache {
    list: CorrelationList<ConjoinedMessage>,
    index: HashMap<MessageKey, NodeKey>,
    capacity: usize,
}

impl MessageCache {
    /// Creates a cache that keeps the `capacity` most recent records.
    pub fn new(capacity: usize) -> Self {
        // One record over capacity exists between append and evict.
        let presize = capacity.min(PRESIZE_LIMIT) + 1;
        Self {
            list: CorrelationList::with_capacity(presize),
            index: HashMap::with_capacity(presize * 2),
            capacity,
        }
    }

    /// Number of records in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no records are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of indexed platform ids.
    #[inline]
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Maximum number of records kept.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a record, indexes its keys and evicts the oldest record if the
    /// window overflowed.
    ///
    /// Returns the new node and the evicted record, if any. The evicted
    /// record's keys are already purged from the index.
    pub fn record(&mut self, record: ConjoinedMessage) -> (NodeKey, Option<ConjoinedMessage>) {
        let keys: Vec<MessageKey> = record.keys().collect();
        let node = self.list.append(record);
        for key in keys {
            self.index.insert(key, node);
        }

        let evicted = self.list.evict_if_needed(self.capacity);
        if let Some(old) = &evicted {
            self.purge(old);
            debug!(
                len = self.list.len(),
                capacity = self.capacity,
                "evicted oldest bridged message"
            );
        }

        (node, evicted)
    }

    /// Completes a record with a message from the other platform and
    /// indexes it.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the record was evicted or removed
    /// in the meantime.
    pub fn attach(&mut self, node: NodeKey, message: PlatformMessage) -> Result<(), ListError> {
        let key = message.key();
        let record = self.list.get_mut(node).ok_or(ListError::NotInList)?;
        if let Some(replaced) = record.attach(message) {
            let old = MessageKey::Discord(replaced.id);
            if old != key && self.index.get(&old) == Some(&node) {
                self.rebind(&old);
            }
        }

        trace!(%key, "attached mirrored message");
        self.index.insert(key, node);
        Ok(())
    }

    /// Looks up the record containing `key`.
    pub fn lookup(&self, key: &MessageKey) -> Option<(NodeKey, &ConjoinedMessage)> {
        let node = *self.index.get(key)?;
        self.list.get(node).map(|record| (node, record))
    }

    /// Removes a record and purges its keys.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the record is already gone.
    pub fn forget(&mut self, node: NodeKey) -> Result<ConjoinedMessage, ListError> {
        let record = self.list.remove(node)?;
        self.purge(&record);
        Ok(record)
    }

    /// Removes the record containing `key` and purges its keys.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if no live record contains `key`.
    pub fn forget_key(&mut self, key: &MessageKey) -> Result<ConjoinedMessage, ListError> {
        let node = self.index.get(key).copied().ok_or(ListError::NotInList)?;
        self.forget(node)
    }

    /// Records in the window, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ConjoinedMessage> + '_ {
        self.list.iter()
    }

    /// Drops a detached record's keys from the index.
    ///
    /// Only entries pointing at a node that is no longer linked are touched.
    /// Those move to the newest live record still carrying the id, if any.
    fn purge(&mut self, record: &ConjoinedMessage) {
        for key in record.keys() {
            if let Some(&node) = self.index.get(&key) {
                if !self.list.contains(node) {
                    self.rebind(&key);
                }
            }
        }
    }

    /// Points `key` at the newest record embedding it, or unindexes it.
    ///
    /// O(len), only reached when platform ids repeat inside the window.
    fn rebind(&mut self, key: &MessageKey) {
        let holder = self.list.keys().rev().find(|&node| {
            self.list
                .get(node)
                .is_some_and(|record| record.keys().any(|k| k == *key))
        });

        match holder {
            Some(node) => {
                trace!(%key, "rebound repeated id to older record");
                self.index.insert(key.clone(), node);
            }
            None => {
                self.index.remove(key);
            }
        }
    }
}
