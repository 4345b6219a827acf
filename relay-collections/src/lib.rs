//! Correlation list for bridged chat messages.
//!
//! A chat bridge mirrors every message posted on one platform onto the
//! other, and has to remember which message became which so a later delete
//! on one side can be propagated. This crate provides the window that holds
//! those pairs: a bounded, insertion-ordered doubly-linked list whose nodes
//! are addressable by a stable key.
//!
//! # Design
//!
//! ```text
//! Storage (slab)       - owns the nodes, hands out stable slots
//! CorrelationList      - links slots head..tail, owns the topology
//! NodeKey              - slot + generation, filed in the caller's index
//! ```
//!
//! Nodes link to each other through slot indices rather than references.
//! A removed node's slot is released to the arena; its key carries the
//! generation the node was created under, so a key kept past removal
//! reports [`ListError::NotInList`] instead of addressing the slot's next
//! tenant.
//!
//! # Quick Start
//!
//! ```
//! use relay_collections::CorrelationList;
//!
//! const WINDOW: usize = 2;
//!
//! let mut list: CorrelationList<String> = CorrelationList::with_capacity(WINDOW + 1);
//!
//! let first = list.append("hello".to_string());
//! list.append("there".to_string());
//! assert_eq!(list.evict_if_needed(WINDOW), None);
//!
//! list.append("again".to_string());
//! assert_eq!(list.evict_if_needed(WINDOW).as_deref(), Some("hello"));
//! assert!(!list.contains(first));
//!
//! let window: Vec<_> = list.iter().map(String::as_str).collect();
//! assert_eq!(window, ["there", "again"]);
//! ```
//!
//! # Capacity is the caller's policy
//!
//! [`CorrelationList::append`] never evicts. The caller decides when to call
//! [`CorrelationList::evict_if_needed`], and uses the returned payload to
//! purge whatever index it keeps alongside the list:
//!
//! ```
//! use std::collections::HashMap;
//! use relay_collections::CorrelationList;
//!
//! let mut list: CorrelationList<u64> = CorrelationList::new();
//! let mut index = HashMap::new();
//!
//! for id in [10u64, 11, 12] {
//!     let key = list.append(id);
//!     index.insert(id, key);
//!     if let Some(evicted) = list.evict_if_needed(2) {
//!         index.remove(&evicted);
//!     }
//! }
//!
//! assert_eq!(index.len(), list.len());
//! assert!(!index.contains_key(&10));
//! ```
//!
//! # Concurrency
//!
//! Every mutation takes `&mut self` and completes all link writes before it
//! returns, so no reader can observe a chain mid-splice. Share a list across
//! threads by putting it, together with any index derived from it, behind a
//! single lock.

#![warn(missing_docs)]

pub mod error;
pub mod key;
pub mod list;
pub mod node;
pub mod storage;

pub use error::ListError;
pub use key::{Link, NodeKey};
pub use list::{CorrelationList, Iter, Keys, SlabStorage};
pub use node::Node;
pub use storage::Storage;
