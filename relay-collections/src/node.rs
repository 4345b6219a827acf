//! Chain element stored in the list's arena.

use crate::key::Link;

/// A node in the correlation list.
///
/// Wraps a payload with `prev`/`next` slot links and the generation the node
/// was created under. Nodes carry no behaviour beyond accessors: every link
/// rewrite happens inside [`CorrelationList`](crate::CorrelationList), so two
/// nodes never race to rewrite the same link.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) data: T,
    pub(crate) prev: Link,
    pub(crate) next: Link,
    pub(crate) generation: u64,
}

impl<T> Node<T> {
    /// Creates a detached node: not yet reachable from any head or tail.
    #[inline]
    pub(crate) fn detached(data: T, generation: u64) -> Self {
        Self {
            data,
            prev: Link::NONE,
            next: Link::NONE,
            generation,
        }
    }

    /// Returns the stored payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Link to the preceding (older) node, `Link::NONE` at the head.
    #[inline]
    pub fn prev(&self) -> Link {
        self.prev
    }

    /// Link to the following (newer) node, `Link::NONE` at the tail.
    #[inline]
    pub fn next(&self) -> Link {
        self.next
    }

    /// Insertion stamp, matched against [`NodeKey::generation`](crate::NodeKey::generation).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consumes the node, dropping its links with it.
    #[inline]
    pub(crate) fn into_data(self) -> T {
        self.data
    }
}
