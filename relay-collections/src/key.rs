//! Slot links and generation-stamped node handles.
//!
//! Nodes refer to their neighbours through [`Link`], a slot index with a
//! reserved sentinel (`usize::MAX`) instead of `Option<usize>`. Callers hold
//! [`NodeKey`], which pairs the slot with the generation the node was created
//! under, so a handle to a removed node never resolves to whatever reuses the
//! slot later.

/// A storage slot index with a sentinel "none" value.
///
/// Used for the `prev`/`next` links inside [`Node`](crate::Node) and for the
/// list's head and tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link(usize);

impl Link {
    /// Sentinel representing "no neighbour" / empty list end.
    pub const NONE: Self = Link(usize::MAX);

    /// Creates a link to `slot`.
    #[inline]
    pub(crate) const fn to(slot: usize) -> Self {
        debug_assert!(slot != usize::MAX, "slot collides with sentinel");
        Link(slot)
    }

    /// Returns `true` if this is the sentinel value.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == usize::MAX
    }

    /// Returns `true` if this link names a slot.
    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the slot, or `None` for the sentinel.
    #[inline]
    pub const fn slot(self) -> Option<usize> {
        if self.is_none() { None } else { Some(self.0) }
    }
}

/// Handle to a node returned by [`CorrelationList::append`].
///
/// A key stays valid exactly as long as its node is linked. Once the node is
/// removed or evicted, every operation taking the key reports
/// [`ListError::NotInList`](crate::ListError::NotInList), even if the slot
/// has since been reused by a newer node.
///
/// [`CorrelationList::append`]: crate::CorrelationList::append
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    slot: usize,
    generation: u64,
}

impl NodeKey {
    #[inline]
    pub(crate) const fn new(slot: usize, generation: u64) -> Self {
        Self { slot, generation }
    }

    /// Storage slot the node occupied when the key was issued.
    #[inline]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Insertion stamp of the node this key addresses.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
