//! Storage trait for slab-like arenas with stable slot indices.
//!
//! Storage provides insert/remove/get operations where a slot stays valid
//! until it is explicitly removed. The correlation list keeps only slot
//! links between nodes, never references, so releasing a node can not leave
//! another node pointing into freed memory.

/// Slab-like storage with stable slot indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable slots**: a slot remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Vacancy detection**: `get`/`remove` on a vacant slot return `None`
///
/// Slots may be reused after removal. The list stamps every node with a
/// generation to tell a reused slot apart from the node a stale key named.
///
/// # Implementations
///
/// - `slab::Slab<T>` - growable, heap allocated
pub trait Storage<T> {
    /// Creates storage with room for at least `capacity` values.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Inserts a value, returning its slot.
    fn insert(&mut self, value: T) -> usize;

    /// Removes and returns the value at `slot`, if occupied.
    fn remove(&mut self, slot: usize) -> Option<T>;

    /// Returns a reference to the value at `slot`, if occupied.
    fn get(&self, slot: usize) -> Option<&T>;

    /// Returns a mutable reference to the value at `slot`, if occupied.
    fn get_mut(&mut self, slot: usize) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored value.
    fn clear(&mut self);
}

impl<T> Storage<T> for slab::Slab<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        slab::Slab::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }

    #[inline]
    fn remove(&mut self, slot: usize) -> Option<T> {
        self.try_remove(slot)
    }

    #[inline]
    fn get(&self, slot: usize) -> Option<&T> {
        slab::Slab::get(self, slot)
    }

    #[inline]
    fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, slot)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    #[inline]
    fn clear(&mut self) {
        slab::Slab::clear(self)
    }
}
