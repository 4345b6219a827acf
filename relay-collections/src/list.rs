//! Bounded, insertion-ordered doubly-linked list over slab storage.
//!
//! The list owns an arena of [`Node`]s and links them through slot indices.
//! Appending returns a [`NodeKey`] that the caller files in its own index for
//! O(1) addressed access later. Any node can be removed in O(1); the oldest
//! node is evicted once the list grows past a caller-chosen capacity.
//!
//! # One splice primitive
//!
//! Explicit removal and capacity eviction only differ in which node they
//! select. Both go through the same splice, so head and tail removal are not
//! separate code paths:
//!
//! ```text
//! before:  prev <-> node <-> next
//! after:   prev <-----------> next      node's slot released
//!
//! prev absent => head moves to next
//! next absent => tail moves to prev
//! ```
//!
//! # Example
//!
//! ```
//! use relay_collections::{CorrelationList, ListError};
//!
//! let mut list: CorrelationList<&str> = CorrelationList::new();
//!
//! let a = list.append("first");
//! let b = list.append("second");
//! let _c = list.append("third");
//!
//! assert_eq!(list.get_at(1), Ok(&"second"));
//!
//! // Remove from the middle - O(1)
//! assert_eq!(list.remove(b), Ok("second"));
//! assert_eq!(list.get_at(1), Ok(&"third"));
//!
//! // Keys are one-shot
//! assert_eq!(list.remove(b), Err(ListError::NotInList));
//!
//! // Sliding window of two
//! assert_eq!(list.evict_if_needed(2), None);
//! list.append("fourth");
//! assert_eq!(list.evict_if_needed(2), Some("first"));
//! assert!(!list.contains(a));
//! ```

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::{Link, ListError, Node, NodeKey, Storage};

/// Default arena for list nodes.
pub type SlabStorage<T> = slab::Slab<Node<T>>;

/// A doubly-linked list whose nodes live in an owned arena.
///
/// The list tracks head (oldest), tail (newest), length and the next
/// generation stamp. It does not enforce a capacity on its own; call
/// [`evict_if_needed`](Self::evict_if_needed) after appending to keep a
/// sliding window.
///
/// # Type Parameters
///
/// - `T`: Payload type, opaque to the list
/// - `S`: Storage type (default [`SlabStorage<T>`])
///
/// # Key discipline
///
/// Keys must come from this list instance. A key issued by a different list
/// may happen to name a live node here; that is a caller bug the list can
/// not detect in O(1). It never causes memory unsafety.
#[derive(Debug)]
pub struct CorrelationList<T, S = SlabStorage<T>>
where
    S: Storage<Node<T>>,
{
    storage: S,
    head: Link,
    tail: Link,
    len: usize,
    generation: u64,
    _marker: PhantomData<T>,
}

impl<T, S> Default for CorrelationList<T, S>
where
    S: Storage<Node<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> CorrelationList<T, S>
where
    S: Storage<Node<T>>,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with arena room for `capacity` nodes.
    ///
    /// This only pre-sizes storage; it is not the eviction bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: S::with_capacity(capacity),
            head: Link::NONE,
            tail: Link::NONE,
            len: 0,
            generation: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of linked nodes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the head (oldest) node's key, or `None` if empty.
    #[inline]
    pub fn front_key(&self) -> Option<NodeKey> {
        self.head.slot().map(|slot| self.key_at(slot))
    }

    /// Returns the tail (newest) node's key, or `None` if empty.
    #[inline]
    pub fn back_key(&self) -> Option<NodeKey> {
        self.tail.slot().map(|slot| self.key_at(slot))
    }

    /// Returns `true` if `key` names a node currently linked into this list.
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.node(key).is_some()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends a payload after the current tail.
    ///
    /// Returns the key of the new node. Always succeeds; O(1). The payload
    /// may be completed later through [`get_mut`](Self::get_mut).
    pub fn append(&mut self, payload: T) -> NodeKey {
        let generation = self.generation;
        self.generation = self.generation.wrapping_add(1);

        let mut node = Node::detached(payload, generation);
        node.prev = self.tail;
        let slot = self.storage.insert(node);
        let link = Link::to(slot);

        match self.tail.slot() {
            Some(tail) => self.linked_mut(tail).next = link,
            None => self.head = link,
        }

        self.tail = link;
        self.len += 1;
        NodeKey::new(slot, generation)
    }

    /// Removes the node named by `key` and returns its payload.
    ///
    /// The predecessor and successor are rebound to each other; head and
    /// tail follow when the node sat at either end. Removing the sole node
    /// empties the list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::NotInList`] if the node was already removed or
    /// evicted, or if its links disagree with its neighbours.
    pub fn remove(&mut self, key: NodeKey) -> Result<T, ListError> {
        let node = self.node(key).ok_or(ListError::NotInList)?;
        let prev = node.prev;
        let next = node.next;
        let me = Link::to(key.slot());

        // Both neighbours (or the list ends) must point back at the node.
        let from_prev = match prev.slot() {
            Some(slot) => self.storage.get(slot).is_some_and(|n| n.next == me),
            None => self.head == me,
        };
        let from_next = match next.slot() {
            Some(slot) => self.storage.get(slot).is_some_and(|n| n.prev == me),
            None => self.tail == me,
        };
        if !(from_prev && from_next) {
            return Err(ListError::NotInList);
        }

        Ok(self.splice(key.slot(), prev, next))
    }

    /// Evicts the head if the list holds more than `capacity` nodes.
    ///
    /// Returns the evicted payload, or `None` when within capacity. The
    /// policy is FIFO by insertion order; reads never make a node younger.
    pub fn evict_if_needed(&mut self, capacity: usize) -> Option<T> {
        if self.len <= capacity {
            return None;
        }

        let head = self.head.slot()?;
        let next = self.linked(head).next;
        Some(self.splice(head, Link::NONE, next))
    }

    /// Removes every node.
    ///
    /// Keys issued before the call stay invalid even once their slots are
    /// reused.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = Link::NONE;
        self.tail = Link::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the payload `index` steps from the head.
    ///
    /// O(index); meant for diagnostics rather than the hot path.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn get_at(&self, index: usize) -> Result<&T, ListError> {
        self.iter().nth(index).ok_or(ListError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns the payload of a linked node.
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&T> {
        self.node(key).map(Node::data)
    }

    /// Returns the payload of a linked node for in-place completion.
    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.node_mut(key).map(Node::data_mut)
    }

    /// Returns the oldest payload.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.slot().map(|slot| self.linked(slot).data())
    }

    /// Returns the newest payload.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail.slot().map(|slot| self.linked(slot).data())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Returns the key of the node after `key`.
    ///
    /// Returns `None` if `key` is the tail or not in the list.
    #[inline]
    pub fn next_key(&self, key: NodeKey) -> Option<NodeKey> {
        let next = self.node(key)?.next;
        next.slot().map(|slot| self.key_at(slot))
    }

    /// Returns the key of the node before `key`.
    ///
    /// Returns `None` if `key` is the head or not in the list.
    #[inline]
    pub fn prev_key(&self, key: NodeKey) -> Option<NodeKey> {
        let prev = self.node(key)?.prev;
        prev.slot().map(|slot| self.key_at(slot))
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over payloads, oldest to newest.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns an iterator over keys, oldest to newest.
    #[inline]
    pub fn keys(&self) -> Keys<'_, T, S> {
        Keys {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Rebinds `prev` and `next` around `slot` and releases it.
    ///
    /// `prev`/`next` must be the node's own links.
    fn splice(&mut self, slot: usize, prev: Link, next: Link) -> T {
        match prev.slot() {
            Some(p) => self.linked_mut(p).next = next,
            None => self.head = next,
        }

        match next.slot() {
            Some(n) => self.linked_mut(n).prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;

        match self.storage.remove(slot) {
            Some(node) => node.into_data(),
            None => unreachable!("spliced vacant slot {slot}"),
        }
    }

    #[inline]
    fn node(&self, key: NodeKey) -> Option<&Node<T>> {
        self.storage
            .get(key.slot())
            .filter(|node| node.generation == key.generation())
    }

    #[inline]
    fn node_mut(&mut self, key: NodeKey) -> Option<&mut Node<T>> {
        self.storage
            .get_mut(key.slot())
            .filter(|node| node.generation == key.generation())
    }

    #[inline]
    fn key_at(&self, slot: usize) -> NodeKey {
        NodeKey::new(slot, self.linked(slot).generation)
    }

    /// Follows a link held by the list or a linked node.
    #[inline]
    fn linked(&self, slot: usize) -> &Node<T> {
        match self.storage.get(slot) {
            Some(node) => node,
            None => unreachable!("dangling link to slot {slot}"),
        }
    }

    #[inline]
    fn linked_mut(&mut self, slot: usize) -> &mut Node<T> {
        match self.storage.get_mut(slot) {
            Some(node) => node,
            None => unreachable!("dangling link to slot {slot}"),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a CorrelationList<T, S>
where
    S: Storage<Node<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over payloads in insertion order.
pub struct Iter<'a, T, S>
where
    S: Storage<Node<T>>,
{
    list: &'a CorrelationList<T, S>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, T, S> Iterator for Iter<'a, T, S>
where
    S: Storage<Node<T>>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let list: &'a CorrelationList<T, S> = self.list;
        let node = list.linked(self.front.slot()?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, S> DoubleEndedIterator for Iter<'a, T, S>
where
    S: Storage<Node<T>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let list: &'a CorrelationList<T, S> = self.list;
        let node = list.linked(self.back.slot()?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T, S> ExactSizeIterator for Iter<'_, T, S> where S: Storage<Node<T>> {}

impl<T, S> FusedIterator for Iter<'_, T, S> where S: Storage<Node<T>> {}

/// Iterator over node keys in insertion order.
///
/// Collect the keys first when the list is going to be modified while
/// walking it.
pub struct Keys<'a, T, S>
where
    S: Storage<Node<T>>,
{
    list: &'a CorrelationList<T, S>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<T, S> Iterator for Keys<'_, T, S>
where
    S: Storage<Node<T>>,
{
    type Item = NodeKey;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.front.slot()?;
        let node = self.list.linked(slot);
        self.front = node.next;
        self.remaining -= 1;
        Some(NodeKey::new(slot, node.generation))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S> DoubleEndedIterator for Keys<'_, T, S>
where
    S: Storage<Node<T>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = self.back.slot()?;
        let node = self.list.linked(slot);
        self.back = node.prev;
        self.remaining -= 1;
        Some(NodeKey::new(slot, node.generation))
    }
}

impl<T, S> ExactSizeIterator for Keys<'_, T, S> where S: Storage<Node<T>> {}

impl<T, S> FusedIterator for Keys<'_, T, S> where S: Storage<Node<T>> {}

#[cfg(test)]
mod tests {
    use super::*;

    type List = CorrelationList<u64>;

    /// Walks `next` links from the head, independent of `len`.
    fn walk_forward(list: &List) -> Vec<u64> {
        let mut out = Vec::new();
        let mut key = list.front_key();
        while let Some(k) = key {
            out.push(*list.get(k).unwrap());
            key = list.next_key(k);
            assert!(out.len() <= list.len(), "forward walk overran len");
        }
        out
    }

    /// Walks `prev` links from the tail, returned oldest first.
    fn walk_backward(list: &List) -> Vec<u64> {
        let mut out = Vec::new();
        let mut key = list.back_key();
        while let Some(k) = key {
            out.push(*list.get(k).unwrap());
            key = list.prev_key(k);
            assert!(out.len() <= list.len(), "backward walk overran len");
        }
        out.reverse();
        out
    }

    fn assert_chain(list: &List, expected: &[u64]) {
        assert_eq!(list.len(), expected.len());
        assert_eq!(walk_forward(list), expected);
        assert_eq!(walk_backward(list), expected);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn new_list_is_empty() {
        let list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front_key().is_none());
        assert!(list.back_key().is_none());
        assert!(list.front().is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn append_single() {
        let mut list = List::new();
        let a = list.append(1);

        assert_eq!(list.len(), 1);
        assert_eq!(list.front_key(), Some(a));
        assert_eq!(list.back_key(), Some(a));
        assert_eq!(list.get(a), Some(&1));
        assert!(list.next_key(a).is_none());
        assert!(list.prev_key(a).is_none());
    }

    #[test]
    fn append_keeps_order() {
        let mut list = List::new();
        for v in 1..=5 {
            list.append(v);
        }

        assert_eq!(list.get_at(0), Ok(&1));
        assert_eq!(list.get_at(list.len() - 1), Ok(&5));
        assert_chain(&list, &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn get_at_out_of_range() {
        let mut list = List::new();
        assert_eq!(
            list.get_at(0),
            Err(ListError::OutOfRange { index: 0, len: 0 })
        );

        list.append(10);
        list.append(20);
        assert_eq!(
            list.get_at(2),
            Err(ListError::OutOfRange { index: 2, len: 2 })
        );
        assert!(list.get_at(usize::MAX).is_err());
    }

    #[test]
    fn remove_middle_rebinds_neighbours() {
        let mut list = List::new();
        let a = list.append(1);
        let b = list.append(2);
        let c = list.append(3);

        assert_eq!(list.get_at(1), Ok(&2));
        assert_eq!(list.remove(b), Ok(2));

        assert_eq!(list.next_key(a), Some(c));
        assert_eq!(list.prev_key(c), Some(a));
        assert_eq!(list.get_at(1), Ok(&3));
        assert_eq!(list.len(), 2);
        assert_chain(&list, &[1, 3]);
    }

    #[test]
    fn remove_head_moves_head() {
        let mut list = List::new();
        let a = list.append(1);
        let b = list.append(2);
        let _c = list.append(3);

        assert_eq!(list.remove(a), Ok(1));
        assert_eq!(list.front_key(), Some(b));
        assert!(list.prev_key(b).is_none());
        assert_chain(&list, &[2, 3]);
    }

    #[test]
    fn remove_tail_moves_tail() {
        let mut list = List::new();
        let _a = list.append(1);
        let b = list.append(2);
        let c = list.append(3);

        assert_eq!(list.remove(c), Ok(3));
        assert_eq!(list.back_key(), Some(b));
        assert!(list.next_key(b).is_none());
        assert_chain(&list, &[1, 2]);
    }

    #[test]
    fn remove_sole_node_empties_list() {
        let mut list = List::new();
        let a = list.append(7);

        assert_eq!(list.remove(a), Ok(7));
        assert!(list.is_empty());
        assert!(list.front_key().is_none());
        assert!(list.back_key().is_none());

        let b = list.append(8);
        assert_eq!(list.front_key(), Some(b));
        assert_eq!(list.back_key(), Some(b));
        assert_chain(&list, &[8]);
    }

    #[test]
    fn remove_twice_is_not_in_list() {
        let mut list = List::new();
        let a = list.append(1);
        let _b = list.append(2);

        assert_eq!(list.remove(a), Ok(1));
        assert_eq!(list.remove(a), Err(ListError::NotInList));
        assert_chain(&list, &[2]);
    }

    #[test]
    fn stale_key_does_not_hit_reused_slot() {
        let mut list = List::new();
        let a = list.append(1);
        list.remove(a).unwrap();

        // Slab hands the freed slot to the next insert
        let b = list.append(2);
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a, b);

        assert!(!list.contains(a));
        assert_eq!(list.get(a), None);
        assert_eq!(list.remove(a), Err(ListError::NotInList));
        assert_eq!(list.get(b), Some(&2));
        assert_chain(&list, &[2]);
    }

    #[test]
    fn evict_under_capacity_is_noop() {
        let mut list = List::new();
        assert_eq!(list.evict_if_needed(0), None);

        list.append(1);
        list.append(2);
        assert_eq!(list.evict_if_needed(2), None);
        assert_eq!(list.evict_if_needed(5), None);
        assert_chain(&list, &[1, 2]);
    }

    #[test]
    fn evict_removes_oldest_only() {
        let mut list = List::new();
        let keys: Vec<_> = (1..=4).map(|v| list.append(v)).collect();

        assert_eq!(list.evict_if_needed(3), Some(1));
        assert!(!list.contains(keys[0]));
        assert_chain(&list, &[2, 3, 4]);

        // Within capacity again
        assert_eq!(list.evict_if_needed(3), None);
    }

    #[test]
    fn sliding_window() {
        let mut list = List::new();

        list.append(1);
        list.append(2);
        assert_eq!(list.evict_if_needed(2), None);
        assert_eq!(list.len(), 2);

        list.append(3);
        assert_eq!(list.evict_if_needed(2), Some(1));
        assert_chain(&list, &[2, 3]);
    }

    #[test]
    fn reads_do_not_reorder_eviction() {
        let mut list = List::new();
        let a = list.append(1);
        list.append(2);

        // Touch the oldest node; it must still go first
        assert_eq!(list.get(a), Some(&1));
        assert_eq!(list.get_at(0), Ok(&1));

        list.append(3);
        assert_eq!(list.evict_if_needed(2), Some(1));
    }

    #[test]
    fn evicted_key_is_not_in_list() {
        let mut list = List::new();
        let a = list.append(1);
        list.append(2);

        assert_eq!(list.evict_if_needed(1), Some(1));
        assert_eq!(list.remove(a), Err(ListError::NotInList));
    }

    #[test]
    fn get_mut_completes_payload() {
        let mut list: CorrelationList<Vec<&str>> = CorrelationList::new();
        let key = list.append(vec!["discord"]);

        list.get_mut(key).unwrap().push("twitch");
        assert_eq!(list.get(key), Some(&vec!["discord", "twitch"]));

        let removed = list.remove(key).unwrap();
        assert_eq!(removed, vec!["discord", "twitch"]);
        assert!(list.get_mut(key).is_none());
    }

    #[test]
    fn keys_forward_and_back() {
        let mut list = List::new();
        let a = list.append(1);
        let b = list.append(2);
        let c = list.append(3);

        assert_eq!(list.keys().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(list.keys().rev().collect::<Vec<_>>(), vec![c, b, a]);
        assert_eq!(list.keys().len(), 3);
    }

    #[test]
    fn iter_meets_in_the_middle() {
        let mut list = List::new();
        for v in 1..=4 {
            list.append(v);
        }

        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_rev_matches_backward_walk() {
        let mut list = List::new();
        let keys: Vec<_> = (0..6).map(|v| list.append(v)).collect();
        list.remove(keys[2]).unwrap();
        list.remove(keys[5]).unwrap();

        let rev: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(rev, vec![4, 3, 1, 0]);
        assert_chain(&list, &[0, 1, 3, 4]);
    }

    #[test]
    fn clear_invalidates_keys() {
        let mut list = List::new();
        let a = list.append(1);
        list.append(2);

        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(a));

        let b = list.append(3);
        assert_eq!(list.get(a), None);
        assert_eq!(list.get(b), Some(&3));
        assert_chain(&list, &[3]);
    }

    #[test]
    fn interleaved_removals_keep_links_consistent() {
        let mut list = List::new();
        let keys: Vec<_> = (0..10).map(|v| list.append(v)).collect();

        for &i in &[0usize, 9, 4, 5, 1] {
            list.remove(keys[i]).unwrap();
        }
        assert_chain(&list, &[2, 3, 6, 7, 8]);

        list.append(10);
        assert_eq!(list.evict_if_needed(4), Some(2));
        assert_chain(&list, &[3, 6, 7, 8, 10]);
    }

    #[test]
    fn drop_releases_payloads() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut list: CorrelationList<Rc<()>> = CorrelationList::new();
            for _ in 0..3 {
                list.append(Rc::clone(&tracker));
            }
            let first = list.front_key().unwrap();
            drop(list.remove(first));
            assert_eq!(Rc::strong_count(&tracker), 3);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}

#[cfg(test)]
mod bench_slab_storage {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;
    const WINDOW: usize = 100;

    #[test]
    #[ignore]
    fn bench_list_append() {
        let mut list: CorrelationList<u64> = CorrelationList::with_capacity(WINDOW + 1);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            let key = list.append(i as u64);
            let _ = list.remove(key);
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            let key = list.append(i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.remove(key);
        }

        print_histogram("append", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_remove_middle() {
        let mut list: CorrelationList<u64> = CorrelationList::with_capacity(WINDOW + 1);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WINDOW {
            list.append(i as u64);
        }

        for i in 0..(WARMUP + ITERATIONS) {
            let key = list.keys().nth(WINDOW / 2).unwrap();
            let start = rdtscp();
            let _ = list.remove(key);
            let elapsed = rdtscp() - start;
            if i >= WARMUP {
                hist.record(elapsed).unwrap();
            }
            list.append(i as u64);
        }

        print_histogram("remove (middle)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_sliding_window() {
        let mut list: CorrelationList<u64> = CorrelationList::with_capacity(WINDOW + 1);
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.append(i as u64);
            let _ = list.evict_if_needed(WINDOW);
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            list.append(i as u64);
            let _ = list.evict_if_needed(WINDOW);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("append + evict", &hist);
    }
}
