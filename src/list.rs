//! Arena-backed doubly linked list tracking key recency.
//!
//! This module provides the recency order behind the cache: most recently
//! touched key at the front, eviction candidate at the back. Nodes live in a
//! `Vec` slab and link to each other through plain `usize` handles, with a
//! free list recycling slots of removed nodes. Handles stay stable for the
//! lifetime of the node they were issued for, which lets the cache's index
//! map hold them across unrelated insertions and removals.
//!
//! All operations are O(1): push-front, move-to-front, detach, pop-back.
//!
//! **Note**: This module is internal infrastructure and should not be used
//! directly by library consumers. A handle is only meaningful to the cache
//! that obtained it from `push_front`; handles of removed nodes must not be
//! used again. Use the high-level cache type instead.

use core::fmt;

/// Sentinel handle marking "no node" (list ends, empty list).
const NIL: usize = usize::MAX;

/// One slab slot. `value` is `None` while the slot sits on the free list.
struct Slot<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
}

/// A doubly linked recency list over a `Vec` slab.
///
/// The front of the list is the most recently used position; the back is the
/// least recently used. Returned handles are slab indices and remain valid
/// until the node is removed.
pub(crate) struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Creates an empty list, pre-allocating slab space for `capacity` nodes.
    pub(crate) fn new(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Returns the current number of nodes in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no nodes.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value at the front (most recently used position) and
    /// returns its handle.
    pub(crate) fn push_front(&mut self, value: T) -> usize {
        let slot = Slot {
            value: Some(value),
            prev: NIL,
            next: self.head,
        };
        let handle = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        if self.head != NIL {
            self.slots[self.head].prev = handle;
        } else {
            self.tail = handle;
        }
        self.head = handle;
        self.len += 1;
        handle
    }

    /// Moves the node behind `handle` to the front of the list.
    ///
    /// No-op when the node is already at the front or the handle does not
    /// refer to a live node.
    pub(crate) fn move_to_front(&mut self, handle: usize) {
        if handle == self.head {
            return;
        }
        let occupied = self
            .slots
            .get(handle)
            .is_some_and(|slot| slot.value.is_some());
        if !occupied {
            return;
        }

        self.detach(handle);

        self.slots[handle].prev = NIL;
        self.slots[handle].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = handle;
        } else {
            self.tail = handle;
        }
        self.head = handle;
    }

    /// Removes the node behind `handle`, returning its value and recycling
    /// the slot. Returns `None` for handles that do not refer to a live node.
    pub(crate) fn remove(&mut self, handle: usize) -> Option<T> {
        let value = self.slots.get_mut(handle)?.value.take()?;
        self.detach(handle);
        self.free.push(handle);
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the value at the back (least recently used
    /// position), or `None` if the list is empty.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    /// Returns a reference to the front (most recently used) value.
    #[allow(dead_code)]
    pub(crate) fn front(&self) -> Option<&T> {
        self.slots.get(self.head).and_then(|slot| slot.value.as_ref())
    }

    /// Returns a reference to the back (least recently used) value.
    #[allow(dead_code)]
    pub(crate) fn back(&self) -> Option<&T> {
        self.slots.get(self.tail).and_then(|slot| slot.value.as_ref())
    }

    /// Returns a reference to the value behind `handle`, if live.
    #[allow(dead_code)]
    pub(crate) fn get(&self, handle: usize) -> Option<&T> {
        self.slots.get(handle).and_then(|slot| slot.value.as_ref())
    }

    /// Drops all nodes and recycled slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    /// Unlinks a node from its neighbors, fixing up `head`/`tail`.
    ///
    /// The slot itself is left untouched; callers re-link or recycle it.
    fn detach(&mut self, handle: usize) {
        let prev = self.slots[handle].prev;
        let next = self.slots[handle].next;
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
    }
}

impl<T> fmt::Debug for RecencyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("length", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drains the list front-to-back for order assertions.
    fn drain_order<T>(list: &mut RecencyList<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(v) = list.pop_back() {
            out.push(v);
        }
        out.reverse();
        out
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = RecencyList::<u32>::new(4);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn test_push_front_order() {
        let mut list = RecencyList::new(4);
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&30));
        assert_eq!(list.back(), Some(&10));
        assert_eq!(drain_order(&mut list), vec![30, 20, 10]);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new(4);
        let h10 = list.push_front(10);
        let _h20 = list.push_front(20);
        let h30 = list.push_front(30);

        // Back node to the front: 10, 30, 20
        list.move_to_front(h10);
        assert_eq!(list.front(), Some(&10));
        assert_eq!(list.back(), Some(&20));

        // Moving the head is a no-op
        list.move_to_front(h10);
        assert_eq!(list.len(), 3);

        // Middle node to the front: 30, 10, 20
        list.move_to_front(h30);
        assert_eq!(drain_order(&mut list), vec![30, 10, 20]);
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new(4);
        let _h10 = list.push_front(10);
        let h20 = list.push_front(20);
        let _h30 = list.push_front(30);

        assert_eq!(list.remove(h20), Some(20));
        assert_eq!(list.len(), 2);
        // Removing again through a dead handle yields nothing
        assert_eq!(list.remove(h20), None);
        assert_eq!(list.len(), 2);
        assert_eq!(drain_order(&mut list), vec![30, 10]);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut list = RecencyList::new(4);
        let h10 = list.push_front(10);
        let _h20 = list.push_front(20);
        let h30 = list.push_front(30);

        assert_eq!(list.remove(h30), Some(30));
        assert_eq!(list.front(), Some(&20));

        assert_eq!(list.remove(h10), Some(10));
        assert_eq!(list.back(), Some(&20));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new(4);
        assert_eq!(list.pop_back(), None);

        list.push_front(10);
        list.push_front(20);
        assert_eq!(list.pop_back(), Some(10));
        assert_eq!(list.pop_back(), Some(20));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_slot_reuse() {
        let mut list = RecencyList::new(2);
        let h10 = list.push_front(10);
        list.push_front(20);

        assert_eq!(list.remove(h10), Some(10));
        // The freed slot is recycled for the next insertion
        let h30 = list.push_front(30);
        assert_eq!(h30, h10);
        assert_eq!(list.len(), 2);
        assert_eq!(drain_order(&mut list), vec![30, 20]);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut list = RecencyList::new(2);
        let h10 = list.push_front(10);
        list.remove(h10);
        let h20 = list.push_front(20);

        // h10 now aliases h20's slot; the caller contract forbids using it,
        // but move_to_front on a live aliased handle must not corrupt order
        list.move_to_front(h20);
        assert_eq!(list.len(), 1);
        assert_eq!(list.front(), Some(&20));
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new(4);
        list.push_front(10);
        list.push_front(20);
        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.pop_back(), None);

        // Usable again after clear
        list.push_front(30);
        assert_eq!(list.front(), Some(&30));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_move_to_front_single_node() {
        let mut list = RecencyList::new(2);
        let h = list.push_front(1);
        list.move_to_front(h);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_interleaved_operations() {
        let mut list = RecencyList::new(4);
        let ha = list.push_front("a");
        let hb = list.push_front("b");
        let hc = list.push_front("c");

        list.move_to_front(ha); // a c b
        assert_eq!(list.remove(hb), Some("b")); // a c
        let hd = list.push_front("d"); // d a c
        list.move_to_front(hc); // c d a
        assert_ne!(hd, ha);
        assert_eq!(drain_order(&mut list), vec!["c", "d", "a"]);
    }
}
