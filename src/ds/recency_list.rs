//! Arena-backed doubly linked list of cache keys.
//!
//! Stores list nodes in a slot vector with a free list and links them by
//! slot index, with a `FxHashMap` side index from key to slot. Stable
//! handles and no raw pointers, and the side index turns remove-by-key and
//! move-to-front into O(1) operations.
//!
//! ## Architecture
//!
//! ```text
//!   slots (Vec<Option<Node<K>>>)          index (FxHashMap<K, usize>)
//!   ┌──────┬──────────────────────────┐   ┌─────┬──────┐
//!   │ slot │ Node { key, prev, next } │   │ key │ slot │
//!   ├──────┼──────────────────────────┤   ├─────┼──────┤
//!   │ 0    │ { A, None,    Some(1) }  │   │ A   │ 0    │
//!   │ 1    │ { B, Some(0), Some(2) }  │   │ B   │ 1    │
//!   │ 2    │ { C, Some(1), None    }  │   │ C   │ 2    │
//!   └──────┴──────────────────────────┘   └─────┴──────┘
//!
//!   head ─► [0] ◄──► [1] ◄──► [2] ◄── tail
//!          (MRU)              (LRU)
//! ```
//!
//! ## Operations
//! - `push_front` / `push_back`: O(1)
//! - `move_to_front(key)`: detach + attach to head, O(1)
//! - `remove(key)`: detach + free slot, O(1)
//! - `pop_back`: O(1)
//!
//! `debug_validate_invariants()` walks the links in debug/test builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list of keys in recency order, most-recent at the front.
///
/// The tail is the least-favored key. One node exists per live key; inserting
/// a key that is already present is a caller error and is rejected.
#[derive(Debug)]
pub struct RecencyList<K>
where
    K: Copy + Eq + Hash,
{
    slots: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    index: FxHashMap<K, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> RecencyList<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: FxHashMap::default(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of keys in the list.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is currently in the list.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the key at the front (most recent), if any.
    pub fn front(&self) -> Option<K> {
        self.head.map(|slot| self.node(slot).key)
    }

    /// Returns the key at the back (least recent), if any.
    pub fn back(&self) -> Option<K> {
        self.tail.map(|slot| self.node(slot).key)
    }

    /// Inserts `key` at the front; returns `false` if it is already present.
    pub fn push_front(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let slot = self.alloc(key);
        self.attach_front(slot);
        self.index.insert(key, slot);
        true
    }

    /// Inserts `key` at the back; returns `false` if it is already present.
    pub fn push_back(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let slot = self.alloc(key);
        self.attach_back(slot);
        self.index.insert(key, slot);
        true
    }

    /// Moves an existing key to the front; returns `false` if absent.
    pub fn move_to_front(&mut self, key: &K) -> bool {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => return false,
        };
        if Some(slot) == self.head {
            return true;
        }
        self.detach(slot);
        self.attach_front(slot);
        true
    }

    /// Removes `key` from the list; returns whether removal occurred.
    pub fn remove(&mut self, key: &K) -> bool {
        let slot = match self.index.remove(key) {
            Some(slot) => slot,
            None => return false,
        };
        self.detach(slot);
        self.dealloc(slot);
        true
    }

    /// Removes and returns the key at the back; `None` when empty.
    pub fn pop_back(&mut self) -> Option<K> {
        let slot = self.tail?;
        let key = self.node(slot).key;
        self.detach(slot);
        self.dealloc(slot);
        self.index.remove(&key);
        Some(key)
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator of keys from front (MRU) to back (LRU).
    pub fn iter(&self) -> RecencyListIter<'_, K> {
        RecencyListIter {
            list: self,
            current: self.head,
        }
    }

    fn node(&self, slot: usize) -> &Node<K> {
        self.slots[slot].as_ref().expect("slot in use")
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<K> {
        self.slots[slot].as_mut().expect("slot in use")
    }

    fn alloc(&mut self, key: K) -> usize {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            slot
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    fn dealloc(&mut self, slot: usize) {
        self.slots[slot] = None;
        self.free.push(slot);
    }

    fn detach(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(slot);
        node.prev = None;
        node.next = None;
    }

    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn attach_back(&mut self, slot: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(slot);
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(slot) = current {
            let node = self.slots[slot].as_ref().expect("linked slot missing");
            assert_eq!(node.prev, prev);
            assert_eq!(self.index.get(&node.key), Some(&slot));
            if node.next.is_none() {
                assert_eq!(self.tail, Some(slot));
            }

            prev = Some(slot);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(count, self.len());
        assert_eq!(count, self.index.len());
    }
}

impl<K> Default for RecencyList<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over keys from front to back.
pub struct RecencyListIter<'a, K>
where
    K: Copy + Eq + Hash,
{
    list: &'a RecencyList<K>,
    current: Option<usize>,
}

impl<K> Iterator for RecencyListIter<'_, K>
where
    K: Copy + Eq + Hash,
{
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current?;
        let node = self.list.slots[slot].as_ref()?;
        self.current = node.next;
        Some(node.key)
    }
}
