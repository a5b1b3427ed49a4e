//! `PriorityQueue<T>`: ordered queue of unique items with O(log n) removal.
//!
//! Used for the router's pending request queue and every segment's transport
//! queue.  Both need "pop the most urgent" *and* "remove this particular
//! item", which `BinaryHeap` cannot do without a rebuild.
//!
//! Entries are keyed by `(priority, seq)` in a `BTreeMap`: lower priority
//! values pop first, and `seq` (a monotonically increasing insertion counter)
//! keeps equal priorities FIFO.  A reverse index maps each item to its key.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct PriorityQueue<T: Copy + Eq + Hash> {
    entries: BTreeMap<(i32, u64), T>,
    keys:    FxHashMap<T, (i32, u64)>,
    seq:     u64,
}

impl<T: Copy + Eq + Hash> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            keys:    FxHashMap::default(),
            seq:     0,
        }
    }
}

impl<T: Copy + Eq + Hash> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `item` at `priority`.
    ///
    /// An item already in the queue is moved to the new priority and to the
    /// back of its FIFO band.  Returns `true` if the item was not present.
    pub fn push(&mut self, priority: i32, item: T) -> bool {
        let fresh = self.remove(&item).is_none();
        let key = (priority, self.seq);
        self.seq += 1;
        self.entries.insert(key, item);
        self.keys.insert(item, key);
        fresh
    }

    /// Remove and return the most urgent item with its priority.
    pub fn pop(&mut self) -> Option<(i32, T)> {
        let ((priority, _), item) = self.entries.pop_first()?;
        self.keys.remove(&item);
        Some((priority, item))
    }

    /// The most urgent item without removing it.
    pub fn peek(&self) -> Option<(i32, T)> {
        self.entries.iter().next().map(|(&(p, _), &item)| (p, item))
    }

    /// Remove `item` wherever it sits; returns its priority if it was queued.
    pub fn remove(&mut self, item: &T) -> Option<i32> {
        let key = self.keys.remove(item)?;
        self.entries.remove(&key);
        Some(key.0)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.keys.contains_key(item)
    }

    pub fn priority_of(&self, item: &T) -> Option<i32> {
        self.keys.get(item).map(|&(p, _)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items in pop order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, T)> + '_ {
        self.entries.iter().map(|(&(p, _), &item)| (p, item))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
    }
}
