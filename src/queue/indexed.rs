//! Indexed binary min-heap implementation.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{PlanningError, Result};

/// Ordering policy for queue elements.
///
/// Implemented for any `Fn(&T, &T) -> Ordering` closure, so ad-hoc
/// orderings can be passed inline; [`NaturalOrder`] covers payloads
/// that are themselves comparable.
pub trait Comparator<T> {
    /// Compare two elements; `Ordering::Less` means higher priority.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Comparator that delegates to the payload's `Ord` instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// A min-ordered priority queue with by-value element lookup.
///
/// Backed by a binary heap in a `Vec` plus a `HashMap` from payload
/// (by equality) to its current heap slot. The side map is what makes
/// [`update`](Self::update) and [`remove`](Self::remove) O(log n)
/// instead of O(n), at the price of requiring `T: Clone + Eq + Hash`.
///
/// `add` does not check for duplicates; if an element is inserted
/// twice, keyed operations track only one occurrence. Callers that
/// need uniqueness must guard with [`contains`](Self::contains).
///
/// The comparator may read priority data that lives inside the
/// elements (or behind shared state they point to). If such data
/// changes after insertion, call [`update`](Self::update) for a
/// single affected element or [`heapify`](Self::heapify) after a bulk
/// mutation to restore ordering.
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<T, C = NaturalOrder> {
    heap: Vec<T>,
    slots: HashMap<T, usize>,
    order: C,
}

impl<T> IndexedPriorityQueue<T, NaturalOrder>
where
    T: Clone + Eq + Hash + Ord,
{
    /// Create an empty queue ordered by `T`'s natural ordering.
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<T> Default for IndexedPriorityQueue<T, NaturalOrder>
where
    T: Clone + Eq + Hash + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> IndexedPriorityQueue<T, C>
where
    T: Clone + Eq + Hash,
    C: Comparator<T>,
{
    /// Create an empty queue with an explicit ordering policy.
    pub fn with_order(order: C) -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            order,
        }
    }

    /// Create an empty queue with pre-allocated capacity.
    pub fn with_capacity(order: C, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
            order,
        }
    }

    /// Number of elements in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True iff the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an element. Duplicates are not checked.
    pub fn add(&mut self, item: T) {
        self.heap.push(item);
        let last = self.heap.len() - 1;
        self.set_slot(last);
        self.sift_up(last);
    }

    /// The minimum element, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Remove and return the minimum element.
    pub fn poll(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            None
        } else {
            Some(self.delete_at(0))
        }
    }

    /// Delete the entry equal to `item`, if present.
    ///
    /// Returns true iff an entry was found and deleted.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.slots.get(item).copied() {
            Some(i) => {
                self.delete_at(i);
                true
            }
            None => false,
        }
    }

    /// True iff an entry equal to `item` is in the queue.
    pub fn contains(&self, item: &T) -> bool {
        self.slots.contains_key(item)
    }

    /// Re-sort a single element whose priority changed since
    /// insertion.
    ///
    /// The stored entry is replaced by `item` (equal by definition,
    /// but possibly carrying refreshed priority data) and sifted to
    /// its new position. Fails with
    /// [`PlanningError::UnknownQueueEntry`] if no equal entry exists.
    pub fn update(&mut self, item: T) -> Result<()> {
        let i = *self
            .slots
            .get(&item)
            .ok_or(PlanningError::UnknownQueueEntry)?;
        self.heap[i] = item;
        self.sift(i);
        Ok(())
    }

    /// Remove all elements.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Re-establish the heap property over the entire queue.
    ///
    /// Use after the priorities of arbitrarily many elements changed
    /// behind the queue's back; costs O(n) total rather than
    /// O(n log n) of per-element updates.
    pub fn heapify(&mut self) {
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// Visit the elements in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter()
    }

    fn set_slot(&mut self, i: usize) {
        self.slots.insert(self.heap[i].clone(), i);
    }

    /// Swap two heap slots, keeping the side map synchronized.
    fn swap_entries(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.set_slot(i);
        self.set_slot(j);
    }

    fn delete_at(&mut self, i: usize) -> T {
        let last = self.heap.len() - 1;
        self.slots.remove(&self.heap[i]);
        self.heap.swap(i, last);
        let removed = self.heap.pop().expect("heap is non-empty");

        if i != last {
            self.set_slot(i);
            self.sift(i);
        }
        removed
    }

    /// Restore ordering for the element at `i` after its priority
    /// may have moved in either direction.
    fn sift(&mut self, i: usize) {
        let settled = self.sift_down(i);
        if settled == i {
            self.sift_up(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self
                .order
                .compare(&self.heap[i], &self.heap[parent])
                .is_lt()
            {
                self.swap_entries(i, parent);
                i = parent;
            } else {
                break;
            }
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right < len
                && self
                    .order
                    .compare(&self.heap[right], &self.heap[left])
                    .is_lt()
            {
                child = right;
            }

            if self.order.compare(&self.heap[child], &self.heap[i]).is_lt() {
                self.swap_entries(i, child);
                i = child;
            } else {
                break;
            }
        }
        i
    }
}
