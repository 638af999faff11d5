//! Edge-cost change accumulation between plan cycles.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::space::Cost;

/// A single observed edge-cost delta.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeChange<V> {
    /// Edge source vertex.
    pub from: V,
    /// Edge target vertex.
    pub to: V,
    /// Cost before the change.
    pub old_cost: Cost,
    /// Cost after the change.
    pub new_cost: Cost,
}

/// Append-only bag of edge-cost changes, drained at the top of each
/// plan cycle.
///
/// Cloning yields a handle to the same bag, so sensor or UI threads
/// can keep a feed and append while the planner thread owns the
/// planner itself. Draining takes everything accumulated so far in
/// one atomic step; appends that race with a drain land in the next
/// cycle.
///
/// For undirected spaces, report each change twice, once per
/// direction.
#[derive(Clone, Debug, Default)]
pub struct ChangeLog<V> {
    changes: Arc<Mutex<Vec<EdgeChange<V>>>>,
}

impl<V> ChangeLog<V> {
    /// Create an empty change log.
    pub fn new() -> Self {
        Self {
            changes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append one edge-cost change.
    pub fn push(&self, change: EdgeChange<V>) {
        self.changes.lock().push(change);
    }

    /// Atomically take every accumulated change, leaving the log
    /// empty.
    pub fn drain(&self) -> Vec<EdgeChange<V>> {
        std::mem::take(&mut *self.changes.lock())
    }

    /// Number of pending changes.
    pub fn len(&self) -> usize {
        self.changes.lock().len()
    }

    /// True iff no changes are pending.
    pub fn is_empty(&self) -> bool {
        self.changes.lock().is_empty()
    }
}
