//! The incremental replanner core.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::error::{PlanningError, Result};
use crate::queue::{Comparator, IndexedPriorityQueue};
use crate::space::{Cost, SearchSpace};

use super::change_log::{ChangeLog, EdgeChange};
use super::key::SearchKey;

/// Cooperative cancellation flag for a running plan.
///
/// Clone the token, hand it to a supervising thread, and call
/// [`cancel`](Self::cancel) to make the current plan stop at its next
/// main-loop iteration. Cancellation leaves the planner's estimates
/// and frontier internally consistent; a later plan resumes the
/// remaining work. The flag stays set until [`reset`](Self::reset).
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, AtomicOrdering::Relaxed);
    }

    /// True iff cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(AtomicOrdering::Relaxed)
    }

    /// Clear the flag so planning can run again.
    pub fn reset(&self) {
        self.flag.store(false, AtomicOrdering::Relaxed);
    }
}

/// Cost-to-goal estimates for one touched vertex.
#[derive(Clone, Copy, Debug)]
struct VertexRecord {
    /// Confirmed cost-to-goal.
    g: Cost,
    /// One-step-lookahead cost-to-goal.
    rhs: Cost,
}

/// Frontier queue payload: a vertex and the key it was inserted with.
///
/// Equality and hashing are by vertex only, so the queue's by-value
/// index finds the entry regardless of how stale its key is.
#[derive(Clone, Debug)]
struct FrontierEntry<V> {
    vertex: V,
    key: SearchKey,
}

impl<V: PartialEq> PartialEq for FrontierEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl<V: Eq> Eq for FrontierEntry<V> {}

impl<V: Hash> Hash for FrontierEntry<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertex.hash(state);
    }
}

/// Orders frontier entries by their stored keys.
#[derive(Clone, Copy, Debug, Default)]
struct KeyOrder;

impl<V> Comparator<FrontierEntry<V>> for KeyOrder {
    fn compare(&self, a: &FrontierEntry<V>, b: &FrontierEntry<V>) -> Ordering {
        a.key.cmp(&b.key)
    }
}

/// Incremental shortest-path planner (D* Lite).
///
/// Maintains, for every vertex it has touched, a confirmed
/// cost-to-goal `g` and a one-step-lookahead cost-to-goal `rhs`,
/// together with a frontier queue of the vertices where the two
/// disagree. Work done for one [`plan`](Self::plan) call is reused by
/// the next: after an edge-cost change or a start move, only the
/// affected region is re-expanded.
///
/// The goal is fixed for the planner's lifetime (the estimate tree is
/// rooted there); the start moves cheaply via
/// [`update_start`](Self::update_start). Graph mutations are never
/// applied directly - announce them with
/// [`flag_cost_change`](Self::flag_cost_change) (or through a cloned
/// [`change_feed`](Self::change_feed) from another thread) and they
/// take effect at the top of the next plan cycle.
pub struct DStarPlanner<S: SearchSpace> {
    space: S,
    start: S::Vertex,
    goal: S::Vertex,
    /// Start in force when frontier keys were last made comparable;
    /// key-offset accounting references it.
    last_start: S::Vertex,
    /// Accumulated heuristic drift (k_m). Added to every newly
    /// computed primary key so that keys inserted before a start move
    /// stay conservative instead of requiring a full re-key.
    key_offset: Cost,
    records: HashMap<S::Vertex, VertexRecord>,
    frontier: IndexedPriorityQueue<FrontierEntry<S::Vertex>, KeyOrder>,
    changes: ChangeLog<S::Vertex>,
    cancel: CancelToken,
}

impl<S: SearchSpace> DStarPlanner<S> {
    /// Create a planner over `space` searching from `start` to the
    /// fixed `goal`.
    pub fn new(space: S, start: S::Vertex, goal: S::Vertex) -> Self {
        let mut planner = Self {
            space,
            start: start.clone(),
            goal: goal.clone(),
            last_start: start,
            key_offset: 0.0,
            records: HashMap::new(),
            frontier: IndexedPriorityQueue::with_order(KeyOrder),
            changes: ChangeLog::new(),
            cancel: CancelToken::new(),
        };

        planner.records.insert(
            goal.clone(),
            VertexRecord {
                g: Cost::INFINITY,
                rhs: 0.0,
            },
        );
        let key = planner.calculate_key(&goal);
        planner.frontier.add(FrontierEntry { vertex: goal, key });
        planner
    }

    /// Current start vertex.
    pub fn start(&self) -> &S::Vertex {
        &self.start
    }

    /// Goal vertex.
    pub fn goal(&self) -> &S::Vertex {
        &self.goal
    }

    /// The search space the planner reads from.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// Mutable access to the search space.
    ///
    /// Every cost-affecting mutation must be announced with
    /// [`flag_cost_change`](Self::flag_cost_change) (old and new cost
    /// per affected edge) before the next plan, or the estimates go
    /// quietly wrong. The grid and graph front-ends wrap this in
    /// mutators that keep the discipline for you.
    pub fn space_mut(&mut self) -> &mut S {
        &mut self.space
    }

    /// Confirmed cost-to-goal of `v` (infinity when untouched).
    pub fn g(&self, v: &S::Vertex) -> Cost {
        self.records.get(v).map_or(Cost::INFINITY, |r| r.g)
    }

    /// Lookahead cost-to-goal of `v` (infinity when untouched).
    pub fn rhs(&self, v: &S::Vertex) -> Cost {
        self.records.get(v).map_or(Cost::INFINITY, |r| r.rhs)
    }

    /// Number of vertices currently on the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// True iff `v` is on the frontier (its estimates disagree).
    pub fn is_on_frontier(&self, v: &S::Vertex) -> bool {
        self.frontier.contains(&Self::probe(v))
    }

    /// Every vertex the planner has touched so far.
    pub fn known_vertices(&self) -> impl Iterator<Item = &S::Vertex> {
        self.records.keys()
    }

    /// A cloneable handle to the change log, for flagging edge
    /// changes from other threads.
    pub fn change_feed(&self) -> ChangeLog<S::Vertex> {
        self.changes.clone()
    }

    /// The planner's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Record that the cost of edge `(from, to)` changed.
    ///
    /// The change is applied at the top of the next [`plan`](Self::plan)
    /// call, so a burst of updates costs one propagation pass rather
    /// than one per update. Rejects negative costs without touching
    /// planner state.
    pub fn flag_cost_change(
        &self,
        from: S::Vertex,
        to: S::Vertex,
        old_cost: Cost,
        new_cost: Cost,
    ) -> Result<()> {
        for cost in [old_cost, new_cost] {
            if cost < 0.0 {
                return Err(PlanningError::NegativeEdgeCost { cost });
            }
        }
        self.changes.push(EdgeChange {
            from,
            to,
            old_cost,
            new_cost,
        });
        Ok(())
    }

    /// Move the start vertex.
    ///
    /// Instead of re-keying the whole frontier, the heuristic
    /// distance from the previous start is folded into the key
    /// offset; keys already in the queue become conservative and are
    /// refreshed lazily when they surface.
    pub fn update_start(&mut self, new_start: S::Vertex) {
        self.key_offset += self.space.heuristic(&self.last_start, &new_start);
        self.last_start = new_start.clone();
        self.start = new_start;
        trace!("[DStar] start moved, key offset now {}", self.key_offset);
    }

    /// Produce an optimal path from the current start to the goal.
    ///
    /// Drains the change log, repairs the estimate tree, and walks
    /// the path forward. Returns an empty path when the goal is
    /// unreachable. Fails fast on a negative edge cost reported by
    /// the space.
    pub fn plan(&mut self) -> Result<Vec<S::Vertex>> {
        let changes = self.changes.drain();
        if !changes.is_empty() {
            debug!("[DStar] applying {} edge cost changes", changes.len());
        }
        for change in changes {
            // A change to edge (u, v) can only affect rhs(u) in a
            // goal-rooted tree.
            self.update_vertex(&change.from)?;
        }

        let settled = self.compute_shortest_path()?;
        if !settled {
            warn!(
                "[DStar] frontier exhausted before the start settled \
                 (inconsistent heuristic?), reporting no path"
            );
            return Ok(Vec::new());
        }

        #[cfg(debug_assertions)]
        self.check_estimates();

        Ok(self.extract_path())
    }

    /// Recompute `rhs(v)` from its successors and fix its frontier
    /// membership.
    fn update_vertex(&mut self, v: &S::Vertex) -> Result<()> {
        if *v != self.goal {
            let mut rhs = Cost::INFINITY;
            for succ in self.space.successors(v) {
                let cost = self.space.cost(v, &succ);
                if cost < 0.0 {
                    return Err(PlanningError::NegativeEdgeCost { cost });
                }
                let total = cost + self.g(&succ);
                if total < rhs {
                    rhs = total;
                }
            }
            self.set_rhs(v, rhs);
        }

        let probe = Self::probe(v);
        if self.frontier.contains(&probe) {
            self.frontier.remove(&probe);
        }
        if self.g(v) != self.rhs(v) {
            let key = self.calculate_key(v);
            self.frontier.add(FrontierEntry {
                vertex: v.clone(),
                key,
            });
        }
        Ok(())
    }

    /// Expand frontier vertices until the start's estimates agree and
    /// no frontier key is smaller than the start's.
    ///
    /// Returns false iff the frontier drained while the start was
    /// still inconsistent, which cannot happen under a consistent
    /// heuristic.
    fn compute_shortest_path(&mut self) -> Result<bool> {
        let mut expansions = 0usize;

        loop {
            let start_key = self.calculate_key(&self.start);
            let start_inconsistent = self.g(&self.start) != self.rhs(&self.start);

            let top = match self.frontier.peek() {
                Some(entry) => entry.clone(),
                None => {
                    trace!("[DStar] settled after {} expansions (frontier empty)", expansions);
                    return Ok(!start_inconsistent);
                }
            };

            if top.key >= start_key && !start_inconsistent {
                trace!("[DStar] settled after {} expansions", expansions);
                return Ok(true);
            }

            if self.cancel.is_cancelled() {
                debug!(
                    "[DStar] cancelled after {} expansions, {} frontier vertices pending",
                    expansions,
                    self.frontier.len()
                );
                return Ok(true);
            }

            // Keys computed before a start move are conservative;
            // refresh the top lazily rather than re-keying the heap.
            let fresh_key = self.calculate_key(&top.vertex);
            if top.key < fresh_key {
                self.frontier.poll();
                self.frontier.add(FrontierEntry {
                    vertex: top.vertex,
                    key: fresh_key,
                });
                continue;
            }

            self.frontier.poll();
            expansions += 1;
            let u = top.vertex;
            let g_u = self.g(&u);
            let rhs_u = self.rhs(&u);

            if g_u > rhs_u {
                // Overconsistent: the lookahead found a better route;
                // confirm it and let the predecessors see it.
                self.set_g(&u, rhs_u);
                for pred in self.space.predecessors(&u) {
                    self.update_vertex(&pred)?;
                }
            } else {
                // Underconsistent: the confirmed value is too
                // optimistic; retract it and re-expand.
                self.set_g(&u, Cost::INFINITY);
                for pred in self.space.predecessors(&u) {
                    self.update_vertex(&pred)?;
                }
                self.update_vertex(&u)?;
            }
        }
    }

    /// Walk forward from the start, taking greedy minimum-cost edges.
    ///
    /// Reconstructs an optimal path without parent pointers. Ties
    /// break deterministically on the space's successor order.
    fn extract_path(&self) -> Vec<S::Vertex> {
        if self.g(&self.start).is_infinite() {
            debug!("[DStar] no path, goal unreachable from start");
            return Vec::new();
        }

        let mut path = vec![self.start.clone()];
        let mut current = self.start.clone();

        // A loop-free optimal path cannot visit more vertices than
        // the planner has touched; hitting the cap means the caller's
        // heuristic or cost oracle broke the contract.
        let max_steps = self.records.len() + 1;
        let mut steps = 0;

        while current != self.goal {
            if steps >= max_steps {
                warn!(
                    "[DStar] path walk did not reach the goal within {} steps, \
                     reporting no path",
                    max_steps
                );
                return Vec::new();
            }
            steps += 1;

            let mut best: Option<S::Vertex> = None;
            let mut best_total = Cost::INFINITY;
            for succ in self.space.successors(&current) {
                let total = self.space.cost(&current, &succ) + self.g(&succ);
                if total < best_total {
                    best_total = total;
                    best = Some(succ);
                }
            }

            match best {
                Some(next) => {
                    path.push(next.clone());
                    current = next;
                }
                None => {
                    warn!("[DStar] dead end during path walk, reporting no path");
                    return Vec::new();
                }
            }
        }

        path
    }

    fn calculate_key(&self, v: &S::Vertex) -> SearchKey {
        let best = self.g(v).min(self.rhs(v));
        SearchKey::new(
            best + self.space.heuristic(&self.start, v) + self.key_offset,
            best,
        )
    }

    /// A frontier entry usable for lookups; the key is ignored by
    /// equality and hashing.
    fn probe(v: &S::Vertex) -> FrontierEntry<S::Vertex> {
        FrontierEntry {
            vertex: v.clone(),
            key: SearchKey::new(0.0, 0.0),
        }
    }

    fn set_g(&mut self, v: &S::Vertex, g: Cost) {
        match self.records.get_mut(v) {
            Some(record) => record.g = g,
            None => {
                if g.is_finite() {
                    self.records.insert(
                        v.clone(),
                        VertexRecord {
                            g,
                            rhs: Cost::INFINITY,
                        },
                    );
                }
            }
        }
    }

    fn set_rhs(&mut self, v: &S::Vertex, rhs: Cost) {
        match self.records.get_mut(v) {
            Some(record) => record.rhs = rhs,
            None => {
                if rhs.is_finite() {
                    self.records.insert(
                        v.clone(),
                        VertexRecord {
                            g: Cost::INFINITY,
                            rhs,
                        },
                    );
                }
            }
        }
    }

    /// Debug-only estimate diagnostics. Violations indicate a broken
    /// heuristic or an unflagged mutation; they are logged, never
    /// fatal.
    #[cfg(debug_assertions)]
    fn check_estimates(&self) {
        if self.rhs(&self.goal) != 0.0 {
            warn!("[DStar] goal lookahead drifted from zero");
        }
        for (v, record) in &self.records {
            let on_frontier = self.frontier.contains(&Self::probe(v));
            if on_frontier != (record.g != record.rhs) {
                warn!("[DStar] frontier membership out of sync with estimates");
            }
        }
    }
}
