//! The search-space oracle: the planner's read-only view of a graph.
//!
//! Planners in this crate never own or mutate the world they search.
//! They pull successors, predecessors, edge costs, and a goal-directed
//! heuristic through the [`SearchSpace`] trait, and the surrounding
//! program announces mutations out-of-band (see
//! [`DStarPlanner::flag_cost_change`](crate::dstar::DStarPlanner::flag_cost_change)).

use std::hash::Hash;

/// Traversal cost. `f32::INFINITY` marks a missing or untraversable
/// edge; all finite costs must be nonnegative.
pub type Cost = f32;

/// A directed, weighted search space with a goal-directed heuristic.
///
/// Implementations must satisfy the standard contracts:
///
/// - `cost(u, v)` is nonnegative, `INFINITY` for non-adjacent pairs;
/// - `heuristic(a, a) == 0.0` and
///   `heuristic(a, b) <= cost(a, c) + heuristic(c, b)` for every
///   neighbor `c` of `a` (admissible and consistent).
///
/// An inconsistent heuristic costs optimality, not safety: planners
/// detect the symptom, log it, and report no path.
///
/// For undirected spaces, mirror `successors` in `predecessors`.
pub trait SearchSpace {
    /// Vertex identity. The planner stores copies as map keys and
    /// queue payloads only.
    type Vertex: Clone + Eq + Hash;

    /// Directed out-neighbors of `v`. Must be finite.
    fn successors(&self, v: &Self::Vertex) -> Vec<Self::Vertex>;

    /// Directed in-neighbors of `v`. Must be finite.
    fn predecessors(&self, v: &Self::Vertex) -> Vec<Self::Vertex>;

    /// Edge cost from `from` to `to`, `INFINITY` when not adjacent.
    fn cost(&self, from: &Self::Vertex, to: &Self::Vertex) -> Cost;

    /// Lower bound on the true distance from `from` to `to`.
    ///
    /// Defaults to zero, which degrades informed searches to
    /// uniform-cost behavior but is always admissible.
    fn heuristic(&self, from: &Self::Vertex, to: &Self::Vertex) -> Cost {
        let _ = (from, to);
        0.0
    }
}
