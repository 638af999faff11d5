//! One-shot A* search.
//!
//! The reference planner for spaces that do not change between
//! queries. It shares the [`SearchSpace`](crate::space::SearchSpace)
//! oracle and the indexed queue with the incremental planner, so the
//! two are directly comparable: on a static space they return paths
//! of the same cost, and the incremental planner only pays off once
//! the space starts changing.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, Result};
use crate::queue::{Comparator, IndexedPriorityQueue};
use crate::space::{Cost, SearchSpace};

/// A* search configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AStarConfig {
    /// Maximum number of vertices to expand before giving up.
    ///
    /// Guards against runaway searches on very large or adversarial
    /// spaces; hitting the cap is reported as a typed error.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

fn default_max_expansions() -> usize {
    100_000
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_expansions: default_max_expansions(),
        }
    }
}

/// Open-set payload: a vertex and its current f-score.
#[derive(Clone, Debug)]
struct OpenEntry<V> {
    vertex: V,
    f: Cost,
}

impl<V: PartialEq> PartialEq for OpenEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertex == other.vertex
    }
}

impl<V: Eq> Eq for OpenEntry<V> {}

impl<V: Hash> Hash for OpenEntry<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertex.hash(state);
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FScoreOrder;

impl<V> Comparator<OpenEntry<V>> for FScoreOrder {
    fn compare(&self, a: &OpenEntry<V>, b: &OpenEntry<V>) -> Ordering {
        a.f.total_cmp(&b.f)
    }
}

/// One-shot A* planner over a borrowed search space.
pub struct AStarSearch<'a, S: SearchSpace> {
    space: &'a S,
    config: AStarConfig,
}

impl<'a, S: SearchSpace> AStarSearch<'a, S> {
    /// Create a searcher with an explicit configuration.
    pub fn new(space: &'a S, config: AStarConfig) -> Self {
        Self { space, config }
    }

    /// Create a searcher with the default configuration.
    pub fn with_defaults(space: &'a S) -> Self {
        Self::new(space, AStarConfig::default())
    }

    /// Find a minimum-cost path from `start` to `goal`.
    ///
    /// Returns an empty path when the goal is unreachable, and
    /// [`PlanningError::ExpansionLimitExceeded`] when the configured
    /// cap is hit first.
    pub fn search(&self, start: &S::Vertex, goal: &S::Vertex) -> Result<Vec<S::Vertex>> {
        let mut open = IndexedPriorityQueue::with_order(FScoreOrder);
        let mut closed: HashSet<S::Vertex> = HashSet::new();
        let mut g_scores: HashMap<S::Vertex, Cost> = HashMap::new();
        let mut came_from: HashMap<S::Vertex, S::Vertex> = HashMap::new();

        g_scores.insert(start.clone(), 0.0);
        open.add(OpenEntry {
            vertex: start.clone(),
            f: self.space.heuristic(start, goal),
        });

        let mut expansions = 0usize;

        while let Some(entry) = open.poll() {
            let current = entry.vertex;
            if current == *goal {
                trace!("[AStar] reached the goal after {} expansions", expansions);
                return Ok(self.reconstruct(&came_from, start, goal));
            }

            expansions += 1;
            if expansions > self.config.max_expansions {
                debug!(
                    "[AStar] gave up after {} expansions",
                    self.config.max_expansions
                );
                return Err(PlanningError::ExpansionLimitExceeded(
                    self.config.max_expansions,
                ));
            }

            closed.insert(current.clone());
            let current_g = g_scores[&current];

            for succ in self.space.successors(&current) {
                if closed.contains(&succ) {
                    continue;
                }

                let cost = self.space.cost(&current, &succ);
                if cost < 0.0 {
                    return Err(PlanningError::NegativeEdgeCost { cost });
                }
                let tentative = current_g + cost;
                if tentative.is_infinite() {
                    continue;
                }

                let known = g_scores.get(&succ).copied().unwrap_or(Cost::INFINITY);
                if tentative < known {
                    came_from.insert(succ.clone(), current.clone());
                    g_scores.insert(succ.clone(), tentative);

                    let h = self.space.heuristic(&succ, goal);
                    let candidate = OpenEntry {
                        vertex: succ,
                        f: tentative + h,
                    };
                    if open.contains(&candidate) {
                        // A cheaper route to an open vertex: re-sort
                        // in place instead of stacking duplicates.
                        open.update(candidate)?;
                    } else {
                        open.add(candidate);
                    }
                }
            }
        }

        debug!("[AStar] no path after {} expansions", expansions);
        Ok(Vec::new())
    }

    fn reconstruct(
        &self,
        came_from: &HashMap<S::Vertex, S::Vertex>,
        start: &S::Vertex,
        goal: &S::Vertex,
    ) -> Vec<S::Vertex> {
        let mut path = vec![goal.clone()];
        let mut current = goal.clone();
        while current != *start {
            match came_from.get(&current) {
                Some(prev) => {
                    path.push(prev.clone());
                    current = prev.clone();
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Five vertices in a ring with one expensive chord.
    struct RingSpace;

    impl SearchSpace for RingSpace {
        type Vertex = u8;

        fn successors(&self, v: &u8) -> Vec<u8> {
            match v {
                0 => vec![1, 4],
                1 => vec![0, 2],
                2 => vec![1, 3],
                3 => vec![2, 4],
                4 => vec![3, 0],
                _ => vec![],
            }
        }

        fn predecessors(&self, v: &u8) -> Vec<u8> {
            self.successors(v)
        }

        fn cost(&self, from: &u8, to: &u8) -> Cost {
            if self.successors(from).contains(to) {
                // The 0-4 chord is expensive in both directions.
                if (*from, *to) == (0, 4) || (*from, *to) == (4, 0) {
                    10.0
                } else {
                    1.0
                }
            } else {
                Cost::INFINITY
            }
        }
    }

    #[test]
    fn test_prefers_cheap_ring_over_chord() {
        let searcher = AStarSearch::with_defaults(&RingSpace);
        let path = searcher.search(&0, &4).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_start_equals_goal() {
        let searcher = AStarSearch::with_defaults(&RingSpace);
        assert_eq!(searcher.search(&2, &2).unwrap(), vec![2]);
    }

    #[test]
    fn test_unreachable_vertex() {
        let searcher = AStarSearch::with_defaults(&RingSpace);
        assert!(searcher.search(&0, &9).unwrap().is_empty());
    }

    #[test]
    fn test_expansion_limit() {
        let searcher = AStarSearch::new(&RingSpace, AStarConfig { max_expansions: 1 });
        let result = searcher.search(&0, &3);
        assert_eq!(result, Err(PlanningError::ExpansionLimitExceeded(1)));
    }
}
