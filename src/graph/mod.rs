//! Generic graph planning.
//!
//! Adapts an adjacency-list weighted digraph to the
//! [`SearchSpace`](crate::space::SearchSpace) oracle. Vertices are
//! dense `usize` ids. The heuristic is supplied by the caller and
//! defaults to zero, which degrades the planners to uniform-cost
//! search but keeps them correct on any graph.

use log::trace;

use crate::dstar::DStarPlanner;
use crate::error::{PlanningError, Result};
use crate::space::{Cost, SearchSpace};

/// A directed graph with nonnegative edge weights.
///
/// Successor lists store `(target, weight)`; predecessor lists store
/// only ids and weights are looked up on the forward edge, so the two
/// views cannot drift apart. For an undirected graph, add each edge
/// in both directions.
#[derive(Clone, Debug, Default)]
pub struct WeightedDigraph {
    out_edges: Vec<Vec<(usize, Cost)>>,
    in_edges: Vec<Vec<usize>>,
}

impl WeightedDigraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with `n` isolated vertices.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            out_edges: vec![Vec::new(); n],
            in_edges: vec![Vec::new(); n],
        }
    }

    /// Add a vertex and return its id.
    pub fn add_vertex(&mut self) -> usize {
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        self.out_edges.len() - 1
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    /// True iff `v` is a vertex of this graph.
    pub fn contains_vertex(&self, v: usize) -> bool {
        v < self.out_edges.len()
    }

    /// Insert the edge `from -> to` with the given weight, replacing
    /// any existing weight.
    ///
    /// An infinite weight is legal and marks the edge untraversable
    /// without removing it.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Cost) -> Result<()> {
        for v in [from, to] {
            if !self.contains_vertex(v) {
                return Err(PlanningError::UnknownVertex(v));
            }
        }
        if weight < 0.0 {
            return Err(PlanningError::NegativeEdgeCost { cost: weight });
        }

        match self.out_edges[from].iter_mut().find(|(t, _)| *t == to) {
            Some((_, w)) => *w = weight,
            None => {
                self.out_edges[from].push((to, weight));
                self.in_edges[to].push(from);
            }
        }
        Ok(())
    }

    /// Weight of the edge `from -> to`, `None` when absent.
    pub fn edge_weight(&self, from: usize, to: usize) -> Option<Cost> {
        self.out_edges
            .get(from)?
            .iter()
            .find(|(t, _)| *t == to)
            .map(|(_, w)| *w)
    }

    /// Out-neighbors of `v` with their edge weights.
    pub fn out_neighbors(&self, v: usize) -> &[(usize, Cost)] {
        &self.out_edges[v]
    }

    /// In-neighbors of `v`.
    pub fn in_neighbors(&self, v: usize) -> &[usize] {
        &self.in_edges[v]
    }
}

fn zero_heuristic(_: &usize, _: &usize) -> Cost {
    0.0
}

/// A [`WeightedDigraph`] viewed as a search space.
#[derive(Clone, Debug)]
pub struct GraphSpace<H = fn(&usize, &usize) -> Cost> {
    graph: WeightedDigraph,
    heuristic: H,
}

impl GraphSpace {
    /// Wrap a graph with the zero heuristic (uniform-cost search).
    pub fn new(graph: WeightedDigraph) -> Self {
        Self {
            graph,
            heuristic: zero_heuristic,
        }
    }
}

impl<H> GraphSpace<H>
where
    H: Fn(&usize, &usize) -> Cost,
{
    /// Wrap a graph with a caller-supplied heuristic.
    ///
    /// The heuristic must be admissible and consistent for the
    /// planners to stay optimal.
    pub fn with_heuristic(graph: WeightedDigraph, heuristic: H) -> Self {
        Self { graph, heuristic }
    }

    /// The underlying graph.
    pub fn graph(&self) -> &WeightedDigraph {
        &self.graph
    }

    fn graph_mut(&mut self) -> &mut WeightedDigraph {
        &mut self.graph
    }
}

impl<H> SearchSpace for GraphSpace<H>
where
    H: Fn(&usize, &usize) -> Cost,
{
    type Vertex = usize;

    fn successors(&self, v: &usize) -> Vec<usize> {
        self.graph.out_neighbors(*v).iter().map(|(t, _)| *t).collect()
    }

    fn predecessors(&self, v: &usize) -> Vec<usize> {
        self.graph.in_neighbors(*v).to_vec()
    }

    fn cost(&self, from: &usize, to: &usize) -> Cost {
        self.graph
            .edge_weight(*from, *to)
            .unwrap_or(Cost::INFINITY)
    }

    fn heuristic(&self, from: &usize, to: &usize) -> Cost {
        (self.heuristic)(from, to)
    }
}

/// Incremental replanner over a weighted digraph.
///
/// Owns the graph and keeps the estimates synchronized:
/// [`set_edge_weight`](Self::set_edge_weight) records the old weight,
/// applies the mutation, and flags the delta for the next plan.
pub struct GraphPlanner<H = fn(&usize, &usize) -> Cost>
where
    H: Fn(&usize, &usize) -> Cost,
{
    engine: DStarPlanner<GraphSpace<H>>,
}

impl GraphPlanner {
    /// Create a planner with the zero heuristic.
    pub fn new(graph: WeightedDigraph, start: usize, goal: usize) -> Result<Self> {
        Self::with_space(GraphSpace::new(graph), start, goal)
    }
}

impl<H> GraphPlanner<H>
where
    H: Fn(&usize, &usize) -> Cost,
{
    /// Create a planner with a caller-supplied heuristic.
    pub fn with_heuristic(
        graph: WeightedDigraph,
        heuristic: H,
        start: usize,
        goal: usize,
    ) -> Result<Self> {
        Self::with_space(GraphSpace::with_heuristic(graph, heuristic), start, goal)
    }

    fn with_space(space: GraphSpace<H>, start: usize, goal: usize) -> Result<Self> {
        for v in [start, goal] {
            if !space.graph().contains_vertex(v) {
                return Err(PlanningError::UnknownVertex(v));
            }
        }
        Ok(Self {
            engine: DStarPlanner::new(space, start, goal),
        })
    }

    /// Current start vertex.
    pub fn start(&self) -> usize {
        *self.engine.start()
    }

    /// Goal vertex.
    pub fn goal(&self) -> usize {
        *self.engine.goal()
    }

    /// The underlying graph.
    pub fn graph(&self) -> &WeightedDigraph {
        self.engine.space().graph()
    }

    /// The underlying replanner, for estimate diagnostics.
    pub fn engine(&self) -> &DStarPlanner<GraphSpace<H>> {
        &self.engine
    }

    /// Plan a path from the current start to the goal.
    ///
    /// Empty when the goal is unreachable.
    pub fn plan(&mut self) -> Result<Vec<usize>> {
        self.engine.plan()
    }

    /// Move the start vertex (the agent moved).
    pub fn set_start(&mut self, start: usize) -> Result<()> {
        if !self.graph().contains_vertex(start) {
            return Err(PlanningError::UnknownVertex(start));
        }
        self.engine.update_start(start);
        Ok(())
    }

    /// Change (or create) the edge `from -> to` and flag the delta.
    ///
    /// An infinite weight marks the edge untraversable.
    pub fn set_edge_weight(&mut self, from: usize, to: usize, weight: Cost) -> Result<()> {
        let old = self
            .graph()
            .edge_weight(from, to)
            .unwrap_or(Cost::INFINITY);
        self.engine
            .space_mut()
            .graph_mut()
            .add_edge(from, to, weight)?;
        trace!("[Graph] edge {} -> {} weight {} -> {}", from, to, old, weight);
        self.engine.flag_cost_change(from, to, old, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two routes from 0 to 3: over 1 (cost 4) and over 2 (cost 6).
    fn two_route_graph() -> WeightedDigraph {
        let mut graph = WeightedDigraph::with_vertices(4);
        graph.add_edge(0, 1, 2.0).unwrap();
        graph.add_edge(1, 3, 2.0).unwrap();
        graph.add_edge(0, 2, 3.0).unwrap();
        graph.add_edge(2, 3, 3.0).unwrap();
        graph
    }

    #[test]
    fn test_add_edge_and_lookup() {
        let graph = two_route_graph();
        assert_eq!(graph.edge_weight(0, 1), Some(2.0));
        assert_eq!(graph.edge_weight(1, 0), None);
        assert_eq!(graph.in_neighbors(3), &[1, 2]);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = WeightedDigraph::with_vertices(2);
        assert!(matches!(
            graph.add_edge(0, 1, -1.0),
            Err(PlanningError::NegativeEdgeCost { .. })
        ));
    }

    #[test]
    fn test_plan_picks_cheaper_route() {
        let mut planner = GraphPlanner::new(two_route_graph(), 0, 3).unwrap();
        assert_eq!(planner.plan().unwrap(), vec![0, 1, 3]);
        assert_eq!(planner.engine().g(&0), 4.0);
    }

    #[test]
    fn test_weight_increase_switches_route() {
        let mut planner = GraphPlanner::new(two_route_graph(), 0, 3).unwrap();
        planner.plan().unwrap();

        planner.set_edge_weight(1, 3, 10.0).unwrap();
        assert_eq!(planner.plan().unwrap(), vec![0, 2, 3]);
        assert_eq!(planner.engine().g(&0), 6.0);
    }

    #[test]
    fn test_blocking_every_route_yields_no_path() {
        let mut planner = GraphPlanner::new(two_route_graph(), 0, 3).unwrap();
        planner.plan().unwrap();

        planner.set_edge_weight(1, 3, Cost::INFINITY).unwrap();
        planner.set_edge_weight(2, 3, Cost::INFINITY).unwrap();
        assert!(planner.plan().unwrap().is_empty());
    }

    #[test]
    fn test_caller_heuristic() {
        // Vertex ids happen to encode position on a line.
        let mut graph = WeightedDigraph::with_vertices(5);
        for v in 0..4 {
            graph.add_edge(v, v + 1, 1.0).unwrap();
            graph.add_edge(v + 1, v, 1.0).unwrap();
        }

        let mut planner =
            GraphPlanner::with_heuristic(graph, |a, b| a.abs_diff(*b) as Cost, 0, 4).unwrap();
        assert_eq!(planner.plan().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_vertex_rejected() {
        let result = GraphPlanner::new(two_route_graph(), 0, 9);
        assert!(matches!(result, Err(PlanningError::UnknownVertex(9))));
    }
}
