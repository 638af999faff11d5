//! Grid search-space oracle.

use crate::core::GridCoord;
use crate::space::{Cost, SearchSpace};

use super::config::GridCostConfig;
use super::map::DenseGrid;

/// A [`DenseGrid`] viewed as a search space.
///
/// Neighbors are the 2N cardinal offsets, clipped to the grid bounds;
/// the world outside the grid is untraversable. Movement is
/// symmetric, so successors and predecessors coincide.
#[derive(Clone, Debug)]
pub struct GridSpace {
    grid: DenseGrid,
    config: GridCostConfig,
}

impl GridSpace {
    /// Wrap a grid with the default cost model.
    pub fn new(grid: DenseGrid) -> Self {
        Self::with_config(grid, GridCostConfig::default())
    }

    /// Wrap a grid with an explicit cost model.
    pub fn with_config(grid: DenseGrid, config: GridCostConfig) -> Self {
        Self { grid, config }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &DenseGrid {
        &self.grid
    }

    /// Mutable access to the underlying grid.
    pub(crate) fn grid_mut(&mut self) -> &mut DenseGrid {
        &mut self.grid
    }

    /// The cost model parameters.
    pub fn config(&self) -> &GridCostConfig {
        &self.config
    }

    /// Traversal cost of a single cell, `None` when the cell is
    /// blocked or out of bounds.
    fn cell_cost(&self, coord: &GridCoord) -> Option<Cost> {
        match self.grid.get(coord) {
            Some(value) if value < self.config.obstacle_threshold => Some(value as Cost),
            _ => None,
        }
    }

    /// The 2N cardinal neighbors of `coord` that lie inside the grid.
    fn neighbors(&self, coord: &GridCoord) -> Vec<GridCoord> {
        let mut out = Vec::with_capacity(2 * coord.dims());
        for dim in 0..coord.dims() {
            for delta in [1, -1] {
                let neighbor = coord.offset(dim, delta);
                if self.grid.in_bounds(&neighbor) {
                    out.push(neighbor);
                }
            }
        }
        out
    }
}

impl SearchSpace for GridSpace {
    type Vertex = GridCoord;

    fn successors(&self, v: &GridCoord) -> Vec<GridCoord> {
        self.neighbors(v)
    }

    fn predecessors(&self, v: &GridCoord) -> Vec<GridCoord> {
        self.neighbors(v)
    }

    fn cost(&self, from: &GridCoord, to: &GridCoord) -> Cost {
        if from.manhattan(to) != 1.0 {
            return Cost::INFINITY;
        }
        match (self.cell_cost(from), self.cell_cost(to)) {
            (Some(a), Some(b)) => (a + b) / 2.0 + self.config.traversal_offset,
            _ => Cost::INFINITY,
        }
    }

    fn heuristic(&self, from: &GridCoord, to: &GridCoord) -> Cost {
        from.manhattan(to)
    }
}
