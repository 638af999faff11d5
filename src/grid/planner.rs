//! Incremental replanning on a byte grid.

use log::trace;

use crate::core::GridCoord;
use crate::dstar::{CancelToken, ChangeLog, DStarPlanner};
use crate::error::{PlanningError, Result};
use crate::space::{Cost, SearchSpace};

use super::config::GridCostConfig;
use super::map::DenseGrid;
use super::space::GridSpace;

/// Incremental grid planner.
///
/// Owns the grid together with a [`DStarPlanner`] over it and keeps
/// the two synchronized: [`set_cell_cost`](Self::set_cell_cost)
/// records the affected edge costs before and after the mutation and
/// flags them, so the next [`plan`](Self::plan) repairs exactly the
/// invalidated region.
pub struct GridPlanner {
    engine: DStarPlanner<GridSpace>,
}

impl GridPlanner {
    /// Create a planner over `grid` with the default cost model.
    pub fn new(grid: DenseGrid, start: GridCoord, goal: GridCoord) -> Result<Self> {
        Self::with_config(grid, GridCostConfig::default(), start, goal)
    }

    /// Create a planner with an explicit cost model.
    ///
    /// Fails with [`PlanningError::OutOfBounds`] when the start or
    /// goal lies outside the grid.
    pub fn with_config(
        grid: DenseGrid,
        config: GridCostConfig,
        start: GridCoord,
        goal: GridCoord,
    ) -> Result<Self> {
        if !grid.in_bounds(&start) || !grid.in_bounds(&goal) {
            return Err(PlanningError::OutOfBounds);
        }
        let space = GridSpace::with_config(grid, config);
        Ok(Self {
            engine: DStarPlanner::new(space, start, goal),
        })
    }

    /// Current start cell.
    pub fn start(&self) -> &GridCoord {
        self.engine.start()
    }

    /// Goal cell.
    pub fn goal(&self) -> &GridCoord {
        self.engine.goal()
    }

    /// The underlying grid.
    pub fn grid(&self) -> &DenseGrid {
        self.engine.space().grid()
    }

    /// The underlying replanner, for estimate diagnostics.
    pub fn engine(&self) -> &DStarPlanner<GridSpace> {
        &self.engine
    }

    /// A cloneable handle for flagging raw edge changes from other
    /// threads.
    pub fn change_feed(&self) -> ChangeLog<GridCoord> {
        self.engine.change_feed()
    }

    /// The planner's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.engine.cancel_token()
    }

    /// Plan a path from the current start to the goal.
    ///
    /// Empty when the goal is unreachable.
    pub fn plan(&mut self) -> Result<Vec<GridCoord>> {
        self.engine.plan()
    }

    /// Move the start cell (the robot moved).
    pub fn set_start(&mut self, start: GridCoord) -> Result<()> {
        if !self.grid().in_bounds(&start) {
            return Err(PlanningError::OutOfBounds);
        }
        self.engine.update_start(start);
        Ok(())
    }

    /// Change one cell's traversal cost and flag every affected edge.
    ///
    /// A cell value change touches the edges to and from each of its
    /// cardinal neighbors; their old costs are captured before the
    /// write and the deltas queued for the next plan cycle. Setting a
    /// cell to its current value is a no-op.
    pub fn set_cell_cost(&mut self, coord: &GridCoord, value: u8) -> Result<()> {
        let old_value = self
            .grid()
            .get(coord)
            .ok_or(PlanningError::OutOfBounds)?;
        if old_value == value {
            return Ok(());
        }

        // Capture the affected edge costs before the write. Grid
        // movement is symmetric, so predecessors and successors are
        // the same cells; the edge costs still change per direction.
        let space = self.engine.space();
        let neighbors = space.successors(coord);
        let old_in: Vec<(GridCoord, Cost)> = neighbors
            .iter()
            .map(|n| (n.clone(), space.cost(n, coord)))
            .collect();
        let old_out: Vec<(GridCoord, Cost)> = neighbors
            .iter()
            .map(|n| (n.clone(), space.cost(coord, n)))
            .collect();

        self.engine.space_mut().grid_mut().set(coord, value);
        trace!("[Grid] cell cost {} -> {} at {}", old_value, value, coord);

        let space = self.engine.space();
        for (neighbor, old_cost) in old_in {
            let new_cost = space.cost(&neighbor, coord);
            self.engine
                .flag_cost_change(neighbor, coord.clone(), old_cost, new_cost)?;
        }
        for (neighbor, old_cost) in old_out {
            let new_cost = space.cost(coord, &neighbor);
            self.engine
                .flag_cost_change(coord.clone(), neighbor, old_cost, new_cost)?;
        }
        Ok(())
    }
}
