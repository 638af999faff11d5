//! # Marga-Plan
//!
//! Incremental path planning for indoor robots: D* Lite replanning
//! over byte grids and weighted graphs.
//!
//! ## Overview
//!
//! A robot that replans while it drives cannot afford to search from
//! scratch every cycle. This crate keeps a goal-rooted estimate tree
//! alive across queries: when the map changes near the robot or the
//! robot itself moves, the next plan repairs only the invalidated
//! region and the cost of a replan scales with the local change, not
//! with the map size.
//!
//! ## Features
//!
//! - **Incremental replanning**: [`DStarPlanner`] maintains confirmed
//!   and lookahead cost-to-goal estimates per vertex and a frontier
//!   queue of disagreements
//! - **Cheap start moves**: a key-offset accumulator absorbs start
//!   drift without re-keying the frontier
//! - **Batched world updates**: a thread-safe [`ChangeLog`] collects
//!   edge-cost deltas between plan cycles
//! - **Two front-ends**: N-dimensional byte grids ([`GridPlanner`])
//!   and adjacency-list digraphs ([`GraphPlanner`])
//! - **Reference one-shot search**: [`AStarSearch`] over the same
//!   oracle, for static spaces and cross-checking
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_plan::{DenseGrid, GridCoord, GridPlanner, OBSTACLE};
//!
//! // A 10 x 10 free grid.
//! let grid = DenseGrid::new(&[10, 10]);
//! let mut planner =
//!     GridPlanner::new(grid, GridCoord::xy(0, 0), GridCoord::xy(9, 9)).unwrap();
//!
//! let path = planner.plan().unwrap();
//! assert_eq!(path.len(), 19);
//!
//! // A wall appears; only the affected region is repaired.
//! planner.set_cell_cost(&GridCoord::xy(5, 5), OBSTACLE).unwrap();
//! let path = planner.plan().unwrap();
//! assert!(!path.contains(&GridCoord::xy(5, 5)));
//! ```
//!
//! ## Architecture
//!
//! - [`space`]: the [`SearchSpace`] oracle planners read the world
//!   through
//! - [`queue`]: indexed priority queue with O(log n) update/removal
//! - [`dstar`]: the incremental replanner core
//! - [`astar`]: one-shot reference search
//! - [`grid`] / [`graph`]: front-ends binding the core to concrete
//!   world representations
//! - [`config`]: TOML-loadable tuning parameters
//!
//! The planners never own a logger; they emit through the `log`
//! facade and inherit whatever the application installs.

#![warn(missing_docs)]

pub mod astar;
pub mod config;
pub mod core;
pub mod dstar;
pub mod error;
pub mod graph;
pub mod grid;
pub mod queue;
pub mod space;

pub use crate::core::GridCoord;
pub use astar::{AStarConfig, AStarSearch};
pub use config::{ConfigError, PlanConfig};
pub use dstar::{CancelToken, ChangeLog, DStarPlanner, EdgeChange, SearchKey};
pub use error::{PlanningError, Result};
pub use graph::{GraphPlanner, GraphSpace, WeightedDigraph};
pub use grid::{random_maze_2d, DenseGrid, GridCostConfig, GridPlanner, GridSpace, OBSTACLE};
pub use queue::{Comparator, IndexedPriorityQueue, NaturalOrder};
pub use space::{Cost, SearchSpace};
