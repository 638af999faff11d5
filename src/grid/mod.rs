//! Grid-world planning.
//!
//! Vertices are N-dimensional integer coordinates over a dense
//! byte-valued cost grid; movement is along the 2N cardinal
//! directions. The edge cost between adjacent cells `a` and `b` is
//! `(m(a) + m(b)) / 2 + offset` where `m` is the cell value, cells at
//! or above the obstacle threshold are untraversable, and the
//! heuristic is Manhattan distance.

mod config;
mod generator;
mod map;
mod planner;
mod space;

pub use config::GridCostConfig;
pub use generator::random_maze_2d;
pub use map::{DenseGrid, OBSTACLE};
pub use planner::GridPlanner;
pub use space::GridSpace;
