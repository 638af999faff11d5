//! Incremental shortest-path replanning (D* Lite).
//!
//! A one-shot search throws its work away every time the world
//! changes. For a robot that replans every few hundred milliseconds
//! while its map is still being built, that is the wrong trade: the
//! map mostly changes near the robot, and the optimal path mostly
//! survives. The planner here maintains a goal-rooted estimate tree
//! across queries, so the cost of a replan scales with how much the
//! world changed, not with how big it is.
//!
//! The module provides:
//!
//! - [`DStarPlanner`] - the replanner itself, generic over any
//!   [`SearchSpace`](crate::space::SearchSpace)
//! - [`ChangeLog`] / [`EdgeChange`] - the thread-safe edge-delta feed
//!   that sensor threads append to between plan cycles
//! - [`SearchKey`] - the composite frontier ordering key
//! - [`CancelToken`] - cooperative cancellation of a running plan
//!
//! Grid and graph front-ends live in [`crate::grid`] and
//! [`crate::graph`].

mod change_log;
mod key;
mod planner;

pub use change_log::{ChangeLog, EdgeChange};
pub use key::SearchKey;
pub use planner::{CancelToken, DStarPlanner};
