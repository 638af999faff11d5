//! Error types for marga-plan.

use thiserror::Error;

/// Planning error type.
///
/// `NoPath` is deliberately absent: an unreachable goal is a normal
/// outcome and is reported as an empty path, not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// An edge cost below zero was observed. Costs must be
    /// nonnegative; infinity marks a missing edge.
    #[error("negative edge cost {cost} (costs must be nonnegative)")]
    NegativeEdgeCost {
        /// The offending cost value.
        cost: f32,
    },

    /// `update` was called for a payload that is not in the queue.
    #[error("attempted to update an entry that is not in the queue")]
    UnknownQueueEntry,

    /// A start or goal coordinate lies outside the grid.
    #[error("coordinate is outside the grid bounds")]
    OutOfBounds,

    /// A vertex id does not exist in the graph.
    #[error("vertex {0} does not exist in the graph")]
    UnknownVertex(usize),

    /// A search gave up after expanding too many vertices.
    #[error("expansion limit of {0} vertices exceeded")]
    ExpansionLimitExceeded(usize),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanningError>;
