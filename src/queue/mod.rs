//! Keyed priority queue with by-value element lookup.
//!
//! A plain binary heap cannot re-sort or delete an arbitrary element
//! without a linear scan, which rules it out for frontier maintenance
//! in incremental planners. The queue here keeps a side index from
//! payload to heap slot so membership tests are O(1) and targeted
//! update/removal are O(log n).

mod indexed;

pub use indexed::{Comparator, IndexedPriorityQueue, NaturalOrder};
