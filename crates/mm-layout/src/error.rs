//! Error types for layout runs.
//!
//! Unknown structures, bad dimensions and collapsed topics with children
//! are handled by fallbacks and never surface here. What remains are the
//! structural faults the engine cannot lay out at all.

use mm_core::TopicId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("topic {id} is reachable more than once (cycle or shared child)")]
    Cycle { id: TopicId },

    #[error("topic {id} is nested {depth} levels deep, past the configured maximum")]
    MaxDepthExceeded { id: TopicId, depth: usize },

    #[error("no topic at index {0} to lay out")]
    UnknownRoot(usize),
}
