//! Error types for document edits and outline parsing.

use crate::id::TopicId;
use thiserror::Error;

/// A structural edit on a [`MindMap`](crate::model::MindMap) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MindMapError {
    #[error("topic {0} already exists")]
    DuplicateId(TopicId),

    #[error("topic {0} is not part of this map")]
    UnknownTopic(TopicId),

    #[error("no topic at index {0}")]
    UnknownIndex(usize),

    #[error("the root topic cannot be removed or moved")]
    RootImmutable,

    #[error("moving {child} under {new_parent} would make it its own ancestor")]
    WouldCycle { child: TopicId, new_parent: TopicId },
}

/// Outline notation could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("outline has no root topic")]
    MissingRoot,

    #[error("outline declares more than one root topic (second is {0})")]
    MultipleRoots(TopicId),

    #[error(transparent)]
    Model(#[from] MindMapError),
}
