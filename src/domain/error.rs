//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::tree::NodeId;

/// Domain errors describe malformed tree assembly.
/// Traversal itself never fails at this layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("action node cannot have branches: {0:?}")]
    NotADecision(NodeId),

    #[error("cycle detected in decision tree at: {0:?}")]
    CycleDetected(NodeId),
}

/// Result type for tree assembly operations.
pub type DomainResult<T> = Result<T, DomainError>;
