//! Error types for DOM operations

use crate::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    #[error("Invalid modification: {0}")]
    InvalidModification(String),

    #[error("Print failed: {0}")]
    PrintFailed(String),
}

pub type Result<T> = std::result::Result<T, DomError>;
