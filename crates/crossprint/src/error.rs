//! Error types for the print surface and controller

use dom::DomError;
use thiserror::Error;

/// Failure reported by the host environment for a single operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Surface has no browsing context")]
    NoBrowsingContext,

    #[error("Document has no font registry")]
    NoFontRegistry,

    #[error("Host rejected the operation: {0}")]
    Rejected(String),
}

/// The surface's content document cannot be reached (removed or inaccessible)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Print surface {} is unreachable", .surface.as_deref().unwrap_or("<unnamed>"))]
pub struct Unreachable {
    pub surface: Option<String>,
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error(transparent)]
    Unreachable(#[from] Unreachable),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PrintError>;
