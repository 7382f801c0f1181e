//! Error types for live editing

use thiserror::Error;
use void_scene::EntityId;

/// Live editing errors
#[derive(Debug, Error)]
pub enum EditError {
    /// Rejected input at construction time (e.g. a null entity handle)
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Entity handle no longer resolves in the scene
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for live editing operations
pub type Result<T> = std::result::Result<T, EditError>;
