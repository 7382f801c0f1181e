//! Error types for the scene graph

use thiserror::Error;

use crate::EntityId;

/// Scene graph errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Handle is null, stale, or was never issued
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    /// Parenting would make an entity its own ancestor
    #[error("Parenting {child} under {parent} would create a cycle")]
    HierarchyCycle { child: EntityId, parent: EntityId },

    /// Every slot index is in use or retired
    #[error("Scene entity arena exhausted")]
    ArenaExhausted,
}

/// Scene file loading errors
#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parent name does not match an entity declared earlier in the file
    #[error("Entity '{entity}' references unknown parent '{parent}'")]
    UnknownParent { entity: String, parent: String },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for scene graph operations
pub type Result<T> = std::result::Result<T, SceneError>;
