//! # void_scene - Live Scene Graph
//!
//! The runtime scene the editor manipulates while the simulation runs:
//! - **Generational handles**: `EntityId` detects use-after-destroy
//! - **Hierarchy**: parent/child links with local transforms
//! - **World transforms**: composed on demand up the parent chain
//! - **Scene files**: TOML descriptions loaded into a fresh graph
//!
//! Entities are owned by the [`SceneGraph`]. Everything outside it refers to
//! them through [`EntityId`] and must expect the handle to go stale.

pub mod error;
pub mod graph;
pub mod handle;
pub mod serializer;
pub mod transform;

pub use error::{SceneError, SceneFileError};
pub use graph::{SceneEntity, SceneGraph};
pub use handle::EntityId;
pub use serializer::{EntityData, SceneData, SceneFile, SceneMetadata, TransformData};
pub use transform::Transform;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::graph::{SceneEntity, SceneGraph};
    pub use crate::handle::EntityId;
    pub use crate::transform::Transform;
    pub use glam::{Quat, Vec3};
}
