//! Scene description files (TOML).
//!
//! ```toml
//! [scene]
//! name = "Workshop"
//!
//! [[entities]]
//! name = "Table"
//! [entities.transform]
//! position = [0.0, 0.0, -3.0]
//! rotation = [0.0, 45.0, 0.0]
//! scale = 1.5
//!
//! [[entities]]
//! name = "Lamp"
//! parent = "Table"
//! [entities.transform]
//! position = [0.4, 1.0, 0.0]
//! ```

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneFileError;
use crate::{EntityId, SceneGraph, Transform};

/// Scene file data structure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneData {
    pub scene: SceneMetadata,
    #[serde(default)]
    pub entities: Vec<EntityData>,
}

/// Scene metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
}

/// Entity data for serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityData {
    pub name: String,
    /// Name of an entity declared earlier in the file
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub transform: TransformData,
}

/// Transform data for serialization. Rotation is Euler degrees (pitch, yaw, roll).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransformData {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: ScaleData,
}

impl Default for TransformData {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
        }
    }
}

fn default_scale() -> ScaleData {
    ScaleData::Uniform(1.0)
}

/// Scale can be uniform or per-axis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleData {
    Uniform(f32),
    PerAxis([f32; 3]),
}

impl ScaleData {
    pub fn to_vec3(&self) -> Vec3 {
        match self {
            ScaleData::Uniform(s) => Vec3::splat(*s),
            ScaleData::PerAxis(arr) => Vec3::from_array(*arr),
        }
    }
}

impl From<&TransformData> for Transform {
    fn from(data: &TransformData) -> Self {
        Transform::from_position(Vec3::from_array(data.position))
            .with_euler_degrees(Vec3::from_array(data.rotation))
            .with_scale(data.scale.to_vec3())
    }
}

/// A parsed scene file ready to be instantiated.
pub struct SceneFile {
    pub data: SceneData,
}

impl SceneFile {
    pub fn from_toml_str(content: &str) -> Result<Self, SceneFileError> {
        let data: SceneData = toml::from_str(content)?;
        Ok(Self { data })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneFileError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let file = Self::from_toml_str(&content)?;
        log::info!(
            target: "void_scene",
            "Loaded scene '{}' ({} entities) from {:?}",
            file.data.scene.name,
            file.data.entities.len(),
            path.as_ref()
        );
        Ok(file)
    }

    /// Build a fresh scene graph from the file.
    ///
    /// Parents are resolved by name against entities declared earlier in the file.
    pub fn instantiate(&self) -> Result<SceneGraph, SceneFileError> {
        let mut scene = SceneGraph::new();
        let mut by_name: HashMap<&str, EntityId> = HashMap::new();

        for entity in &self.data.entities {
            let transform = Transform::from(&entity.transform);
            let id = match &entity.parent {
                Some(parent_name) => {
                    let parent = by_name.get(parent_name.as_str()).copied().ok_or_else(|| {
                        SceneFileError::UnknownParent {
                            entity: entity.name.clone(),
                            parent: parent_name.clone(),
                        }
                    })?;
                    scene.spawn_child(parent, entity.name.clone(), transform)?
                }
                None => scene.spawn(entity.name.clone(), transform)?,
            };
            by_name.entry(entity.name.as_str()).or_insert(id);
        }

        Ok(scene)
    }
}
