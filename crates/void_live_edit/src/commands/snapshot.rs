//! Immutable transform captures.

use glam::{Quat, Vec3};
use void_scene::{EntityId, SceneGraph, Transform};

/// Copy of an entity's local position, rotation and scale at one moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl TransformSnapshot {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Capture the entity's current local transform, `None` if it was destroyed.
    pub fn capture(scene: &SceneGraph, entity: EntityId) -> Option<Self> {
        scene.local_transform(entity).map(Self::from)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Rotation as `(pitch, yaw, roll)` in degrees.
    pub fn euler_degrees(&self) -> Vec3 {
        self.to_transform().euler_degrees()
    }

    pub fn to_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.scale)
    }
}

impl From<Transform> for TransformSnapshot {
    fn from(t: Transform) -> Self {
        Self::new(t.position, t.rotation, t.scale)
    }
}

impl From<TransformSnapshot> for Transform {
    fn from(s: TransformSnapshot) -> Self {
        s.to_transform()
    }
}
