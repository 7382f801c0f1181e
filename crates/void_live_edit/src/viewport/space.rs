//! World/local space conversion for parented entities.
//!
//! Entity transforms are stored relative to the parent. Anything expressed in
//! world space (camera poses, world-axis keyboard deltas) has to go through
//! these helpers before it is written, or a parented entity ends up offset by
//! its parent's transform.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use void_scene::Transform;

/// How a camera rotation is mapped onto an entity when aligning with the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignMode {
    /// Entity looks exactly where the camera looks
    #[default]
    Standard,
    /// For models authored facing +Z: pitch is mirrored and yaw turned by 180 degrees
    ReversedForward,
}

/// Map a world-space point into the local space of `parent_world`.
pub fn world_to_local(parent_world: &Transform, world_position: Vec3) -> Vec3 {
    parent_world
        .to_matrix()
        .inverse()
        .transform_point3(world_position)
}

/// World transform of a child with `local` under `parent_world` (root-level if `None`).
pub fn local_to_world(parent_world: Option<&Transform>, local: &Transform) -> Transform {
    match parent_world {
        Some(parent) => parent.mul_transform(local),
        None => *local,
    }
}

/// Rotation that produces `world_rotation` once composed under `parent_world`.
pub fn world_rotation_to_local(parent_world: Option<&Transform>, world_rotation: Quat) -> Quat {
    match parent_world {
        Some(parent) => (parent.rotation.inverse() * world_rotation).normalize(),
        None => world_rotation,
    }
}

/// Local position and rotation that place a child at the given world pose.
///
/// Root-level entities (`parent_world == None`) pass straight through.
pub fn calculate_local_transform(
    parent_world: Option<&Transform>,
    world_position: Vec3,
    world_rotation: Quat,
) -> (Vec3, Quat) {
    match parent_world {
        Some(parent) => (
            parent.inverse_transform_point(world_position),
            world_rotation_to_local(Some(parent), world_rotation),
        ),
        None => (world_position, world_rotation),
    }
}

/// Rotation an entity should take to match the camera under `mode`.
pub fn view_rotation(camera_rotation: Quat, mode: AlignMode) -> Quat {
    match mode {
        AlignMode::Standard => camera_rotation,
        AlignMode::ReversedForward => {
            let euler = Transform::IDENTITY.with_rotation(camera_rotation).euler_degrees();
            Transform::rotation_from_euler_degrees(Vec3::new(-euler.x, euler.y + 180.0, euler.z))
        }
    }
}
