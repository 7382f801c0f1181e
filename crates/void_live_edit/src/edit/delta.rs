//! Keyboard input to per-tick transform deltas.
//!
//! Deltas are world-space quantities: units for position, degrees
//! `(pitch, yaw, roll)` for rotation, scale units for scale. A zero delta
//! means "no edit this tick" and must not open or extend a batch.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use void_scene::Transform;

use crate::core::EditConfig;
use crate::viewport::space;

/// World axis used for "right" when the camera gives no usable direction.
pub const WORLD_RIGHT: Vec3 = Vec3::X;
/// World axis used for "forward" when the camera gives no usable direction.
pub const WORLD_FORWARD: Vec3 = Vec3::NEG_Z;

/// Projected axes shorter than this fall back to world axes.
const MIN_PROJECTED_LENGTH: f32 = 1e-4;

/// Directional keys held this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFlags {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl InputFlags {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Right minus left.
    fn horizontal(&self) -> f32 {
        axis(self.right, self.left)
    }

    /// Forward minus back.
    fn vertical(&self) -> f32 {
        axis(self.forward, self.back)
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Modifier keys held this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Multiply the step by `fast_multiplier`
    pub fast: bool,
    /// Multiply the step by `slow_multiplier`; wins when both are held
    pub slow: bool,
    /// Forward/back drive world Y instead of the depth axis
    pub vertical: bool,
}

/// Which aspect of the transform keyboard input edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Position,
    Rotation,
    Scale,
}

/// Axes keyboard movement is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementFrame {
    #[default]
    World,
    CameraRelative,
}

/// Step factor for the held modifiers.
pub fn speed_multiplier(modifiers: Modifiers, config: &EditConfig) -> f32 {
    if modifiers.slow {
        config.slow_multiplier
    } else if modifiers.fast {
        config.fast_multiplier
    } else {
        1.0
    }
}

/// Camera right/forward flattened onto the ground plane.
///
/// Each axis falls back to its world counterpart when the camera looks
/// (nearly) straight up or down along it.
pub fn camera_axes(camera_rotation: Quat) -> (Vec3, Vec3) {
    let flatten = |v: Vec3, fallback: Vec3| {
        let flat = Vec3::new(v.x, 0.0, v.z);
        if flat.length() < MIN_PROJECTED_LENGTH {
            fallback
        } else {
            flat.normalize()
        }
    };
    (
        flatten(camera_rotation * Vec3::X, WORLD_RIGHT),
        flatten(camera_rotation * Vec3::NEG_Z, WORLD_FORWARD),
    )
}

/// Net change to apply this tick.
pub fn resolve_delta(
    input: InputFlags,
    mode: EditMode,
    frame: MovementFrame,
    modifiers: Modifiers,
    camera_rotation: Quat,
    config: &EditConfig,
) -> Vec3 {
    let h = input.horizontal();
    let v = input.vertical();
    if h == 0.0 && v == 0.0 {
        return Vec3::ZERO;
    }

    let speed = speed_multiplier(modifiers, config);

    match mode {
        EditMode::Position => {
            let (right, forward) = match frame {
                MovementFrame::World => (WORLD_RIGHT, WORLD_FORWARD),
                MovementFrame::CameraRelative => camera_axes(camera_rotation),
            };
            let depth = if modifiers.vertical { Vec3::Y } else { forward };
            (right * h + depth * v) * config.move_step * speed
        }
        EditMode::Rotation => {
            // Left turns left (+yaw), forward tips the nose down (-pitch).
            let step = config.rotation_step * config.rotation_multiplier * speed;
            Vec3::new(-v, -h, 0.0) * step
        }
        EditMode::Scale => {
            let grow = if modifiers.vertical {
                Vec3::new(h, v, 0.0)
            } else {
                Vec3::new(h, 0.0, v)
            };
            grow * config.scale_step * speed
        }
    }
}

/// Apply a world-space delta to an entity's local transform.
///
/// `parent_world` is the parent's world transform, `None` for root-level entities.
pub fn apply_delta(
    local: Transform,
    parent_world: Option<&Transform>,
    mode: EditMode,
    delta: Vec3,
    config: &EditConfig,
) -> Transform {
    match mode {
        EditMode::Position => {
            let world = space::local_to_world(parent_world, &local);
            let target = world.position + delta;
            let position = match parent_world {
                Some(parent) => space::world_to_local(parent, target),
                None => target,
            };
            local.with_position(position)
        }
        EditMode::Rotation => {
            let world = space::local_to_world(parent_world, &local);
            let yaw = Quat::from_rotation_y(delta.y.to_radians());
            let pitch = Quat::from_rotation_x(delta.x.to_radians());
            let roll = Quat::from_rotation_z(delta.z.to_radians());
            let rotated = (yaw * world.rotation * pitch * roll).normalize();
            local.with_rotation(space::world_rotation_to_local(parent_world, rotated))
        }
        EditMode::Scale => {
            let scale = (local.scale + delta).max(Vec3::splat(config.min_scale));
            local.with_scale(scale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn keys(forward: bool, back: bool, left: bool, right: bool) -> InputFlags {
        InputFlags { forward, back, left, right }
    }

    const FORWARD: InputFlags = InputFlags {
        forward: true,
        back: false,
        left: false,
        right: false,
    };

    #[test]
    fn test_no_keys_is_zero() {
        let config = EditConfig::default();
        for mode in [EditMode::Position, EditMode::Rotation, EditMode::Scale] {
            let delta = resolve_delta(
                InputFlags::default(),
                mode,
                MovementFrame::World,
                Modifiers { fast: true, ..Default::default() },
                Quat::IDENTITY,
                &config,
            );
            assert_eq!(delta, Vec3::ZERO);
        }
        // Opposing keys cancel out
        let delta = resolve_delta(
            keys(true, true, true, true),
            EditMode::Position,
            MovementFrame::World,
            Modifiers::default(),
            Quat::IDENTITY,
            &config,
        );
        assert_eq!(delta, Vec3::ZERO);
    }

    #[test]
    fn test_world_axes() {
        let config = EditConfig::default();
        let step = config.move_step;
        let resolve = |input, modifiers| {
            resolve_delta(input, EditMode::Position, MovementFrame::World, modifiers, Quat::IDENTITY, &config)
        };

        assert_eq!(resolve(FORWARD, Modifiers::default()), Vec3::new(0.0, 0.0, -step));
        assert_eq!(resolve(keys(false, false, false, true), Modifiers::default()), Vec3::new(step, 0.0, 0.0));
        assert_eq!(
            resolve(keys(false, true, true, false), Modifiers::default()),
            Vec3::new(-step, 0.0, step)
        );

        let vertical = Modifiers { vertical: true, ..Default::default() };
        assert_eq!(resolve(FORWARD, vertical), Vec3::new(0.0, step, 0.0));
        assert_eq!(resolve(keys(false, true, false, false), vertical), Vec3::new(0.0, -step, 0.0));
    }

    #[test]
    fn test_modifier_precedence_slow_wins() {
        let config = EditConfig::default();
        let resolve = |modifiers| {
            resolve_delta(FORWARD, EditMode::Position, MovementFrame::World, modifiers, Quat::IDENTITY, &config)
                .length()
        };

        let base = resolve(Modifiers::default());
        let fast = resolve(Modifiers { fast: true, ..Default::default() });
        let slow = resolve(Modifiers { slow: true, ..Default::default() });
        let both = resolve(Modifiers { fast: true, slow: true, vertical: false });

        assert_abs_diff_eq!(fast, base * config.fast_multiplier, epsilon = 1e-6);
        assert_abs_diff_eq!(slow, base * config.slow_multiplier, epsilon = 1e-6);
        assert_abs_diff_eq!(both, slow, epsilon = 1e-6);
    }

    #[test]
    fn test_camera_relative_forward_never_leaves_ground_plane() {
        let config = EditConfig::default();
        for pitch in [-90.0f32, -89.9, -60.0, -15.0, 0.0, 30.0, 75.0, 89.99, 90.0] {
            for yaw in [0.0f32, 45.0, 135.0, -100.0] {
                let camera = Quat::from_rotation_y(yaw.to_radians()) * Quat::from_rotation_x(pitch.to_radians());
                let delta = resolve_delta(
                    FORWARD,
                    EditMode::Position,
                    MovementFrame::CameraRelative,
                    Modifiers::default(),
                    camera,
                    &config,
                );
                assert_eq!(delta.y, 0.0, "pitch {pitch} yaw {yaw}");
                assert_abs_diff_eq!(delta.length(), config.move_step, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_camera_relative_follows_yaw() {
        let config = EditConfig::default();
        let camera = Quat::from_rotation_y(90f32.to_radians()) * Quat::from_rotation_x(-30f32.to_radians());
        let delta = resolve_delta(
            FORWARD,
            EditMode::Position,
            MovementFrame::CameraRelative,
            Modifiers::default(),
            camera,
            &config,
        );
        // Yawed 90 degrees left, the camera looks down -X
        assert!(delta.abs_diff_eq(Vec3::new(-config.move_step, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_straight_down_camera_falls_back_to_world_forward() {
        let camera = Quat::from_rotation_x(-90f32.to_radians());
        let (right, forward) = camera_axes(camera);
        assert_eq!(forward, WORLD_FORWARD);
        assert!(right.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_rotation_mode_uses_multiplier() {
        let config = EditConfig::default();
        let step = config.rotation_step * config.rotation_multiplier;
        let left = resolve_delta(
            keys(false, false, true, false),
            EditMode::Rotation,
            MovementFrame::World,
            Modifiers::default(),
            Quat::IDENTITY,
            &config,
        );
        assert_eq!(left, Vec3::new(0.0, step, 0.0));

        let forward = resolve_delta(
            FORWARD,
            EditMode::Rotation,
            MovementFrame::CameraRelative,
            Modifiers::default(),
            Quat::IDENTITY,
            &config,
        );
        assert_eq!(forward, Vec3::new(-step, 0.0, 0.0));
    }

    #[test]
    fn test_scale_mode_axes() {
        let config = EditConfig::default();
        let step = config.scale_step;
        let grow_depth = resolve_delta(
            FORWARD,
            EditMode::Scale,
            MovementFrame::World,
            Modifiers::default(),
            Quat::IDENTITY,
            &config,
        );
        assert_eq!(grow_depth, Vec3::new(0.0, 0.0, step));

        let grow_height = resolve_delta(
            FORWARD,
            EditMode::Scale,
            MovementFrame::CameraRelative,
            Modifiers { vertical: true, ..Default::default() },
            Quat::from_rotation_y(1.0),
            &config,
        );
        assert_eq!(grow_height, Vec3::new(0.0, step, 0.0));
    }

    #[test]
    fn test_apply_position_under_rotated_parent() {
        let config = EditConfig::default();
        let parent = Transform::from_position(Vec3::new(5.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(90f32.to_radians()));
        let local = Transform::IDENTITY;

        let moved = apply_delta(local, Some(&parent), EditMode::Position, Vec3::new(1.0, 0.0, 0.0), &config);
        let world = space::local_to_world(Some(&parent), &moved);
        assert!(world.position.abs_diff_eq(Vec3::new(6.0, 0.0, 0.0), 1e-5));
        // Local +Z points along world +X under a 90 degree yaw
        assert!(moved.position.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn test_apply_rotation_yaw_is_about_world_up() {
        let config = EditConfig::default();
        let parent = Transform::IDENTITY.with_rotation(Quat::from_rotation_z(0.5));
        let local = Transform::IDENTITY;

        let rotated = apply_delta(local, Some(&parent), EditMode::Rotation, Vec3::new(0.0, 90.0, 0.0), &config);
        let world = space::local_to_world(Some(&parent), &rotated);
        let expected = Quat::from_rotation_y(90f32.to_radians()) * parent.rotation;
        assert!(world.rotation.abs_diff_eq(expected, 1e-5) || world.rotation.abs_diff_eq(-expected, 1e-5));
    }

    #[test]
    fn test_apply_scale_clamps() {
        let config = EditConfig::default();
        let local = Transform::IDENTITY.with_scale(Vec3::splat(0.02));
        let shrunk = apply_delta(local, None, EditMode::Scale, Vec3::new(-1.0, 0.0, 0.5), &config);
        assert!(shrunk.scale.abs_diff_eq(Vec3::new(config.min_scale, 0.02, 0.52), 1e-6));
        assert_eq!(shrunk.scale.x, config.min_scale);
    }
}
