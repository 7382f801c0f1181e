//! Position/rotation/scale transform for scene entities

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Local transform of an entity relative to its parent (or the scene root).
///
/// Euler helpers use degrees with pitch about X, yaw about Y and roll about Z,
/// applied yaw first, then pitch, then roll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Build a rotation from `(pitch, yaw, roll)` in degrees.
    pub fn rotation_from_euler_degrees(euler: Vec3) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            euler.y.to_radians(),
            euler.x.to_radians(),
            euler.z.to_radians(),
        )
    }

    /// Current rotation as `(pitch, yaw, roll)` in degrees.
    pub fn euler_degrees(&self) -> Vec3 {
        let (yaw, pitch, roll) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
    }

    #[inline]
    pub fn with_euler_degrees(mut self, euler: Vec3) -> Self {
        self.rotation = Self::rotation_from_euler_degrees(euler);
        self
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Compose `child` (expressed in this transform's space) into this space.
    ///
    /// Scale is applied per axis before rotation, matching `to_matrix` for
    /// transforms without shear.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * (self.scale * child.position),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * point)
    }

    /// Map a point from the space this transform lives in back into its local space.
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.position)) / self.scale
    }

    /// Forward direction (-Z in local space)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Right direction (+X in local space)
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Component-wise comparison within `max_abs_diff`.
    pub fn abs_diff_eq(&self, other: &Transform, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.scale.abs_diff_eq(other.scale, max_abs_diff)
            // q and -q encode the same rotation
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(20.0, 135.0, -10.0);
        let t = Transform::IDENTITY.with_euler_degrees(euler);
        let back = t.euler_degrees();
        assert_abs_diff_eq!(back.x, euler.x, epsilon = 1e-3);
        assert_abs_diff_eq!(back.y, euler.y, epsilon = 1e-3);
        assert_abs_diff_eq!(back.z, euler.z, epsilon = 1e-3);
    }

    #[test]
    fn test_compose_matches_matrix() {
        let parent = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.7),
            Vec3::splat(2.0),
        );
        let child = Transform::from_position(Vec3::new(0.5, -1.0, 4.0))
            .with_rotation(Quat::from_rotation_x(0.3));

        let composed = parent.mul_transform(&child);
        let via_matrix = (parent.to_matrix() * child.to_matrix()).transform_point3(Vec3::ZERO);
        assert!(composed.position.abs_diff_eq(via_matrix, 1e-4));
    }

    #[test]
    fn test_inverse_point() {
        let t = Transform::new(
            Vec3::new(-3.0, 0.5, 2.0),
            Quat::from_rotation_z(1.1),
            Vec3::new(1.0, 2.0, 0.5),
        );
        let p = Vec3::new(4.0, -2.0, 7.0);
        let local = t.inverse_transform_point(p);
        assert!(t.transform_point(local).abs_diff_eq(p, 1e-4));
    }

    #[test]
    fn test_forward_is_negative_z() {
        let t = Transform::IDENTITY;
        assert_eq!(t.forward(), Vec3::NEG_Z);
        assert_eq!(t.right(), Vec3::X);
    }
}
