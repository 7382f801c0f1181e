//! Editor camera as seen by the editing core.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::edit::MovementFrame;

/// World pose of the active editor camera, sampled once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Quat,
    /// Keyboard edits follow the camera's axes instead of the world's
    pub drives_relative_movement: bool,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            rotation: Quat::IDENTITY,
            drives_relative_movement: false,
        }
    }
}

impl CameraView {
    /// Fly-camera style pose: yaw about world Y, then pitch about the camera's X (degrees).
    pub fn from_yaw_pitch(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let rotation = Quat::from_rotation_y(yaw_degrees.to_radians())
            * Quat::from_rotation_x(pitch_degrees.to_radians());
        Self {
            position,
            rotation,
            drives_relative_movement: false,
        }
    }

    pub fn with_relative_movement(mut self, enabled: bool) -> Self {
        self.drives_relative_movement = enabled;
        self
    }

    /// Frame keyboard deltas are expressed in.
    pub fn movement_frame(&self) -> MovementFrame {
        if self.drives_relative_movement {
            MovementFrame::CameraRelative
        } else {
            MovementFrame::World
        }
    }

    /// Viewing direction (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_pitch_forward() {
        let cam = CameraView::from_yaw_pitch(Vec3::ZERO, 90.0, 0.0);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));

        let cam = CameraView::from_yaw_pitch(Vec3::ZERO, 0.0, -90.0);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn test_movement_frame_follows_flag() {
        let cam = CameraView::default();
        assert_eq!(cam.movement_frame(), MovementFrame::World);
        assert_eq!(
            cam.with_relative_movement(true).movement_frame(),
            MovementFrame::CameraRelative
        );
    }
}
