//! Camera input and coordinate-space conversion.

mod camera;
pub mod space;

pub use camera::CameraView;
pub use space::{
    calculate_local_transform, local_to_world, view_rotation, world_rotation_to_local,
    world_to_local, AlignMode,
};
