//! Keyboard-driven editing: per-tick deltas and their batching into undo steps.

mod batching;
mod delta;

pub use batching::{EditBatcher, BATCH_DESCRIPTION};
pub use delta::{
    apply_delta, camera_axes, resolve_delta, speed_multiplier, EditMode, InputFlags, Modifiers,
    MovementFrame, WORLD_FORWARD, WORLD_RIGHT,
};
