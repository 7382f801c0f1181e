//! Command pattern implementation for undo/redo support.
//!
//! Every edit that should be undoable reaches the scene through a command
//! submitted to [`UndoHistory::store_change`](crate::core::UndoHistory::store_change).

mod command;
mod snapshot;
mod transform_commands;

pub use command::{Command, CommandError, CommandResult};
pub use snapshot::TransformSnapshot;
pub use transform_commands::TransformCommand;
