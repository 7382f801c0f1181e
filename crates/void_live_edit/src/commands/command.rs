//! Command trait and result types.

use thiserror::Error;
use void_scene::{EntityId, SceneGraph};

/// Result type for command execution.
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Target entity was destroyed after the command was recorded
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),
}

/// A reversible edit to the live scene.
///
/// Commands are created fully populated. `execute` writes the "after" state and
/// `undo` writes the "before" state; calling either twice lands on the same
/// scene state as calling it once.
///
/// # Example
///
/// ```ignore
/// struct RenameCommand {
///     entity: EntityId,
///     old_name: String,
///     new_name: String,
/// }
///
/// impl Command for RenameCommand {
///     fn description(&self) -> &str { "Rename" }
///     fn target(&self) -> EntityId { self.entity }
///
///     fn execute(&mut self, scene: &mut SceneGraph) -> CommandResult {
///         let entity = scene.get_mut(self.entity)
///             .ok_or(CommandError::EntityNotFound(self.entity))?;
///         entity.name = self.new_name.clone();
///         Ok(())
///     }
///
///     fn undo(&mut self, scene: &mut SceneGraph) -> CommandResult {
///         let entity = scene.get_mut(self.entity)
///             .ok_or(CommandError::EntityNotFound(self.entity))?;
///         entity.name = self.old_name.clone();
///         Ok(())
///     }
/// }
/// ```
pub trait Command: Send + Sync {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Entity this command writes to.
    fn target(&self) -> EntityId;

    /// Apply the command's "after" state.
    fn execute(&mut self, scene: &mut SceneGraph) -> CommandResult;

    /// Restore the command's "before" state.
    fn undo(&mut self, scene: &mut SceneGraph) -> CommandResult;
}
