//! Undo/redo history with the command pattern.
//!
//! Two stacks, most recent last. Submitting a command executes it, pushes it
//! onto the undo stack and wipes the redo stack. The undo stack is bounded;
//! overflow drops the oldest entry, never the newest.

use void_scene::{EntityId, SceneGraph};

use super::{EditContext, EditorEvent};
use crate::commands::{Command, CommandError, CommandResult};

/// Undo/redo history stack.
pub struct UndoHistory {
    /// Commands that can be undone
    undo_stack: Vec<Box<dyn Command>>,
    /// Commands that can be redone
    redo_stack: Vec<Box<dyn Command>>,
    /// Maximum undo depth (always >= 1)
    max_size: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 50;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Change the depth bound (clamped to at least 1), trimming the oldest
    /// entries if the undo stack is now too deep.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        self.trim();
    }

    /// Check if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the description of the next undo command.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Get the description of the next redo command.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Get the number of commands in the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Execute a command and record it as the newest undo step.
    pub fn store_change(&mut self, cx: &mut EditContext<'_>, mut cmd: Box<dyn Command>) {
        let result = cmd.execute(cx.scene);
        report(cx, cmd.as_ref(), result, "execute");
        log::debug!(target: "void_live_edit::history", "Stored '{}'", cmd.description());

        self.undo_stack.push(cmd);

        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            cx.events.emit(EditorEvent::RedoAvailabilityChanged(false));
        }

        self.trim();
        cx.events.emit(EditorEvent::UndoAvailabilityChanged(true));
    }

    /// Revert the newest command. Returns `false` when there is nothing to undo.
    pub fn undo_change(&mut self, cx: &mut EditContext<'_>) -> bool {
        let Some(mut cmd) = self.undo_stack.pop() else {
            log::debug!(target: "void_live_edit::history", "Nothing to undo");
            return false;
        };

        let result = cmd.undo(cx.scene);
        report(cx, cmd.as_ref(), result, "undo");
        log::info!(target: "void_live_edit::history", "Undo: {}", cmd.description());

        self.redo_stack.push(cmd);
        cx.events.emit(EditorEvent::UndoAvailabilityChanged(self.can_undo()));
        cx.events.emit(EditorEvent::RedoAvailabilityChanged(true));
        true
    }

    /// Re-apply the newest undone command. Returns `false` when there is nothing to redo.
    pub fn redo_change(&mut self, cx: &mut EditContext<'_>) -> bool {
        let Some(mut cmd) = self.redo_stack.pop() else {
            log::debug!(target: "void_live_edit::history", "Nothing to redo");
            return false;
        };

        let result = cmd.execute(cx.scene);
        report(cx, cmd.as_ref(), result, "redo");
        log::info!(target: "void_live_edit::history", "Redo: {}", cmd.description());

        self.undo_stack.push(cmd);
        self.trim();
        cx.events.emit(EditorEvent::UndoAvailabilityChanged(true));
        cx.events.emit(EditorEvent::RedoAvailabilityChanged(self.can_redo()));
        true
    }

    /// Drop every recorded command without touching the scene.
    pub fn clear_all(&mut self, cx: &mut EditContext<'_>) {
        let had_undo = self.can_undo();
        let had_redo = self.can_redo();

        self.undo_stack.clear();
        self.redo_stack.clear();

        if had_undo {
            cx.events.emit(EditorEvent::UndoAvailabilityChanged(false));
        }
        if had_redo {
            cx.events.emit(EditorEvent::RedoAvailabilityChanged(false));
        }
        log::info!(target: "void_live_edit::history", "History cleared");
    }

    /// Distinct live entities referenced anywhere in the history, first-seen order.
    ///
    /// The undo stack is walked oldest to newest, then the redo stack the same way.
    pub fn modified_entities(&self, scene: &SceneGraph) -> Vec<EntityId> {
        let mut seen = Vec::new();
        for cmd in self.undo_stack.iter().chain(self.redo_stack.iter()) {
            let id = cmd.target();
            if scene.contains(id) && !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
            log::debug!(target: "void_live_edit::history", "Evicted {} oldest undo steps", excess);
        }
    }
}

/// Log a command outcome and announce the written transform.
fn report(cx: &mut EditContext<'_>, cmd: &dyn Command, result: CommandResult, phase: &str) {
    match result {
        Ok(()) => {
            if let Some(transform) = cx.scene.local_transform(cmd.target()) {
                cx.events.emit(EditorEvent::TransformChanged {
                    entity: cmd.target(),
                    transform,
                });
            }
        }
        Err(CommandError::EntityNotFound(id)) => {
            log::debug!(
                target: "void_live_edit::history",
                "Skipped {} of '{}': {} no longer exists",
                phase,
                cmd.description(),
                id
            );
        }
    }
}
