//! Per-tick editing session.
//!
//! The host calls [`LiveEditSession::tick`] once per simulation step with the
//! input sampled that frame. Inspector and viewport actions go through the
//! other session methods so they finalize any in-flight keyboard burst before
//! touching history.

use glam::{Quat, Vec3};
use void_scene::{EntityId, SceneGraph, Transform};

use super::{EditConfig, EditContext, EditorEvent, EventDispatcher, Selection, UndoHistory};
use crate::commands::{Command, TransformCommand, TransformSnapshot};
use crate::edit::{apply_delta, resolve_delta, EditBatcher, EditMode, InputFlags, Modifiers};
use crate::error::{EditError, Result};
use crate::viewport::{calculate_local_transform, view_rotation, AlignMode, CameraView};

/// Input sampled for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Monotonic time in seconds
    pub time: f64,
    pub input: InputFlags,
    pub modifiers: Modifiers,
    pub mode: EditMode,
    pub camera: CameraView,
}

/// What a tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A delta was written to the selected entity
    pub applied: bool,
    /// A keyboard burst was committed to history
    pub committed: bool,
}

/// Runtime editing state for one editor instance.
pub struct LiveEditSession {
    config: EditConfig,
    history: UndoHistory,
    batcher: EditBatcher,
    selection: Selection,
    events: EventDispatcher,
}

impl Default for LiveEditSession {
    fn default() -> Self {
        Self::new(EditConfig::default())
    }
}

impl LiveEditSession {
    pub fn new(config: EditConfig) -> Self {
        let config = config.validated();
        Self {
            history: UndoHistory::with_capacity(config.max_history),
            config,
            batcher: EditBatcher::new(),
            selection: Selection::new(),
            events: EventDispatcher::new(),
        }
    }

    /// Advance one simulation step.
    pub fn tick(&mut self, scene: &mut SceneGraph, frame: &FrameInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if let Some(id) = self.selection.primary() {
            if !scene.contains(id) {
                log::debug!(target: "void_live_edit::session", "Selected {} was destroyed", id);
                self.batcher.discard();
                self.selection.clear();
                self.events.emit(EditorEvent::EntitySelected(None));
            }
        }

        let mut cx = EditContext::new(scene, &mut self.events);
        outcome.committed =
            self.batcher
                .update(&mut cx, &mut self.history, frame.time, self.config.batch_timeout);

        let Some(entity) = self.selection.primary() else {
            return outcome;
        };

        let delta = resolve_delta(
            frame.input,
            frame.mode,
            frame.camera.movement_frame(),
            frame.modifiers,
            frame.camera.rotation,
            &self.config,
        );
        if delta == Vec3::ZERO {
            return outcome;
        }

        let Some(local) = cx.scene.local_transform(entity) else {
            return outcome;
        };
        let parent_world = cx.scene.parent_world_transform(entity);
        let updated = apply_delta(local, parent_world.as_ref(), frame.mode, delta, &self.config);

        cx.scene.set_local_transform(entity, updated);
        cx.events.emit(EditorEvent::TransformChanged {
            entity,
            transform: updated,
        });
        outcome.applied = true;

        if self.batcher.record_edit(
            &mut cx,
            &mut self.history,
            entity,
            TransformSnapshot::from(local),
            frame.time,
        ) {
            outcome.committed = true;
        }
        outcome
    }

    /// Change the edited entity. Destroyed or null handles select nothing.
    ///
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, scene: &mut SceneGraph, entity: Option<EntityId>) -> bool {
        let entity = entity.filter(|&id| scene.contains(id));
        if self.selection.primary() == entity {
            return false;
        }

        self.flush(scene);
        self.selection.set(entity);
        self.events.emit(EditorEvent::EntitySelected(entity));
        true
    }

    /// Undo the newest step, committing any open keyboard burst first.
    pub fn undo(&mut self, scene: &mut SceneGraph) -> bool {
        self.flush(scene);
        let mut cx = EditContext::new(scene, &mut self.events);
        self.history.undo_change(&mut cx)
    }

    /// Redo the newest undone step, committing any open keyboard burst first.
    pub fn redo(&mut self, scene: &mut SceneGraph) -> bool {
        self.flush(scene);
        let mut cx = EditContext::new(scene, &mut self.events);
        self.history.redo_change(&mut cx)
    }

    /// Execute a command and record it in history.
    pub fn store_change(&mut self, scene: &mut SceneGraph, cmd: Box<dyn Command>) {
        self.flush(scene);
        let mut cx = EditContext::new(scene, &mut self.events);
        self.history.store_change(&mut cx, cmd);
    }

    /// Set an entity's local position as one undo step.
    pub fn set_position(&mut self, scene: &mut SceneGraph, entity: EntityId, position: Vec3) -> Result<()> {
        let cmd = TransformCommand::position(scene, entity, position, "Set Position")?;
        self.store_change(scene, Box::new(cmd));
        Ok(())
    }

    /// Set an entity's local rotation from Euler degrees `(pitch, yaw, roll)`.
    pub fn set_rotation_euler(
        &mut self,
        scene: &mut SceneGraph,
        entity: EntityId,
        euler_degrees: Vec3,
    ) -> Result<()> {
        let rotation = Transform::rotation_from_euler_degrees(euler_degrees);
        let cmd = TransformCommand::rotation(scene, entity, rotation, "Set Rotation")?;
        self.store_change(scene, Box::new(cmd));
        Ok(())
    }

    pub fn set_scale(&mut self, scene: &mut SceneGraph, entity: EntityId, scale: Vec3) -> Result<()> {
        let scale = scale.max(Vec3::splat(self.config.min_scale));
        let cmd = TransformCommand::scale(scene, entity, scale, "Set Scale")?;
        self.store_change(scene, Box::new(cmd));
        Ok(())
    }

    /// Move an entity to the camera's world position.
    pub fn move_to_view(&mut self, scene: &mut SceneGraph, entity: EntityId, camera: &CameraView) -> Result<()> {
        let parent_world = scene.parent_world_transform(entity);
        let (position, _) = calculate_local_transform(parent_world.as_ref(), camera.position, Quat::IDENTITY);
        let cmd = TransformCommand::position(scene, entity, position, "Move To View")?;
        self.store_change(scene, Box::new(cmd));
        Ok(())
    }

    /// Give an entity the camera's world pose. Scale is left as is.
    pub fn align_with_view(
        &mut self,
        scene: &mut SceneGraph,
        entity: EntityId,
        camera: &CameraView,
        mode: AlignMode,
    ) -> Result<()> {
        if entity.is_null() {
            return Err(EditError::InvalidArgument("align with view needs an entity"));
        }
        let before = TransformSnapshot::capture(scene, entity).ok_or(EditError::EntityNotFound(entity))?;

        let parent_world = scene.parent_world_transform(entity);
        let (position, rotation) = calculate_local_transform(
            parent_world.as_ref(),
            camera.position,
            view_rotation(camera.rotation, mode),
        );
        let after = TransformSnapshot::new(position, rotation, before.scale());

        let cmd = TransformCommand::new(entity, before, after, "Align With View")?;
        self.store_change(scene, Box::new(cmd));
        Ok(())
    }

    /// Drop all history. An open keyboard burst is discarded; its edits stay applied.
    pub fn clear_history(&mut self, scene: &mut SceneGraph) {
        self.batcher.discard();
        let mut cx = EditContext::new(scene, &mut self.events);
        self.history.clear_all(&mut cx);
    }

    /// Live entities touched by anything in history, first-seen order.
    pub fn modified_entities(&self, scene: &SceneGraph) -> Vec<EntityId> {
        self.history.modified_entities(scene)
    }

    /// Commit the open keyboard burst now. Returns `true` if history grew.
    pub fn flush(&mut self, scene: &mut SceneGraph) -> bool {
        if !self.batcher.is_open() {
            return false;
        }
        let mut cx = EditContext::new(scene, &mut self.events);
        self.batcher.flush(&mut cx, &mut self.history)
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    /// Replace the tunables. Out-of-range values fall back to their defaults
    /// and the rest apply from the next tick or submission.
    pub fn set_config(&mut self, config: EditConfig) {
        self.config = config.validated();
        self.history.set_max_size(self.config.max_history);
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn batcher(&self) -> &EditBatcher {
        &self.batcher
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }
}
