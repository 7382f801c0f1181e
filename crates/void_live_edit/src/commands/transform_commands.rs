//! Transform edit commands (position, rotation, scale).

use glam::{Quat, Vec3};
use void_scene::{EntityId, SceneGraph};

use super::{Command, CommandError, CommandResult, TransformSnapshot};
use crate::error::{EditError, Result};

/// Swap an entity's local transform between two snapshots.
#[derive(Clone, Debug)]
pub struct TransformCommand {
    entity: EntityId,
    before: TransformSnapshot,
    after: TransformSnapshot,
    description: String,
}

impl TransformCommand {
    pub fn new(
        entity: EntityId,
        before: TransformSnapshot,
        after: TransformSnapshot,
        description: impl Into<String>,
    ) -> Result<Self> {
        if entity.is_null() {
            return Err(EditError::InvalidArgument("transform command needs an entity"));
        }
        Ok(Self {
            entity,
            before,
            after,
            description: description.into(),
        })
    }

    /// Change only the position; rotation and scale are pinned to their live values.
    pub fn position(
        scene: &SceneGraph,
        entity: EntityId,
        position: Vec3,
        description: impl Into<String>,
    ) -> Result<Self> {
        Self::edit_live(scene, entity, description, |s| {
            TransformSnapshot::new(position, s.rotation(), s.scale())
        })
    }

    /// Change only the rotation; position and scale are pinned to their live values.
    pub fn rotation(
        scene: &SceneGraph,
        entity: EntityId,
        rotation: Quat,
        description: impl Into<String>,
    ) -> Result<Self> {
        Self::edit_live(scene, entity, description, |s| {
            TransformSnapshot::new(s.position(), rotation, s.scale())
        })
    }

    /// Change only the scale; position and rotation are pinned to their live values.
    pub fn scale(
        scene: &SceneGraph,
        entity: EntityId,
        scale: Vec3,
        description: impl Into<String>,
    ) -> Result<Self> {
        Self::edit_live(scene, entity, description, |s| {
            TransformSnapshot::new(s.position(), s.rotation(), scale)
        })
    }

    fn edit_live(
        scene: &SceneGraph,
        entity: EntityId,
        description: impl Into<String>,
        edit: impl FnOnce(&TransformSnapshot) -> TransformSnapshot,
    ) -> Result<Self> {
        if entity.is_null() {
            return Err(EditError::InvalidArgument("transform command needs an entity"));
        }
        let live = TransformSnapshot::capture(scene, entity)
            .ok_or(EditError::EntityNotFound(entity))?;
        let after = edit(&live);
        Self::new(entity, live, after, description)
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn before(&self) -> &TransformSnapshot {
        &self.before
    }

    pub fn after(&self) -> &TransformSnapshot {
        &self.after
    }

    fn write(&self, scene: &mut SceneGraph, snapshot: &TransformSnapshot) -> CommandResult {
        if scene.set_local_transform(self.entity, snapshot.to_transform()) {
            Ok(())
        } else {
            Err(CommandError::EntityNotFound(self.entity))
        }
    }
}

impl Command for TransformCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn target(&self) -> EntityId {
        self.entity
    }

    fn execute(&mut self, scene: &mut SceneGraph) -> CommandResult {
        self.write(scene, &self.after)
    }

    fn undo(&mut self, scene: &mut SceneGraph) -> CommandResult {
        self.write(scene, &self.before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_scene::Transform;

    fn scene_with_entity() -> (SceneGraph, EntityId) {
        let mut scene = SceneGraph::new();
        let id = scene
            .spawn(
                "Crate",
                Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.5), Vec3::splat(2.0)),
            )
            .unwrap();
        (scene, id)
    }

    #[test]
    fn test_null_entity_rejected() {
        let snap = TransformSnapshot::from(Transform::IDENTITY);
        let result = TransformCommand::new(EntityId::NULL, snap, snap, "Move");
        assert!(matches!(result, Err(EditError::InvalidArgument(_))));

        let scene = SceneGraph::new();
        let result = TransformCommand::position(&scene, EntityId::NULL, Vec3::ZERO, "Move");
        assert!(matches!(result, Err(EditError::InvalidArgument(_))));
    }

    #[test]
    fn test_execute_and_undo_are_idempotent() {
        let (mut scene, id) = scene_with_entity();
        let before = TransformSnapshot::capture(&scene, id).unwrap();
        let after = TransformSnapshot::from(Transform::from_position(Vec3::new(9.0, 9.0, 9.0)));
        let mut cmd = TransformCommand::new(id, before, after, "Edit").unwrap();

        cmd.execute(&mut scene).unwrap();
        cmd.execute(&mut scene).unwrap();
        assert_eq!(scene.local_transform(id).unwrap(), after.to_transform());

        cmd.undo(&mut scene).unwrap();
        cmd.undo(&mut scene).unwrap();
        assert_eq!(scene.local_transform(id).unwrap(), before.to_transform());
        assert_eq!(cmd.description(), "Edit");
        assert_eq!(cmd.target(), id);
    }

    #[test]
    fn test_single_aspect_constructors_pin_other_fields() {
        let (scene, id) = scene_with_entity();
        let live = scene.local_transform(id).unwrap();

        let cmd = TransformCommand::position(&scene, id, Vec3::ZERO, "Set Position").unwrap();
        assert_eq!(cmd.after().position(), Vec3::ZERO);
        assert_eq!(cmd.after().rotation(), live.rotation);
        assert_eq!(cmd.after().scale(), live.scale);
        assert_eq!(cmd.before().to_transform(), live);

        let cmd = TransformCommand::scale(&scene, id, Vec3::ONE, "Set Scale").unwrap();
        assert_eq!(cmd.after().position(), live.position);
        assert_eq!(cmd.after().scale(), Vec3::ONE);

        let cmd = TransformCommand::rotation(&scene, id, Quat::IDENTITY, "Set Rotation").unwrap();
        assert_eq!(cmd.after().rotation(), Quat::IDENTITY);
        assert_eq!(cmd.after().position(), live.position);
    }

    #[test]
    fn test_stale_entity_is_reported_not_written() {
        let (mut scene, id) = scene_with_entity();
        let mut cmd = TransformCommand::position(&scene, id, Vec3::ZERO, "Set Position").unwrap();
        scene.despawn(id);

        assert_eq!(cmd.execute(&mut scene), Err(CommandError::EntityNotFound(id)));
        assert_eq!(cmd.undo(&mut scene), Err(CommandError::EntityNotFound(id)));
        assert!(matches!(
            TransformCommand::scale(&scene, id, Vec3::ONE, "Set Scale"),
            Err(EditError::EntityNotFound(_))
        ));
    }
}
