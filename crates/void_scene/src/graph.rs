//! Scene graph - single owner of every live entity.
//!
//! Entities live in a slot arena. Each slot tracks a generation counter so
//! that handles to destroyed entities stop resolving instead of aliasing
//! whatever entity reuses the slot later. A slot is never handed out twice
//! with the same generation: once its counter runs out it stays empty.

use crate::error::{Result, SceneError};
use crate::{EntityId, Transform};

/// A scene entity with its hierarchy links.
#[derive(Clone, Debug)]
pub struct SceneEntity {
    /// Display name
    pub name: String,
    /// Transform relative to the parent (or the scene root)
    pub transform: Transform,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
}

impl SceneEntity {
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }
}

struct Slot {
    generation: u32,
    entity: Option<SceneEntity>,
}

/// The live scene.
pub struct SceneGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    len: usize,
    /// Upper bound on slots ever allocated
    max_slots: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::with_max_slots(EntityId::MAX_INDEX as usize + 1)
    }

    /// Scene that refuses to allocate more than `max_slots` slots.
    /// Retired slots count against the limit.
    pub fn with_max_slots(max_slots: usize) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            max_slots: max_slots.min(EntityId::MAX_INDEX as usize + 1),
        }
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Spawn a root-level entity.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> Result<EntityId> {
        self.insert(SceneEntity {
            name: name.into(),
            transform,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Spawn an entity under `parent`. `transform` is local to the parent.
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
        transform: Transform,
    ) -> Result<EntityId> {
        if !self.contains(parent) {
            return Err(SceneError::EntityNotFound(parent));
        }

        let id = self.insert(SceneEntity {
            name: name.into(),
            transform,
            parent: Some(parent),
            children: Vec::new(),
        })?;
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        Ok(id)
    }

    fn insert(&mut self, entity: SceneEntity) -> Result<EntityId> {
        let id = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            EntityId::new(index, slot.generation)
        } else {
            let index = self.slots.len();
            if index >= self.max_slots {
                return Err(SceneError::ArenaExhausted);
            }
            self.slots.push(Slot {
                generation: 0,
                entity: Some(entity),
            });
            EntityId::new(index as u32, 0)
        };
        self.len += 1;
        Ok(id)
    }

    /// Destroy an entity and all of its descendants.
    ///
    /// Returns the number of entities removed (0 if the handle was already stale).
    pub fn despawn(&mut self, id: EntityId) -> usize {
        if !self.contains(id) {
            return 0;
        }

        if let Some(parent) = self.parent(id) {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|&c| c != id);
            }
        }

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index() as usize];
            if let Some(entity) = slot.entity.take() {
                stack.extend(entity.children);
                match slot.generation.checked_add(1) {
                    Some(generation) => {
                        slot.generation = generation;
                        self.free_list.push(current.index());
                    }
                    None => {
                        log::debug!(target: "void_scene", "Retired slot {}", current.index());
                    }
                }
                removed += 1;
            }
        }

        self.len -= removed;
        log::debug!(target: "void_scene", "Despawned {} entities rooted at {}", removed, id);
        removed
    }

    /// Check whether the handle still refers to a live entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        if id.is_null() {
            return None;
        }
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        if id.is_null() {
            return None;
        }
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.get(id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn local_transform(&self, id: EntityId) -> Option<Transform> {
        self.get(id).map(|e| e.transform)
    }

    /// Overwrite the local transform. Returns `false` for a stale handle.
    pub fn set_local_transform(&mut self, id: EntityId, transform: Transform) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Transform relative to the scene root, composed up the parent chain.
    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        let entity = self.get(id)?;
        let mut world = entity.transform;
        let mut next = entity.parent;
        while let Some(parent_id) = next {
            let parent = self.get(parent_id)?;
            world = parent.transform.mul_transform(&world);
            next = parent.parent;
        }
        Some(world)
    }

    /// World transform of the entity's parent, `None` for root-level entities.
    pub fn parent_world_transform(&self, id: EntityId) -> Option<Transform> {
        self.parent(id).and_then(|p| self.world_transform(p))
    }

    /// Re-parent an entity, keeping its local transform.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> Result<()> {
        if !self.contains(child) {
            return Err(SceneError::EntityNotFound(child));
        }

        if let Some(new_parent) = parent {
            if !self.contains(new_parent) {
                return Err(SceneError::EntityNotFound(new_parent));
            }
            // Walk up from the new parent; meeting the child means a cycle.
            let mut cursor = Some(new_parent);
            while let Some(ancestor) = cursor {
                if ancestor == child {
                    return Err(SceneError::HierarchyCycle { child, parent: new_parent });
                }
                cursor = self.parent(ancestor);
            }
        }

        if let Some(old_parent) = self.parent(child) {
            if let Some(old_parent) = self.get_mut(old_parent) {
                old_parent.children.retain(|&c| c != child);
            }
        }

        if let Some(new_parent) = parent {
            if let Some(new_parent) = self.get_mut(new_parent) {
                new_parent.children.push(child);
            }
        }

        if let Some(entity) = self.get_mut(child) {
            entity.parent = parent;
        }
        Ok(())
    }

    /// First live entity with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.iter().find(|(_, e)| e.name == name).map(|(id, _)| id)
    }

    /// Iterate over all live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &SceneEntity)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.entity
                .as_ref()
                .map(|e| (EntityId::new(i as u32, slot.generation), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_spawn_and_despawn() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("A", Transform::IDENTITY).unwrap();
        let b = scene.spawn("B", Transform::IDENTITY).unwrap();

        assert_eq!(scene.len(), 2);
        assert!(scene.contains(a));
        assert_ne!(a, b);

        assert_eq!(scene.despawn(a), 1);
        assert!(!scene.contains(a));
        assert_eq!(scene.despawn(a), 0);

        // Slot is reused with a new generation; the old handle stays dead
        let c = scene.spawn("C", Transform::IDENTITY).unwrap();
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert!(!scene.contains(a));
        assert_eq!(scene.name(c), Some("C"));
    }

    #[test]
    fn test_recycled_slot_never_revives_old_handle() {
        let mut scene = SceneGraph::new();
        let victim = scene.spawn("Victim", Transform::IDENTITY).unwrap();
        scene.despawn(victim);

        for _ in 0..300 {
            let bullet = scene.spawn("Bullet", Transform::IDENTITY).unwrap();
            assert_eq!(bullet.index(), victim.index());
            assert_ne!(bullet, victim);
            assert!(!scene.contains(victim));
            scene.despawn(bullet);
        }

        let bullet = scene
            .spawn("Bullet", Transform::from_position(Vec3::splat(42.0)))
            .unwrap();
        assert_eq!(bullet.generation(), 301);
        assert!(!scene.set_local_transform(victim, Transform::IDENTITY));
        assert_eq!(scene.local_transform(bullet).unwrap().position, Vec3::splat(42.0));
    }

    #[test]
    fn test_exhausted_generation_retires_slot() {
        let mut scene = SceneGraph::new();
        scene.spawn("Old", Transform::IDENTITY).unwrap();
        scene.slots[0].generation = u32::MAX;
        let old = EntityId::new(0, u32::MAX);
        assert!(scene.contains(old));

        assert_eq!(scene.despawn(old), 1);
        assert!(scene.free_list.is_empty());

        let fresh = scene.spawn("Fresh", Transform::IDENTITY).unwrap();
        assert_eq!(fresh.index(), 1);
        assert!(!scene.contains(old));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_spawn_fails_when_arena_is_full() {
        let mut scene = SceneGraph::with_max_slots(2);
        let a = scene.spawn("A", Transform::IDENTITY).unwrap();
        let b = scene.spawn_child(a, "B", Transform::IDENTITY).unwrap();

        assert_eq!(scene.spawn("C", Transform::IDENTITY), Err(SceneError::ArenaExhausted));
        assert_eq!(
            scene.spawn_child(a, "C", Transform::IDENTITY),
            Err(SceneError::ArenaExhausted)
        );
        assert_eq!(scene.children(a), [b].as_slice());
        assert_eq!(scene.len(), 2);

        scene.despawn(b);
        assert!(scene.spawn("C", Transform::IDENTITY).is_ok());
    }

    #[test]
    fn test_despawn_is_recursive() {
        let mut scene = SceneGraph::new();
        let root = scene.spawn("Root", Transform::IDENTITY).unwrap();
        let child = scene.spawn_child(root, "Child", Transform::IDENTITY).unwrap();
        let grandchild = scene.spawn_child(child, "Grandchild", Transform::IDENTITY).unwrap();
        let other = scene.spawn("Other", Transform::IDENTITY).unwrap();

        assert_eq!(scene.despawn(child), 2);
        assert!(scene.contains(root));
        assert!(!scene.contains(grandchild));
        assert!(scene.children(root).is_empty());
        assert!(scene.contains(other));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_world_transform_nested() {
        let mut scene = SceneGraph::new();
        let root = scene
            .spawn(
                "Root",
                Transform::from_position(Vec3::new(10.0, 0.0, 0.0))
                    .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
            )
            .unwrap();
        let child = scene
            .spawn_child(root, "Child", Transform::from_position(Vec3::new(0.0, 0.0, -2.0)))
            .unwrap();

        let world = scene.world_transform(child).unwrap();
        // -Z rotated 90 degrees about Y points along -X
        assert!(world.position.abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), 1e-5));
        assert_eq!(scene.parent_world_transform(child), scene.world_transform(root));
        assert_eq!(scene.parent_world_transform(root), None);
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("A", Transform::IDENTITY).unwrap();
        let b = scene.spawn_child(a, "B", Transform::IDENTITY).unwrap();

        assert_eq!(
            scene.set_parent(a, Some(b)),
            Err(SceneError::HierarchyCycle { child: a, parent: b })
        );
        assert!(scene.set_parent(a, Some(a)).is_err());

        scene.set_parent(b, None).unwrap();
        assert_eq!(scene.parent(b), None);
        assert!(scene.children(a).is_empty());
    }

    #[test]
    fn test_spawn_child_of_missing_parent() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("A", Transform::IDENTITY).unwrap();
        scene.despawn(a);
        assert_eq!(
            scene.spawn_child(a, "B", Transform::IDENTITY),
            Err(SceneError::EntityNotFound(a))
        );
    }
}
