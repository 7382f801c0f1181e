//! Single-entity selection.
//!
//! The editor targets at most one entity at a time. The selection only holds
//! a handle; the entity itself belongs to the scene and may vanish at any time.

use void_scene::EntityId;

/// Currently targeted entity.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    current: Option<EntityId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<EntityId> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.current == Some(id)
    }

    /// Replace the selection. Returns `true` if it changed.
    pub fn set(&mut self, id: Option<EntityId>) -> bool {
        let id = id.filter(|id| !id.is_null());
        if self.current == id {
            return false;
        }
        self.current = id;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use void_scene::{SceneGraph, Transform};

    #[test]
    fn test_selection_replace() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("A", Transform::IDENTITY).unwrap();
        let b = scene.spawn("B", Transform::IDENTITY).unwrap();

        let mut sel = Selection::new();
        assert!(sel.set(Some(a)));
        assert!(sel.set(Some(b)));
        assert!(!sel.set(Some(b)));

        assert!(sel.is_selected(b));
        assert!(!sel.is_selected(a));
        assert!(sel.clear());
        assert!(!sel.clear());
    }

    #[test]
    fn test_null_handle_selects_nothing() {
        let mut sel = Selection::new();
        assert!(!sel.set(Some(EntityId::NULL)));
        assert!(sel.is_empty());
    }
}
