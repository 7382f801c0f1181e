//! Generational entity handles
//!
//! An `EntityId` names a slot in the scene arena plus the generation the slot
//! had when the entity was spawned. Destroying an entity bumps the slot's
//! generation, so every handle still pointing at it stops resolving. A slot
//! whose generation counter is used up is retired rather than wrapped.

use core::fmt;

/// Handle to an entity owned by a [`SceneGraph`](crate::SceneGraph).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId {
    /// Lower 32 bits: slot index, upper 32 bits: generation
    bits: u64,
}

impl EntityId {
    /// Highest slot index a scene hands out. `u32::MAX` is left for `NULL`.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Handle that never resolves to an entity.
    pub const NULL: Self = Self { bits: u64::MAX };

    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self {
            bits: (generation as u64) << 32 | index as u64,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.bits == u64::MAX
    }

    /// Slot index inside the scene arena.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits as u32
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        (self.bits >> 32) as u32
    }

    #[inline]
    pub const fn to_bits(&self) -> u64 {
        self.bits
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({}v{})", self.index(), self.generation())
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({}v{})", self.index(), self.generation())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_packing() {
        let id = EntityId::new(1234, 70_000);
        assert_eq!(id.index(), 1234);
        assert_eq!(id.generation(), 70_000);
        assert!(!id.is_null());
        assert_eq!(EntityId::from_bits(id.to_bits()), id);
    }

    #[test]
    fn test_null_handle() {
        assert!(EntityId::NULL.is_null());
        assert!(EntityId::default().is_null());
        assert_eq!(format!("{}", EntityId::NULL), "Entity(null)");
        assert!(!EntityId::new(EntityId::MAX_INDEX, u32::MAX).is_null());
    }
}
