//! Worlds, locations and the entities that live in them.

use glam::DVec3;
use uuid::Uuid;

use crate::registry::RegistryKey;

/// Registration-time properties of a world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldProperties {
    /// Unique world name (also its folder name).
    pub name: String,
    /// Stable world id.
    pub uuid: Uuid,
    /// Disabled worlds are registered but never loaded.
    pub enabled: bool,
    /// Id in the `dimension_type` catalog.
    pub dimension_type: RegistryKey,
}

impl WorldProperties {
    /// An enabled world with a fresh id.
    pub fn new(name: impl Into<String>, dimension_type: RegistryKey) -> Self {
        Self {
            name: name.into(),
            uuid: Uuid::new_v4(),
            enabled: true,
            dimension_type,
        }
    }

    /// Same world, marked disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A position inside a specific world.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// The containing world.
    pub world: WorldProperties,
    /// Position in world coordinates.
    pub position: DVec3,
}

impl Location {
    /// Create a location.
    pub fn new(world: WorldProperties, position: DVec3) -> Self {
        Self { world, position }
    }
}

/// Snapshot of a live entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef {
    /// Entity id.
    pub uuid: Uuid,
    /// Id in the `entity_type` catalog.
    pub entity_type: RegistryKey,
    /// Where the entity's feet are.
    pub location: Location,
    /// Height of the eyes above [`EntityRef::location`].
    pub eye_height: f64,
    /// Direction the entity's head is facing (not necessarily normalized).
    pub head_direction: DVec3,
}

impl EntityRef {
    /// Eye position used as the origin of line-of-sight traces.
    pub fn eye_position(&self) -> DVec3 {
        self.location.position + DVec3::new(0.0, self.eye_height, 0.0)
    }
}

/// Snapshot of a connected player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRef {
    /// Account name; unique among online players, compared case-insensitively.
    pub name: String,
    /// The player's entity.
    pub entity: EntityRef,
}

impl PlayerRef {
    /// Player id (the entity id).
    pub fn uuid(&self) -> Uuid {
        self.entity.uuid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DimensionType;

    #[test]
    fn eye_position_offsets_feet() {
        let world = WorldProperties::new("world", DimensionType::Overworld.key());
        let entity = EntityRef {
            uuid: Uuid::nil(),
            entity_type: RegistryKey::minecraft("zombie").unwrap(),
            location: Location::new(world, DVec3::new(1.0, 64.0, 2.0)),
            eye_height: 1.62,
            head_direction: DVec3::X,
        };
        assert_eq!(entity.eye_position(), DVec3::new(1.0, 65.62, 2.0));
    }

    #[test]
    fn disabled_keeps_identity() {
        let world = WorldProperties::new("old", DimensionType::End.key());
        let id = world.uuid;
        let disabled = world.disabled();
        assert!(!disabled.enabled);
        assert_eq!(disabled.uuid, id);
    }
}
