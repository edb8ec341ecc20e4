//! Live server state as seen by argument parsers.
//!
//! Parsers enumerate choices and resolve matches through [`Server`]. Nothing is
//! cached between calls, so two queries made during one parse may observe
//! different state if the host mutates it concurrently (a player logging out
//! between completion and resolution, for example).

use std::collections::{BTreeMap, HashSet};

use glam::IVec3;
use uuid::Uuid;

use crate::dimension::{DimensionType, DIMENSION_TYPE_CATALOG};
use crate::registry::RegistryKey;
use crate::world::{EntityRef, PlayerRef, WorldProperties};

/// One registered value of a catalog (block types, dimension types, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogEntry {
    /// Catalog id.
    pub id: RegistryKey,
    /// Human-readable name.
    pub name: String,
}

impl CatalogEntry {
    /// Create an entry.
    pub fn new(id: RegistryKey, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Registry and live-state queries.
pub trait Server {
    /// All registered worlds in registration order, enabled or not.
    fn worlds(&self) -> Vec<WorldProperties>;

    /// Connected players.
    fn online_players(&self) -> Vec<PlayerRef>;

    /// Entities across all loaded worlds (players included).
    fn loaded_entities(&self) -> Vec<EntityRef>;

    /// Entries of the named catalog, ordered by id.
    fn catalog_entries(&self, catalog: &str) -> Vec<CatalogEntry>;

    /// Whether the block at `block` in `world` is air (unloaded space counts as air).
    fn is_air(&self, world: &str, block: IVec3) -> bool;

    /// Look up a registered world by exact name.
    fn world_by_name(&self, name: &str) -> Option<WorldProperties> {
        self.worlds().into_iter().find(|world| world.name == name)
    }

    /// Look up an online player by name, ignoring case.
    fn player_by_name(&self, name: &str) -> Option<PlayerRef> {
        self.online_players()
            .into_iter()
            .find(|player| player.name.eq_ignore_ascii_case(name))
    }

    /// Look up a loaded entity by id.
    fn entity_by_uuid(&self, uuid: Uuid) -> Option<EntityRef> {
        self.loaded_entities()
            .into_iter()
            .find(|entity| entity.uuid == uuid)
    }

    /// Look up a catalog entry by id.
    fn catalog_entry(&self, catalog: &str, id: &RegistryKey) -> Option<CatalogEntry> {
        self.catalog_entries(catalog)
            .into_iter()
            .find(|entry| &entry.id == id)
    }
}

/// In-memory [`Server`] backed by plain collections.
///
/// Used by the CLI (populated from config) and by tests. The vanilla dimension
/// types are registered on construction.
#[derive(Debug, Clone)]
pub struct StaticServer {
    worlds: Vec<WorldProperties>,
    players: Vec<PlayerRef>,
    entities: Vec<EntityRef>,
    catalogs: BTreeMap<String, Vec<CatalogEntry>>,
    solid_blocks: HashSet<(String, IVec3)>,
}

impl Default for StaticServer {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticServer {
    /// Empty server with only the vanilla dimension types registered.
    pub fn new() -> Self {
        let mut server = Self {
            worlds: Vec::new(),
            players: Vec::new(),
            entities: Vec::new(),
            catalogs: BTreeMap::new(),
            solid_blocks: HashSet::new(),
        };
        for dim in DimensionType::ALL {
            server.register_catalog_entry(
                DIMENSION_TYPE_CATALOG,
                CatalogEntry::new(dim.key(), dim.display_name()),
            );
        }
        server
    }

    /// Register a world after all previously registered ones.
    pub fn with_world(mut self, world: WorldProperties) -> Self {
        self.worlds.push(world);
        self
    }

    /// Connect a player.
    pub fn with_player(mut self, player: PlayerRef) -> Self {
        self.players.push(player);
        self
    }

    /// Spawn a non-player entity.
    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Register a catalog entry.
    pub fn with_catalog_entry(mut self, catalog: &str, entry: CatalogEntry) -> Self {
        self.register_catalog_entry(catalog, entry);
        self
    }

    /// Place a solid block.
    pub fn with_solid_block(mut self, world: &str, block: IVec3) -> Self {
        self.solid_blocks.insert((world.to_string(), block));
        self
    }

    /// Disconnect a player by name, returning whether they were online.
    pub fn disconnect(&mut self, name: &str) -> bool {
        let before = self.players.len();
        self.players
            .retain(|player| !player.name.eq_ignore_ascii_case(name));
        before != self.players.len()
    }

    fn register_catalog_entry(&mut self, catalog: &str, entry: CatalogEntry) {
        let entries = self.catalogs.entry(catalog.to_string()).or_default();
        match entries.binary_search_by(|existing| existing.id.cmp(&entry.id)) {
            Ok(index) => entries[index] = entry,
            Err(index) => entries.insert(index, entry),
        }
    }

    fn world_loaded(&self, name: &str) -> bool {
        self.worlds
            .iter()
            .any(|world| world.enabled && world.name == name)
    }
}

impl Server for StaticServer {
    fn worlds(&self) -> Vec<WorldProperties> {
        self.worlds.clone()
    }

    fn online_players(&self) -> Vec<PlayerRef> {
        self.players.clone()
    }

    fn loaded_entities(&self) -> Vec<EntityRef> {
        self.players
            .iter()
            .map(|player| &player.entity)
            .chain(self.entities.iter())
            .filter(|entity| self.world_loaded(&entity.location.world.name))
            .cloned()
            .collect()
    }

    fn catalog_entries(&self, catalog: &str) -> Vec<CatalogEntry> {
        self.catalogs.get(catalog).cloned().unwrap_or_default()
    }

    fn is_air(&self, world: &str, block: IVec3) -> bool {
        !self.solid_blocks.contains(&(world.to_string(), block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Location;
    use glam::DVec3;

    fn entity_in(world: &WorldProperties) -> EntityRef {
        EntityRef {
            uuid: Uuid::new_v4(),
            entity_type: RegistryKey::minecraft("cow").unwrap(),
            location: Location::new(world.clone(), DVec3::ZERO),
            eye_height: 1.3,
            head_direction: DVec3::Z,
        }
    }

    #[test]
    fn vanilla_dimension_types_are_registered() {
        let server = StaticServer::new();
        let ids: Vec<String> = server
            .catalog_entries(DIMENSION_TYPE_CATALOG)
            .into_iter()
            .map(|entry| entry.id.to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["minecraft:nether", "minecraft:overworld", "minecraft:the_end"]
        );
    }

    #[test]
    fn entities_in_disabled_worlds_are_not_loaded() {
        let loaded = WorldProperties::new("world", DimensionType::Overworld.key());
        let unloaded = WorldProperties::new("archive", DimensionType::Overworld.key()).disabled();
        let visible = entity_in(&loaded);
        let server = StaticServer::new()
            .with_world(loaded)
            .with_world(unloaded.clone())
            .with_entity(visible.clone())
            .with_entity(entity_in(&unloaded));
        assert_eq!(server.loaded_entities(), vec![visible.clone()]);
        assert_eq!(server.entity_by_uuid(visible.uuid), Some(visible));
    }

    #[test]
    fn player_lookup_ignores_case_and_tracks_disconnects() {
        let world = WorldProperties::new("world", DimensionType::Overworld.key());
        let mut server = StaticServer::new().with_world(world.clone()).with_player(PlayerRef {
            name: "Notch".into(),
            entity: entity_in(&world),
        });
        assert!(server.player_by_name("notch").is_some());
        assert!(server.disconnect("NOTCH"));
        assert!(server.player_by_name("notch").is_none());
    }

    #[test]
    fn blocks_default_to_air() {
        let server = StaticServer::new().with_solid_block("world", IVec3::new(0, 63, 0));
        assert!(!server.is_air("world", IVec3::new(0, 63, 0)));
        assert!(server.is_air("world", IVec3::new(0, 64, 0)));
        assert!(server.is_air("nether", IVec3::new(0, 63, 0)));
    }
}
