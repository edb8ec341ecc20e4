use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use glam::{DVec3, IVec3};
use mdcommand_core::{
    CatalogEntry, DimensionType, EntityRef, Location, PlayerRef, RegistryKey, Server,
    StaticServer, WorldProperties,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::source::CommandSource;

pub const DEFAULT_STATE_PATH: &str = "config/server.toml";

const PLAYER_EYE_HEIGHT: f64 = 1.62;

/// Live server state the CLI parses against, plus who is running the command.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Registration order matters for `#first`.
    pub worlds: Vec<WorldConfig>,
    pub players: Vec<PlayerConfig>,
    pub entities: Vec<EntityConfig>,
    /// Catalog name to entries.
    pub catalogs: BTreeMap<String, Vec<CatalogEntryConfig>>,
    pub solid_blocks: Vec<BlockConfig>,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    pub name: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub dimension_type: RegistryKey,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub world: String,
    pub position: [f64; 3],
    /// Head direction.
    #[serde(default = "facing_east")]
    pub facing: [f64; 3],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityConfig {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    pub entity_type: RegistryKey,
    pub world: String,
    pub position: [f64; 3],
    #[serde(default = "facing_east")]
    pub facing: [f64; 3],
    #[serde(default)]
    pub eye_height: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogEntryConfig {
    pub id: RegistryKey,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockConfig {
    pub world: String,
    pub position: [i32; 3],
}

/// Who runs the command. A player source is positioned where the player
/// stands and targets along their line of sight; otherwise an explicit
/// world and position may be given. With neither, the source is the console.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub player: Option<String>,
    pub world: Option<String>,
    pub position: Option<[f64; 3]>,
}

fn enabled_by_default() -> bool {
    true
}

fn facing_east() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}

fn vanilla(path: &str) -> RegistryKey {
    RegistryKey::minecraft(path).expect("vanilla ids are valid keys")
}

impl Default for ServerConfig {
    fn default() -> Self {
        let world = |name: &str, dim: DimensionType| WorldConfig {
            name: name.to_string(),
            uuid: None,
            enabled: true,
            dimension_type: dim.key(),
        };
        let blocks = [
            ("stone", "Stone"),
            ("dirt", "Dirt"),
            ("grass", "Grass Block"),
            ("oak_planks", "Oak Planks"),
        ]
        .into_iter()
        .map(|(path, name)| CatalogEntryConfig {
            id: vanilla(path),
            name: name.to_string(),
        })
        .collect();

        Self {
            worlds: vec![
                world("world", DimensionType::Overworld),
                world("world_nether", DimensionType::Nether),
                world("world_the_end", DimensionType::End),
            ],
            players: vec![PlayerConfig {
                name: "Steve".to_string(),
                uuid: None,
                world: "world".to_string(),
                position: [0.5, 64.0, 0.5],
                facing: facing_east(),
            }],
            entities: Vec::new(),
            catalogs: BTreeMap::from([("block_type".to_string(), blocks)]),
            solid_blocks: vec![BlockConfig {
                world: "world".to_string(),
                position: [4, 65, 0],
            }],
            source: SourceConfig {
                player: Some("Steve".to_string()),
                ..SourceConfig::default()
            },
        }
    }
}

impl ServerConfig {
    /// Load server state from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ServerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ServerConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!("Server state not found at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ServerConfig::default()
            }
        }
    }

    /// Build the in-memory server and the command source it describes.
    pub fn build(&self) -> Result<CommandSource> {
        let mut server = StaticServer::new();
        let mut worlds = BTreeMap::new();
        for world in &self.worlds {
            let properties = WorldProperties {
                name: world.name.clone(),
                uuid: world.uuid.unwrap_or_else(Uuid::new_v4),
                enabled: world.enabled,
                dimension_type: world.dimension_type.clone(),
            };
            if worlds
                .insert(world.name.clone(), properties.clone())
                .is_some()
            {
                bail!("world '{}' is registered twice", world.name);
            }
            server = server.with_world(properties);
        }
        let world_named = |name: &str| {
            worlds
                .get(name)
                .cloned()
                .with_context(|| format!("unknown world '{name}'"))
        };

        for player in &self.players {
            let entity = EntityRef {
                uuid: player.uuid.unwrap_or_else(Uuid::new_v4),
                entity_type: vanilla("player"),
                location: Location::new(world_named(&player.world)?, player.position.into()),
                eye_height: PLAYER_EYE_HEIGHT,
                head_direction: player.facing.into(),
            };
            server = server.with_player(PlayerRef {
                name: player.name.clone(),
                entity,
            });
        }

        for entity in &self.entities {
            let uuid = entity.uuid.unwrap_or_else(|| {
                let uuid = Uuid::new_v4();
                debug!(%uuid, entity_type = %entity.entity_type, "assigned entity id");
                uuid
            });
            server = server.with_entity(EntityRef {
                uuid,
                entity_type: entity.entity_type.clone(),
                location: Location::new(world_named(&entity.world)?, entity.position.into()),
                eye_height: entity.eye_height,
                head_direction: entity.facing.into(),
            });
        }

        for (catalog, entries) in &self.catalogs {
            for entry in entries {
                server = server.with_catalog_entry(
                    catalog,
                    CatalogEntry::new(entry.id.clone(), entry.name.clone()),
                );
            }
        }

        for block in &self.solid_blocks {
            world_named(&block.world)?;
            server = server.with_solid_block(&block.world, IVec3::from_array(block.position));
        }

        let source_player = match &self.source.player {
            Some(name) => Some(
                server
                    .player_by_name(name)
                    .with_context(|| format!("source player '{name}' is not online"))?,
            ),
            None => None,
        };

        let mut source = CommandSource::console(server);
        if let Some(player) = source_player {
            source = source
                .at(player.entity.location.clone())
                .targeting(player.entity);
        }
        match (&self.source.world, self.source.position) {
            (Some(world), Some(position)) => {
                source = source.at(Location::new(world_named(world)?, DVec3::from(position)));
            }
            (None, None) => {}
            _ => bail!("source world and position must be set together"),
        }
        Ok(source)
    }
}
