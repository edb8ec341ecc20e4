//! A small, fully deterministic server.
//!
//! Registration order (it matters for `#first`):
//!
//! | world           | dimension | enabled |
//! |-----------------|-----------|---------|
//! | `archive`       | overworld | no      |
//! | `world`         | overworld | yes     |
//! | `world_nether`  | nether    | yes     |
//! | `nether_mining` | nether    | yes     |
//! | `world_the_end` | the_end   | yes     |
//!
//! `Notch` stands at (0.5, 64, 0.5) in `world` looking along +X at a stone
//! block at (5, 65, 0). `jeb_` is in `world_nether`. One zombie with
//! [`ZOMBIE_UUID`] stands in `world`.

use glam::{DVec3, IVec3};
use mdcommand_core::{
    CatalogEntry, DimensionType, EntityRef, Location, PlayerRef, RegistryKey, Server,
    StaticServer, WorldProperties,
};
use uuid::Uuid;

/// Id of the fixture zombie.
pub const ZOMBIE_UUID: Uuid = Uuid::from_u128(0x5a5a_0000_0000_4000_8000_0000_0000_0001);
/// Id of the `Notch` player entity.
pub const NOTCH_UUID: Uuid = Uuid::from_u128(0x0690_0000_0000_4000_8000_0000_0000_0002);
/// Id of the `jeb_` player entity.
pub const JEB_UUID: Uuid = Uuid::from_u128(0x0690_0000_0000_4000_8000_0000_0000_0003);

/// Standing eye height of a player.
pub const PLAYER_EYE_HEIGHT: f64 = 1.62;

/// Catalog of block types registered by [`fixture_server`].
pub const BLOCK_TYPE_CATALOG: &str = "block_type";

fn key(raw: &str) -> RegistryKey {
    RegistryKey::parse(raw).expect("fixture keys are valid")
}

fn world(name: &str, dim: DimensionType, index: u128) -> WorldProperties {
    WorldProperties {
        name: name.to_string(),
        uuid: Uuid::from_u128(0x7700_0000_0000_4000_8000_0000_0000_0000 + index),
        enabled: true,
        dimension_type: dim.key(),
    }
}

fn player(name: &str, uuid: Uuid, world: &WorldProperties, position: DVec3) -> PlayerRef {
    PlayerRef {
        name: name.to_string(),
        entity: EntityRef {
            uuid,
            entity_type: key("minecraft:player"),
            location: Location::new(world.clone(), position),
            eye_height: PLAYER_EYE_HEIGHT,
            head_direction: DVec3::X,
        },
    }
}

/// The fixture server described in the module docs.
pub fn fixture_server() -> StaticServer {
    let archive = world("archive", DimensionType::Overworld, 0).disabled();
    let overworld = world("world", DimensionType::Overworld, 1);
    let nether = world("world_nether", DimensionType::Nether, 2);
    let mining = world("nether_mining", DimensionType::Nether, 3);
    let end = world("world_the_end", DimensionType::End, 4);

    let zombie = EntityRef {
        uuid: ZOMBIE_UUID,
        entity_type: key("minecraft:zombie"),
        location: Location::new(overworld.clone(), DVec3::new(10.0, 64.0, 10.0)),
        eye_height: 1.74,
        head_direction: DVec3::NEG_Z,
    };

    let mut server = StaticServer::new()
        .with_player(player(
            "Notch",
            NOTCH_UUID,
            &overworld,
            DVec3::new(0.5, 64.0, 0.5),
        ))
        .with_player(player("jeb_", JEB_UUID, &nether, DVec3::new(8.0, 70.0, 8.0)))
        .with_entity(zombie)
        .with_solid_block("world", IVec3::new(5, 65, 0));

    for world in [archive, overworld, nether, mining, end] {
        server = server.with_world(world);
    }
    for (id, name) in [
        ("minecraft:stone", "Stone"),
        ("minecraft:dirt", "Dirt"),
        ("minecraft:grass", "Grass Block"),
        ("minecraft:stone_bricks", "Stone Bricks"),
        ("amod:stone_tiles", "Stone Tiles"),
    ] {
        server = server.with_catalog_entry(BLOCK_TYPE_CATALOG, CatalogEntry::new(key(id), name));
    }
    server
}

/// Registered fixture world by name.
///
/// Panics if the name is not one of the fixture worlds.
pub fn fixture_world(name: &str) -> WorldProperties {
    fixture_server()
        .world_by_name(name)
        .unwrap_or_else(|| panic!("no fixture world named {name}"))
}
