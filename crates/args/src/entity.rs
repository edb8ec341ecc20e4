//! Live entities and online players.

use mdcommand_core::{CommandContext, EntityRef, PlayerRef};
use uuid::Uuid;

use crate::pattern::{NotFound, PatternMatcher, PatternMatching};

/// Matches the UUIDs of entities in loaded worlds.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMatcher;

impl PatternMatcher for EntityMatcher {
    type Value = EntityRef;
    const ID: &'static str = "entity";
    const NAME: &'static str = "Entity";

    fn choices(&self, ctx: &dyn CommandContext) -> Vec<String> {
        ctx.server()
            .loaded_entities()
            .into_iter()
            .map(|entity| entity.uuid.to_string())
            .collect()
    }

    fn resolve(&self, choice: &str, ctx: &dyn CommandContext) -> Result<EntityRef, NotFound> {
        Uuid::parse_str(choice)
            .ok()
            .and_then(|uuid| ctx.server().entity_by_uuid(uuid))
            .ok_or_else(|| NotFound(format!("Entity {choice} is no longer loaded")))
    }

    fn no_match_message(&self, input: &str) -> String {
        format!("No loaded entity matches '{input}'")
    }
}

/// Matches the names of connected players.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerMatcher;

impl PatternMatcher for PlayerMatcher {
    type Value = PlayerRef;
    const ID: &'static str = "player";
    const NAME: &'static str = "Player";

    fn choices(&self, ctx: &dyn CommandContext) -> Vec<String> {
        ctx.server()
            .online_players()
            .into_iter()
            .map(|player| player.name)
            .collect()
    }

    fn resolve(&self, choice: &str, ctx: &dyn CommandContext) -> Result<PlayerRef, NotFound> {
        ctx.server()
            .player_by_name(choice)
            .ok_or_else(|| NotFound(format!("Player {choice} is not online")))
    }

    fn no_match_message(&self, input: &str) -> String {
        format!("No online player matches '{input}'")
    }
}

/// Pattern-matched loaded entities.
pub type EntityParameter = PatternMatching<EntityMatcher>;

/// Pattern-matched online players.
pub type PlayerParameter = PatternMatching<PlayerMatcher>;

impl EntityParameter {
    /// Entity parameter.
    pub fn new() -> Self {
        Self::with_matcher(EntityMatcher)
    }
}

impl PlayerParameter {
    /// Player parameter.
    pub fn new() -> Self {
        Self::with_matcher(PlayerMatcher)
    }
}
