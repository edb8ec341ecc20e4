//! A configurable command source.

use mdcommand_core::{CommandContext, EntityRef, Location, Server, StaticServer};

use crate::fixtures::fixture_server;

/// Command source with an explicit server, position and target.
#[derive(Debug, Clone)]
pub struct TestContext {
    server: StaticServer,
    location: Option<Location>,
    target: Option<EntityRef>,
}

impl TestContext {
    /// Source over `server` with no position and no target.
    pub fn new(server: StaticServer) -> Self {
        Self {
            server,
            location: None,
            target: None,
        }
    }

    /// The console: the fixture server, no position, no target.
    pub fn console() -> Self {
        Self::new(fixture_server())
    }

    /// A fixture player as the source: positioned where they stand and
    /// targeting along their own line of sight.
    ///
    /// Panics if the player is not online.
    pub fn player(name: &str) -> Self {
        let server = fixture_server();
        let player = server
            .player_by_name(name)
            .unwrap_or_else(|| panic!("no fixture player named {name}"));
        Self::new(server)
            .at(player.entity.location.clone())
            .targeting(player.entity)
    }

    /// Give the source a position.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Give the source a target entity.
    pub fn targeting(mut self, entity: EntityRef) -> Self {
        self.target = Some(entity);
        self
    }

    /// Mutate live state between calls (players leaving, worlds appearing).
    pub fn server_mut(&mut self) -> &mut StaticServer {
        &mut self.server
    }
}

impl CommandContext for TestContext {
    fn server(&self) -> &dyn Server {
        &self.server
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn entity_target(&self) -> Option<EntityRef> {
        self.target.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::NOTCH_UUID;

    #[test]
    fn player_context_is_positioned_and_targeting() {
        let ctx = TestContext::player("notch");
        let location = ctx.location().expect("player has a location");
        assert_eq!(location.world.name, "world");
        assert_eq!(ctx.entity_target().map(|e| e.uuid), Some(NOTCH_UUID));
    }

    #[test]
    fn console_has_no_position() {
        let ctx = TestContext::console();
        assert!(ctx.location().is_none());
        assert!(ctx.entity_target().is_none());
        assert_eq!(ctx.server().worlds().len(), 5);
    }
}
