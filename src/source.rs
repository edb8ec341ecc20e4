use mdcommand_core::{CommandContext, EntityRef, Location, Server, StaticServer};

/// The source running a CLI command: the console, or a positioned player.
#[derive(Debug, Clone)]
pub struct CommandSource {
    server: StaticServer,
    location: Option<Location>,
    target: Option<EntityRef>,
}

impl CommandSource {
    pub fn console(server: StaticServer) -> Self {
        Self {
            server,
            location: None,
            target: None,
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn targeting(mut self, entity: EntityRef) -> Self {
        self.target = Some(entity);
        self
    }
}

impl CommandContext for CommandSource {
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
