//! Ambient context of a single command invocation.

use crate::server::Server;
use crate::world::{EntityRef, Location};

/// What the parsers may know about whoever invoked the command.
///
/// Passed explicitly into every parse and completion call; parsers never look
/// this up globally.
pub trait CommandContext {
    /// Live state to resolve choices against.
    fn server(&self) -> &dyn Server;

    /// Where the source is standing, if it has a position (players, command
    /// blocks). Consoles have none.
    fn location(&self) -> Option<Location> {
        None
    }

    /// The entity whose line of sight `#target` follows.
    fn entity_target(&self) -> Option<EntityRef> {
        None
    }
}
