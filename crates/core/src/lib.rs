#![warn(missing_docs)]
//! Domain values shared by the command argument parsers.
//!
//! Parsers never reach into global server state: everything they resolve
//! against (worlds, players, entities, catalogs, blocks) is queried through the
//! [`Server`] trait, which hosts implement and tests fake with [`StaticServer`].

pub mod color;
pub mod context;
pub mod dimension;
pub mod registry;
pub mod server;
pub mod world;

// Re-export commonly used types
pub use color::{Color, NAMED_COLORS};
pub use context::CommandContext;
pub use dimension::{DimensionType, DIMENSION_TYPE_CATALOG};
pub use registry::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE};
pub use server::{CatalogEntry, Server, StaticServer};
pub use world::{EntityRef, Location, PlayerRef, WorldProperties};
