//! Dimension types.
//!
//! Every world is backed by a dimension type from the `dimension_type` catalog.
//! The vanilla three are provided here so hosts and fixtures register the same
//! ids; modded dimension types are plain catalog entries.

use crate::registry::RegistryKey;

/// Catalog name under which dimension types are registered.
pub const DIMENSION_TYPE_CATALOG: &str = "dimension_type";

/// Vanilla dimension types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionType {
    /// The Overworld dimension.
    Overworld,
    /// The Nether dimension.
    Nether,
    /// The End dimension.
    End,
}

impl DimensionType {
    /// All vanilla dimension types in registration order.
    pub const ALL: [Self; 3] = [Self::Overworld, Self::Nether, Self::End];

    /// Path of the catalog id (namespace is always `minecraft`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "the_end",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Overworld => "Overworld",
            Self::Nether => "Nether",
            Self::End => "The End",
        }
    }

    /// Catalog id, e.g. `minecraft:nether`.
    pub fn key(self) -> RegistryKey {
        RegistryKey::minecraft(self.as_str()).expect("vanilla dimension paths are valid keys")
    }

    /// Look up a vanilla dimension type by catalog id.
    pub fn from_key(key: &RegistryKey) -> Option<Self> {
        if key.namespace() != crate::DEFAULT_NAMESPACE {
            return None;
        }
        Self::ALL.into_iter().find(|dim| dim.as_str() == key.path())
    }
}

impl Default for DimensionType {
    fn default() -> Self {
        Self::Overworld
    }
}
