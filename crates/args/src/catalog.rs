//! Values from a named catalog (block types, dimension types, ...).

use mdcommand_core::{CatalogEntry, CommandContext, RegistryKey, DEFAULT_NAMESPACE};

use crate::pattern::{NotFound, PatternMatcher, PatternMatching};

/// Matches ids of one catalog. `stone` and `minecraft:stone` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatcher {
    catalog: String,
}

impl CatalogMatcher {
    /// Matcher over the entries of `catalog`.
    pub fn new(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    /// Catalog name.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }
}

impl PatternMatcher for CatalogMatcher {
    type Value = CatalogEntry;
    const ID: &'static str = "catalog_type";
    const NAME: &'static str = "Catalog type";

    fn choices(&self, ctx: &dyn CommandContext) -> Vec<String> {
        ctx.server()
            .catalog_entries(&self.catalog)
            .into_iter()
            .map(|entry| entry.id.to_string())
            .collect()
    }

    fn resolve(&self, choice: &str, ctx: &dyn CommandContext) -> Result<CatalogEntry, NotFound> {
        RegistryKey::parse(choice)
            .ok()
            .and_then(|id| ctx.server().catalog_entry(&self.catalog, &id))
            .ok_or_else(|| NotFound(format!("No {} entry with id '{choice}'", self.catalog)))
    }

    fn exact_candidates(&self, input: &str) -> Vec<String> {
        let mut candidates = vec![input.to_lowercase()];
        if !input.contains(':') {
            candidates.push(format!("{DEFAULT_NAMESPACE}:{}", input.to_lowercase()));
        }
        candidates
    }

    fn match_targets<'c>(&self, choice: &'c str) -> Vec<&'c str> {
        match choice.split_once(':') {
            Some((_, path)) => vec![choice, path],
            None => vec![choice],
        }
    }

    fn no_match_message(&self, input: &str) -> String {
        format!("No {} entries match '{input}'", self.catalog)
    }
}

/// Pattern-matched entries of a catalog.
pub type CatalogTypeParameter = PatternMatching<CatalogMatcher>;

impl CatalogTypeParameter {
    /// Parameter over the entries of `catalog`.
    pub fn new(catalog: impl Into<String>) -> Self {
        Self::with_matcher(CatalogMatcher::new(catalog))
    }
}
