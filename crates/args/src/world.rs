//! Registered worlds, by name, pattern or `#` selector.

use mdcommand_core::{
    CommandContext, RegistryKey, WorldProperties, DIMENSION_TYPE_CATALOG,
};
use tracing::debug;

use crate::args::CommandArgs;
use crate::catalog::CatalogTypeParameter;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, complete_prefix, CatalogedValueParameter, ValueParameter};
use crate::pattern::{NotFound, PatternMatcher, PatternMatching};

const SELECTOR_PREFIX: char = '#';
const FIRST: &str = "first";
const ME: &str = "me";

/// Matches the names of all registered worlds, disabled ones included.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldMatcher;

impl PatternMatcher for WorldMatcher {
    type Value = WorldProperties;
    const ID: &'static str = "world";
    const NAME: &'static str = "World";

    fn choices(&self, ctx: &dyn CommandContext) -> Vec<String> {
        ctx.server()
            .worlds()
            .into_iter()
            .map(|world| world.name)
            .collect()
    }

    fn resolve(
        &self,
        choice: &str,
        ctx: &dyn CommandContext,
    ) -> Result<WorldProperties, NotFound> {
        ctx.server()
            .world_by_name(choice)
            .ok_or_else(|| NotFound(format!("World {choice} is no longer registered")))
    }

    fn no_match_message(&self, input: &str) -> String {
        format!("No world matches '{input}'")
    }
}

/// One world or a group of them.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSelection {
    /// Exactly one world was named.
    Single(WorldProperties),
    /// A pattern or dimension selector; may be empty.
    Multiple(Vec<WorldProperties>),
}

impl WorldSelection {
    fn from_matches(mut worlds: Vec<WorldProperties>) -> Self {
        match worlds.len() {
            1 => Self::Single(worlds.remove(0)),
            _ => Self::Multiple(worlds),
        }
    }

    /// Number of selected worlds.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multiple(worlds) => worlds.len(),
        }
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected world if there is exactly one, otherwise the count.
    pub fn into_single(self) -> Result<WorldProperties, usize> {
        match self {
            Self::Single(world) => Ok(world),
            Self::Multiple(mut worlds) if worlds.len() == 1 => Ok(worlds.remove(0)),
            Self::Multiple(worlds) => Err(worlds.len()),
        }
    }

    /// Every selected world, in registration order.
    pub fn into_vec(self) -> Vec<WorldProperties> {
        match self {
            Self::Single(world) => vec![world],
            Self::Multiple(worlds) => worlds,
        }
    }
}

/// World reference.
///
/// Besides names and name patterns, a token starting with `#` selects:
///
/// - `#first`: the first enabled world (nothing, if none is enabled)
/// - `#me`: the source's own world
/// - `#<dimension type>`: every enabled world of that dimension type
/// - `#<dimension type>:first`: the first of those (fails if there is none)
#[derive(Debug, Clone)]
pub struct WorldPropertiesParameter {
    worlds: PatternMatching<WorldMatcher>,
    dimensions: CatalogTypeParameter,
}

impl Default for WorldPropertiesParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldPropertiesParameter {
    /// World parameter resolving dimension selectors against the
    /// `dimension_type` catalog.
    pub fn new() -> Self {
        Self {
            worlds: PatternMatching::with_matcher(WorldMatcher),
            dimensions: CatalogTypeParameter::new(DIMENSION_TYPE_CATALOG),
        }
    }

    fn parse_selector(
        &self,
        selector: &str,
        ctx: &dyn CommandContext,
        args: &CommandArgs,
    ) -> Result<WorldSelection, ArgumentError> {
        let mut enabled = ctx.server().worlds().into_iter().filter(|world| world.enabled);

        if selector.eq_ignore_ascii_case(FIRST) {
            return Ok(enabled
                .next()
                .map_or(WorldSelection::Multiple(Vec::new()), WorldSelection::Single));
        }

        if selector.eq_ignore_ascii_case(ME) {
            return ctx
                .location()
                .map(|location| WorldSelection::Single(location.world))
                .ok_or_else(|| args.error(ArgumentErrorKind::NoContextPosition));
        }

        let (dimension, first_only) = match selector.rsplit_once(':') {
            Some((dimension, qualifier)) if qualifier.eq_ignore_ascii_case(FIRST) => {
                (dimension, true)
            }
            _ => (selector, false),
        };

        let mut dimension_args = CommandArgs::lenient(dimension);
        let dimension_types: Vec<RegistryKey> = self
            .dimensions
            .parse(ctx, &mut dimension_args)
            .map_err(|err| args.error(err.into_kind()))?
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        debug!(selector, ?dimension_types, "world selector resolved dimension types");

        let mut matched = enabled.filter(|world| dimension_types.contains(&world.dimension_type));
        if first_only {
            matched.next().map(WorldSelection::Single).ok_or_else(|| {
                args.error(ArgumentErrorKind::NotFound(format!(
                    "No enabled world has dimension type '{dimension}'"
                )))
            })
        } else {
            Ok(WorldSelection::Multiple(matched.collect()))
        }
    }
}

impl ValueParameter for WorldPropertiesParameter {
    type Value = WorldSelection;

    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<WorldSelection, ArgumentError> {
        if let Some(selector) = args.peek()?.strip_prefix(SELECTOR_PREFIX) {
            let selector = selector.to_string();
            args.next()?;
            return self.parse_selector(&selector, ctx, args);
        }
        self.worlds
            .parse(ctx, args)
            .map(WorldSelection::from_matches)
    }

    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let state = args.snapshot();
        match args.next_if_present() {
            Some(token) if token.starts_with(SELECTOR_PREFIX) => {
                let dimensions = ctx
                    .server()
                    .catalog_entries(DIMENSION_TYPE_CATALOG)
                    .into_iter()
                    .map(|entry| format!("{SELECTOR_PREFIX}{}", entry.id.path()));
                let selectors = [FIRST, ME].map(|name| format!("{SELECTOR_PREFIX}{name}"));
                complete_prefix(selectors.into_iter().chain(dimensions), &token)
            }
            _ => {
                args.restore(state);
                self.worlds.complete(ctx, args)
            }
        }
    }
}

impl CatalogedValueParameter for WorldPropertiesParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("world_properties")
    }

    fn name(&self) -> &str {
        "World properties"
    }
}
