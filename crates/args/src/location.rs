//! A world plus a position in it.

use glam::DVec3;
use mdcommand_core::{CommandContext, Location, RegistryKey};
use tracing::debug;

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};
use crate::vector::Vector3dParameter;
use crate::world::{WorldPropertiesParameter, WorldSelection};

/// `[world] <vector>`.
///
/// The world is optional when the source has a location: if the leading
/// tokens do not parse as a world, they are re-read as a vector in the
/// source's own world. When both readings fail, the world failure is reported.
/// A world selector must select exactly one world.
#[derive(Debug, Clone)]
pub struct LocationParameter<W = WorldPropertiesParameter, V = Vector3dParameter> {
    world: W,
    vector: V,
}

impl LocationParameter {
    /// Location over the built-in world and vector parsers.
    pub fn new() -> Self {
        Self::with_parsers(WorldPropertiesParameter::new(), Vector3dParameter::new())
    }
}

impl Default for LocationParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, V> LocationParameter<W, V> {
    /// Location over custom world and vector parsers.
    pub fn with_parsers(world: W, vector: V) -> Self {
        Self { world, vector }
    }
}

impl<W, V> ValueParameter for LocationParameter<W, V>
where
    W: ValueParameter<Value = WorldSelection>,
    V: ValueParameter<Value = DVec3>,
{
    type Value = Location;

    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Location, ArgumentError> {
        let state = args.snapshot();

        let world_err = match self.world.parse(ctx, args) {
            Ok(selection) => {
                let world = match selection.into_single() {
                    Ok(world) => world,
                    Err(count) => {
                        let err = args.error(ArgumentErrorKind::AmbiguousWorldSelection(count));
                        args.restore(state);
                        return Err(err);
                    }
                };
                return match self.vector.parse(ctx, args) {
                    Ok(position) => Ok(Location::new(world, position)),
                    Err(err) => {
                        args.restore(state);
                        Err(err)
                    }
                };
            }
            Err(err) => err,
        };

        args.restore(state);
        let Some(fallback) = ctx.location() else {
            return Err(args.error(ArgumentErrorKind::NoFallbackWorld));
        };
        debug!(
            world = %fallback.world.name,
            error = %world_err,
            "no world parsed, reading a vector in the source's world"
        );

        match self.vector.parse(ctx, args) {
            Ok(position) => Ok(Location::new(fallback.world, position)),
            Err(vector_err) => {
                debug!(error = %vector_err, "vector fallback failed too");
                args.restore(state);
                Err(world_err)
            }
        }
    }

    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let state = args.snapshot();

        args.next_if_present();
        let world_then_more = args.has_next();
        args.restore(state);
        if world_then_more && self.world.parse(ctx, args).is_ok() {
            return self.vector.complete(ctx, args);
        }

        args.restore(state);
        let worlds = self.world.complete(ctx, args);
        if !worlds.is_empty() {
            return worlds;
        }

        args.restore(state);
        self.vector.complete(ctx, args)
    }
}

impl<W, V> CatalogedValueParameter for LocationParameter<W, V>
where
    W: ValueParameter<Value = WorldSelection>,
    V: ValueParameter<Value = DVec3>,
{
    fn id(&self) -> RegistryKey {
        builtin_id("location")
    }

    fn name(&self) -> &str {
        "Location"
    }
}
