//! Three-dimensional positions, absolute or relative to the source.

use glam::DVec3;
use mdcommand_core::{CommandContext, EntityRef, RegistryKey};
use tracing::debug;

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, complete_prefix, CatalogedValueParameter, ValueParameter};
use crate::raycast::raycast;

/// How far `#target` traces along the target's line of sight.
pub const DEFAULT_TARGET_DISTANCE: f64 = 128.0;

/// Longest `#target` trace a parameter can be configured with.
pub const MAX_TARGET_DISTANCE: f64 = 1024.0;

const TARGET_SELECTOR: &str = "#target";
const ME_SELECTOR: &str = "#me";

/// Parses `x y z`, `x,y,z`, `#target` or `#me`.
///
/// Any component may be relative: `~` is the source's own coordinate and
/// `~n` offsets it by `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3dParameter {
    max_target_distance: f64,
}

impl Default for Vector3dParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl Vector3dParameter {
    /// Parameter tracing `#target` up to [`DEFAULT_TARGET_DISTANCE`] blocks.
    pub fn new() -> Self {
        Self {
            max_target_distance: DEFAULT_TARGET_DISTANCE,
        }
    }

    /// Override the `#target` trace distance, clamped to
    /// `0..=`[`MAX_TARGET_DISTANCE`]. NaN counts as zero.
    pub fn with_target_distance(mut self, blocks: f64) -> Self {
        self.max_target_distance = if blocks.is_nan() {
            0.0
        } else {
            blocks.clamp(0.0, MAX_TARGET_DISTANCE)
        };
        self
    }

    fn targeted_block(&self, target: &EntityRef, ctx: &dyn CommandContext) -> Option<DVec3> {
        let world = target.location.world.name.as_str();
        raycast(
            target.eye_position(),
            target.head_direction,
            self.max_target_distance,
            |block| !ctx.server().is_air(world, block),
        )
        .map(|hit| hit.block.as_dvec3())
    }

    fn components(
        parts: [&str; 3],
        ctx: &dyn CommandContext,
        args: &CommandArgs,
    ) -> Result<DVec3, ArgumentError> {
        let mut vector = DVec3::ZERO;
        for (axis, part) in parts.into_iter().enumerate() {
            vector[axis] = relative_double(part, axis, ctx, args)?;
        }
        Ok(vector)
    }
}

fn relative_double(
    raw: &str,
    axis: usize,
    ctx: &dyn CommandContext,
    args: &CommandArgs,
) -> Result<f64, ArgumentError> {
    let Some(offset) = raw.strip_prefix('~') else {
        return plain_double(raw, args);
    };
    let base = ctx
        .location()
        .ok_or_else(|| args.error(ArgumentErrorKind::NoContextPosition))?
        .position[axis];
    if offset.is_empty() {
        Ok(base)
    } else {
        Ok(base + plain_double(offset, args)?)
    }
}

fn plain_double(raw: &str, args: &CommandArgs) -> Result<f64, ArgumentError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| args.error(ArgumentErrorKind::NotADouble(raw.to_string())))
}

impl ValueParameter for Vector3dParameter {
    type Value = DVec3;

    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<DVec3, ArgumentError> {
        let x = args.next()?;

        if x.contains(',') {
            let parts: Vec<&str> = x.split(',').collect();
            let &[px, py, pz] = parts.as_slice() else {
                return Err(args.error(ArgumentErrorKind::WrongComponentCount {
                    expected: 3,
                    found: parts.len(),
                }));
            };
            return Self::components([px, py, pz], ctx, args);
        }

        if x == TARGET_SELECTOR {
            if let Some(target) = ctx.entity_target() {
                debug!(entity = %target.uuid, "tracing line of sight for #target");
                return self
                    .targeted_block(&target, ctx)
                    .ok_or_else(|| args.error(ArgumentErrorKind::NoTargetBlock));
            }
        }

        if x.eq_ignore_ascii_case(ME_SELECTOR) {
            if let Some(location) = ctx.location() {
                debug!(position = %location.position, "#me resolved to source position");
                return Ok(location.position);
            }
        }

        let y = args.next()?;
        let z = args.next()?;
        Self::components([&x, &y, &z], ctx, args)
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let mut current = args.next_if_present();
        if current
            .as_deref()
            .is_some_and(|token| !token.starts_with('#') && !token.contains(','))
        {
            for _ in 0..2 {
                if args.has_next() {
                    current = args.next_if_present();
                }
            }
        }

        match current {
            Some(token) if token.starts_with('#') => {
                complete_prefix([TARGET_SELECTOR, ME_SELECTOR], &token)
            }
            Some(token) if !token.is_empty() => vec![token],
            _ => Vec::new(),
        }
    }
}

impl CatalogedValueParameter for Vector3dParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("vector3d")
    }

    fn name(&self) -> &str {
        "Vector3d"
    }
}
