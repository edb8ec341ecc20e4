//! The contract every argument parser implements.

use mdcommand_core::{CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::ArgumentError;

/// Namespace of the built-in parameter catalog ids.
pub const BUILTIN_NAMESPACE: &str = "mdcommand";

/// A typed parser over the shared token cursor, with tab-completion over the
/// same grammar.
pub trait ValueParameter {
    /// What a successful parse produces.
    type Value;

    /// Consume the tokens this parameter claims and produce its value.
    ///
    /// On failure the cursor may have moved; callers that want to try
    /// something else must snapshot and restore it themselves.
    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Self::Value, ArgumentError>;

    /// Candidate continuations for the in-progress token. Never fails: input
    /// that cannot be completed yields an empty list.
    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String>;

    /// Usage text for this parameter, given the key it is registered under.
    fn usage(&self, key: &str, _ctx: &dyn CommandContext) -> String {
        key.to_string()
    }
}

/// A parameter kind with a stable catalog id.
pub trait CatalogedValueParameter: ValueParameter {
    /// Stable id, e.g. `mdcommand:color`.
    fn id(&self) -> RegistryKey;

    /// Human-readable name.
    fn name(&self) -> &str;
}

impl<P: ValueParameter + ?Sized> ValueParameter for Box<P> {
    type Value = P::Value;

    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Self::Value, ArgumentError> {
        (**self).parse(ctx, args)
    }

    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        (**self).complete(ctx, args)
    }

    fn usage(&self, key: &str, ctx: &dyn CommandContext) -> String {
        (**self).usage(key, ctx)
    }
}

/// Three-valued switch; `Undefined` defers to the parameter's own policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tristate {
    /// Forced on.
    True,
    /// Forced off.
    False,
    /// Parameter decides.
    #[default]
    Undefined,
}

pub(crate) fn builtin_id(path: &str) -> RegistryKey {
    RegistryKey::new(BUILTIN_NAMESPACE, path).expect("built-in parameter ids are valid keys")
}

/// Case-insensitive prefix filter, sorted ascending and de-duplicated.
pub fn complete_prefix<I, S>(candidates: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let prefix = prefix.to_lowercase();
    let mut matches: Vec<String> = candidates
        .into_iter()
        .map(Into::into)
        .filter(|candidate| candidate.to_lowercase().starts_with(&prefix))
        .collect();
    matches.sort();
    matches.dedup();
    tracing::trace!(prefix = %prefix, count = matches.len(), "completion candidates");
    matches
}
