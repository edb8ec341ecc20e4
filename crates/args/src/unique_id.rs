//! Universally unique identifiers.

use mdcommand_core::{CommandContext, RegistryKey};
use uuid::Uuid;

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

/// A UUID in hyphenated, simple, braced or URN form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidParameter;

impl ValueParameter for UuidParameter {
    type Value = Uuid;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Uuid, ArgumentError> {
        let token = args.next()?;
        Uuid::parse_str(&token).map_err(|_| args.error(ArgumentErrorKind::InvalidUuid(token)))
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        args.next_if_present();
        Vec::new()
    }
}

impl CatalogedValueParameter for UuidParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("uuid")
    }

    fn name(&self) -> &str {
        "UUID"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdcommand_testkit::TestContext;

    #[test]
    fn parses_hyphenated_and_simple() {
        let ctx = TestContext::console();
        let expected = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        for raw in [
            "01234567-89ab-cdef-0123-456789abcdef",
            "0123456789ABCDEF0123456789ABCDEF",
        ] {
            let mut args = CommandArgs::parse(raw).unwrap();
            assert_eq!(UuidParameter.parse(&ctx, &mut args), Ok(expected));
        }
    }

    #[test]
    fn rejects_malformed() {
        let ctx = TestContext::console();
        let mut args = CommandArgs::parse("not-a-uuid").unwrap();
        assert_eq!(
            UuidParameter.parse(&ctx, &mut args).unwrap_err().into_kind(),
            ArgumentErrorKind::InvalidUuid("not-a-uuid".into())
        );
    }
}
