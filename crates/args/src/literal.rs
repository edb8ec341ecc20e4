//! Fixed word sequences.

use mdcommand_core::{CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind, ParameterBuildError};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

/// Expects one or more exact words (ignoring case) and yields a fixed value.
pub struct Literal<T> {
    words: Vec<String>,
    value: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T> Literal<T> {
    /// `literal` is split on whitespace; each word consumes one token.
    pub fn new<F>(literal: &str, value: F) -> Result<Self, ParameterBuildError>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let words: Vec<String> = literal.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            return Err(ParameterBuildError::EmptyLiteral);
        }
        Ok(Self {
            words,
            value: Box::new(value),
        })
    }
}

impl<T> ValueParameter for Literal<T> {
    type Value = T;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<T, ArgumentError> {
        for expected in &self.words {
            let input = args.next()?;
            if !input.eq_ignore_ascii_case(expected) {
                return Err(args.error(ArgumentErrorKind::LiteralMismatch {
                    input,
                    expected: expected.clone(),
                }));
            }
        }
        Ok((self.value)())
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        for expected in &self.words {
            let Some(input) = args.next_if_present() else {
                break;
            };
            if args.has_next() {
                if !input.eq_ignore_ascii_case(expected) {
                    break;
                }
            } else if expected.to_lowercase().starts_with(&input.to_lowercase()) {
                return vec![expected.clone()];
            } else {
                break;
            }
        }
        Vec::new()
    }

    fn usage(&self, _key: &str, _ctx: &dyn CommandContext) -> String {
        self.words.join(" ")
    }
}

impl<T> CatalogedValueParameter for Literal<T> {
    fn id(&self) -> RegistryKey {
        builtin_id("literal")
    }

    fn name(&self) -> &str {
        "Literal"
    }
}
