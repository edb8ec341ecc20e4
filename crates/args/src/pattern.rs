//! Matching free text against a dynamically enumerated candidate set.
//!
//! Matching policy:
//!
//! 1. A candidate equal to the input (ignoring case) wins alone.
//! 2. Otherwise the input is a case-insensitive regex anchored at the start of
//!    each candidate; every candidate it matches is selected. Input that is not
//!    a valid regex is matched as a plain prefix instead.
//!
//! Selected candidates are resolved in candidate order. A candidate that no
//! longer resolves (it disappeared between enumeration and resolution) is
//! skipped; the parse fails only if none resolve.

use mdcommand_core::{CommandContext, RegistryKey};
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::debug;

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

const PATTERN_SIZE_LIMIT: usize = 64 * 1024;

/// A matched candidate could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NotFound(pub String);

/// Supplies candidates and resolves the ones that match.
pub trait PatternMatcher {
    /// Resolved value of one candidate.
    type Value;

    /// Path of the parameter id in the built-in namespace.
    const ID: &'static str;

    /// Human-readable parameter name.
    const NAME: &'static str;

    /// Current candidates, recomputed on every call.
    fn choices(&self, ctx: &dyn CommandContext) -> Vec<String>;

    /// Turn a selected candidate into its value.
    fn resolve(&self, choice: &str, ctx: &dyn CommandContext) -> Result<Self::Value, NotFound>;

    /// Spellings of `input` to try in the exact-match step.
    fn exact_candidates(&self, input: &str) -> Vec<String> {
        vec![input.to_string()]
    }

    /// Strings of `choice` that patterns and completion prefixes are tested against.
    fn match_targets<'c>(&self, choice: &'c str) -> Vec<&'c str> {
        vec![choice]
    }

    /// Failure message when nothing matches `input`.
    fn no_match_message(&self, input: &str) -> String {
        format!("No values matching pattern '{input}' present")
    }
}

enum Pattern {
    Regex(Regex),
    Prefix(String),
}

impl Pattern {
    fn compile(input: &str) -> Self {
        let built = RegexBuilder::new(&format!("^(?:{input})"))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build();
        match built {
            Ok(regex) => Self::Regex(regex),
            Err(err) => {
                debug!(input, error = %err, "pattern is not a regex, matching as prefix");
                Self::Prefix(input.to_lowercase())
            }
        }
    }

    fn is_match(&self, target: &str) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(target),
            Self::Prefix(prefix) => target.to_lowercase().starts_with(prefix),
        }
    }
}

/// Generic [`ValueParameter`] over a [`PatternMatcher`]. Parses one token into
/// every value it selects (at least one).
#[derive(Debug, Clone, Default)]
pub struct PatternMatching<M> {
    matcher: M,
}

impl<M> PatternMatching<M> {
    /// Wrap a matcher.
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// The wrapped matcher.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }
}

impl<M: PatternMatcher> PatternMatching<M> {
    /// Candidates selected by `input`, in candidate order.
    pub fn select(&self, input: &str, ctx: &dyn CommandContext) -> Vec<String> {
        let choices = self.matcher.choices(ctx);

        for spelling in self.matcher.exact_candidates(input) {
            if let Some(exact) = choices
                .iter()
                .find(|choice| choice.eq_ignore_ascii_case(&spelling))
            {
                return vec![exact.clone()];
            }
        }

        let pattern = Pattern::compile(input);
        choices
            .into_iter()
            .filter(|choice| {
                self.matcher
                    .match_targets(choice)
                    .iter()
                    .any(|target| pattern.is_match(target))
            })
            .collect()
    }
}

impl<M: PatternMatcher> ValueParameter for PatternMatching<M> {
    type Value = Vec<M::Value>;

    fn parse(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Vec<M::Value>, ArgumentError> {
        let input = args.next()?;
        let selected = self.select(&input, ctx);
        if selected.is_empty() {
            return Err(args.error(ArgumentErrorKind::NotFound(
                self.matcher.no_match_message(&input),
            )));
        }

        let mut values = Vec::with_capacity(selected.len());
        let mut last_miss = None;
        for choice in &selected {
            match self.matcher.resolve(choice, ctx) {
                Ok(value) => values.push(value),
                Err(miss) => {
                    debug!(choice = %choice, reason = %miss, "matched candidate did not resolve");
                    last_miss = Some(miss);
                }
            }
        }

        match last_miss {
            Some(NotFound(message)) if values.is_empty() => {
                Err(args.error(ArgumentErrorKind::NotFound(message)))
            }
            _ => Ok(values),
        }
    }

    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let prefix = args.next_if_present().unwrap_or_default().to_lowercase();
        let mut matches: Vec<String> = self
            .matcher
            .choices(ctx)
            .into_iter()
            .filter(|choice| {
                self.matcher
                    .match_targets(choice)
                    .iter()
                    .any(|target| target.to_lowercase().starts_with(&prefix))
            })
            .collect();
        matches.sort();
        matches.dedup();
        matches
    }
}

impl<M: PatternMatcher> CatalogedValueParameter for PatternMatching<M> {
    fn id(&self) -> RegistryKey {
        builtin_id(M::ID)
    }

    fn name(&self) -> &str {
        M::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdcommand_testkit::TestContext;

    struct Fruit;

    impl PatternMatcher for Fruit {
        type Value = String;
        const ID: &'static str = "fruit";
        const NAME: &'static str = "Fruit";

        fn choices(&self, _ctx: &dyn CommandContext) -> Vec<String> {
            ["apple", "apricot", "banana", "rotten"]
                .map(String::from)
                .to_vec()
        }

        fn resolve(&self, choice: &str, _ctx: &dyn CommandContext) -> Result<String, NotFound> {
            if choice == "rotten" {
                return Err(NotFound(format!("{choice} went bad")));
            }
            Ok(choice.to_uppercase())
        }

        fn no_match_message(&self, input: &str) -> String {
            format!("No fruit called {input}")
        }
    }

    fn parse(raw: &str) -> Result<Vec<String>, ArgumentError> {
        PatternMatching::with_matcher(Fruit)
            .parse(&TestContext::console(), &mut CommandArgs::parse(raw).unwrap())
    }

    #[test]
    fn exact_match_wins_alone() {
        assert_eq!(parse("APPLE"), Ok(vec!["APPLE".to_string()]));
    }

    #[test]
    fn regex_selects_every_match_in_order() {
        assert_eq!(parse("ap"), Ok(vec!["APPLE".to_string(), "APRICOT".to_string()]));
        assert_eq!(parse("a.*t"), Ok(vec!["APRICOT".to_string()]));
        assert_eq!(parse("(b|ap)p"), Ok(vec!["APPLE".to_string()]));
    }

    #[test]
    fn pattern_is_anchored_at_start() {
        assert!(parse("nana").is_err());
    }

    #[test]
    fn invalid_regex_falls_back_to_prefix() {
        let ctx = TestContext::console();
        let matching = PatternMatching::with_matcher(Fruit);
        assert!(matching.select("ap(", &ctx).is_empty());
        assert!(matching.select("ba[", &ctx).is_empty());
        assert_eq!(matching.select("ban", &ctx), vec!["banana"]);
    }

    #[test]
    fn no_match_uses_the_matcher_message() {
        let err = parse("cherry").unwrap_err();
        assert_eq!(err.to_string(), "No fruit called cherry");
    }

    #[test]
    fn unresolvable_matches_are_skipped_unless_all_fail() {
        assert_eq!(parse("r").unwrap_err().to_string(), "rotten went bad");
        assert_eq!(parse("rotten").unwrap_err().to_string(), "rotten went bad");
        assert_eq!(parse(".*n"), Ok(vec!["BANANA".to_string()]));
    }

    #[test]
    fn completes_by_prefix() {
        let ctx = TestContext::console();
        let matching = PatternMatching::with_matcher(Fruit);
        assert_eq!(
            matching.complete(&ctx, &mut CommandArgs::for_completion("AP")),
            vec!["apple", "apricot"]
        );
        assert_eq!(
            matching.complete(&ctx, &mut CommandArgs::for_completion("")).len(),
            4
        );
        assert_eq!(matching.id().to_string(), "mdcommand:fruit");
    }
}
