//! Fixed and dynamic keyword choices.

use std::collections::BTreeMap;

use mdcommand_core::{CommandContext, RegistryKey};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind, ParameterBuildError};
use crate::parameter::{builtin_id, complete_prefix, CatalogedValueParameter, Tristate, ValueParameter};

/// Below this many choices, usage lists them inline (`<a|b|c>`).
pub const CHOICES_USAGE_CUTOFF: usize = 5;

type Supplier<T> = Box<dyn Fn() -> T + Send + Sync>;

struct Choice<T> {
    key: String,
    value: Supplier<T>,
}

/// Case-insensitive keyword table. Values are produced lazily: only the
/// matched key's supplier ever runs.
pub struct Choices<T> {
    // Keyed by the case-folded key.
    table: BTreeMap<String, Choice<T>>,
    include_choices: Tristate,
}

/// Builder for [`Choices`].
pub struct ChoicesBuilder<T> {
    entries: Vec<(String, Supplier<T>)>,
    include_choices: Tristate,
}

impl<T> Choices<T> {
    /// Start an empty table.
    pub fn builder() -> ChoicesBuilder<T> {
        ChoicesBuilder {
            entries: Vec::new(),
            include_choices: Tristate::Undefined,
        }
    }

    /// Build from eagerly known values.
    pub fn from_values<I, K>(values: I) -> Result<Self, ParameterBuildError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Clone + Send + Sync + 'static,
    {
        values
            .into_iter()
            .fold(Self::builder(), |builder, (key, value)| {
                builder.choice(key, move || value.clone())
            })
            .build()
    }

    /// Keys as registered, in case-folded order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.values().map(|choice| choice.key.as_str())
    }

    fn usage_lists_choices(&self) -> bool {
        match self.include_choices {
            Tristate::True => true,
            Tristate::False => false,
            Tristate::Undefined => self.table.len() < CHOICES_USAGE_CUTOFF,
        }
    }
}

impl<T> ChoicesBuilder<T> {
    /// Add a key and the supplier invoked when it is selected.
    pub fn choice<F>(mut self, key: impl Into<String>, value: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.entries.push((key.into(), Box::new(value)));
        self
    }

    /// Whether usage enumerates the choices; `Undefined` applies the cutoff.
    pub fn include_choices_in_usage(mut self, include: Tristate) -> Self {
        self.include_choices = include;
        self
    }

    /// Finish the table, rejecting keys that collide ignoring case.
    pub fn build(self) -> Result<Choices<T>, ParameterBuildError> {
        let mut table = BTreeMap::new();
        for (key, value) in self.entries {
            let folded = key.to_lowercase();
            if table.contains_key(&folded) {
                return Err(ParameterBuildError::DuplicateChoice(key));
            }
            table.insert(folded, Choice { key, value });
        }
        Ok(Choices {
            table,
            include_choices: self.include_choices,
        })
    }
}

impl<T> ValueParameter for Choices<T> {
    type Value = T;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<T, ArgumentError> {
        let input = args.next()?;
        match self.table.get(&input.to_lowercase()) {
            Some(choice) => Ok((choice.value)()),
            None => Err(args.error(ArgumentErrorKind::InvalidChoice {
                input,
                valid: self.table.keys().cloned().collect(),
            })),
        }
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let prefix = args.next_if_present().unwrap_or_default();
        complete_prefix(self.keys(), &prefix)
    }

    fn usage(&self, key: &str, _ctx: &dyn CommandContext) -> String {
        if self.usage_lists_choices() {
            format!("<{}>", self.keys().collect::<Vec<_>>().join("|"))
        } else {
            key.to_string()
        }
    }
}

impl<T> CatalogedValueParameter for Choices<T> {
    fn id(&self) -> RegistryKey {
        builtin_id("choices")
    }

    fn name(&self) -> &str {
        "Choices"
    }
}

/// Choices whose key set and key-to-value mapping are recomputed on every
/// call, e.g. the currently online players.
pub struct DynamicChoices<T> {
    keys: Box<dyn Fn() -> Vec<String> + Send + Sync>,
    value: Box<dyn Fn(&str) -> Option<T> + Send + Sync>,
    include_choices: Tristate,
}

impl<T> DynamicChoices<T> {
    /// `keys` lists the current keys; `value` maps a selected key to its value.
    pub fn new<K, V>(keys: K, value: V) -> Self
    where
        K: Fn() -> Vec<String> + Send + Sync + 'static,
        V: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            keys: Box::new(keys),
            value: Box::new(value),
            include_choices: Tristate::Undefined,
        }
    }

    /// Whether usage enumerates the choices; `Undefined` applies the cutoff.
    pub fn include_choices_in_usage(mut self, include: Tristate) -> Self {
        self.include_choices = include;
        self
    }

    fn folded_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = (self.keys)().iter().map(|key| key.to_lowercase()).collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

impl<T> ValueParameter for DynamicChoices<T> {
    type Value = T;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<T, ArgumentError> {
        let input = args.next()?;
        let folded = input.to_lowercase();
        let selected = (self.keys)()
            .into_iter()
            .find(|key| key.to_lowercase() == folded);
        match selected.and_then(|key| (self.value)(&key)) {
            Some(value) => Ok(value),
            None => Err(args.error(ArgumentErrorKind::InvalidChoice {
                input,
                valid: self.folded_keys(),
            })),
        }
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        let prefix = args.next_if_present().unwrap_or_default();
        complete_prefix((self.keys)(), &prefix)
    }

    fn usage(&self, key: &str, _ctx: &dyn CommandContext) -> String {
        let keys = (self.keys)();
        let inline = match self.include_choices {
            Tristate::True => true,
            Tristate::False => false,
            Tristate::Undefined => keys.len() < CHOICES_USAGE_CUTOFF,
        };
        if inline {
            let mut keys = keys;
            keys.sort_by_key(|key| key.to_lowercase());
            format!("<{}>", keys.join("|"))
        } else {
            key.to_string()
        }
    }
}

impl<T> CatalogedValueParameter for DynamicChoices<T> {
    fn id(&self) -> RegistryKey {
        builtin_id("dynamic_choices")
    }

    fn name(&self) -> &str {
        "Dynamic choices"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdcommand_testkit::TestContext;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn yes_no() -> Choices<bool> {
        Choices::from_values([("true", true), ("yes", true), ("false", false), ("no", false)])
            .unwrap()
    }

    fn parse<P: ValueParameter>(param: &P, raw: &str) -> Result<P::Value, ArgumentError> {
        let ctx = TestContext::console();
        param.parse(&ctx, &mut CommandArgs::parse(raw).unwrap())
    }

    fn complete<P: ValueParameter>(param: &P, raw: &str) -> Vec<String> {
        let ctx = TestContext::console();
        param.complete(&ctx, &mut CommandArgs::for_completion(raw))
    }

    #[test]
    fn matches_keys_ignoring_case() {
        assert_eq!(parse(&yes_no(), "YES"), Ok(true));
        assert_eq!(parse(&yes_no(), "No"), Ok(false));
    }

    #[test]
    fn rejects_unknown_key_listing_sorted_keys() {
        let err = parse(&yes_no(), "maybe").unwrap_err();
        assert_eq!(
            err.kind(),
            &ArgumentErrorKind::InvalidChoice {
                input: "maybe".into(),
                valid: vec!["false".into(), "no".into(), "true".into(), "yes".into()],
            }
        );
        assert_eq!(
            err.to_string(),
            "Argument was not a valid choice. Valid choices: false, no, true, yes"
        );
    }

    #[test]
    fn only_the_selected_supplier_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let choices = Choices::builder()
            .choice("day", move || {
                counted.fetch_add(1, Ordering::SeqCst);
                1000
            })
            .choice("night", || 13000)
            .build()
            .unwrap();
        assert_eq!(parse(&choices, "night"), Ok(13000));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(parse(&choices, "DAY"), Ok(1000));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = Choices::from_values([("Yes", true), ("yes", true)]);
        assert!(matches!(result, Err(ParameterBuildError::DuplicateChoice(key)) if key == "yes"));
    }

    #[test]
    fn completes_by_prefix() {
        assert_eq!(complete(&yes_no(), "y"), vec!["yes"]);
        assert_eq!(complete(&yes_no(), "N"), vec!["no"]);
        assert_eq!(complete(&yes_no(), ""), vec!["false", "no", "true", "yes"]);
        assert!(complete(&yes_no(), "q").is_empty());
    }

    #[test]
    fn usage_lists_small_tables_only() {
        let ctx = TestContext::console();
        assert_eq!(yes_no().usage("flag", &ctx), "<false|no|true|yes>");

        let big = Choices::from_values((0..5).map(|i| (format!("k{i}"), i))).unwrap();
        assert_eq!(big.usage("level", &ctx), "level");

        let forced = (0..5)
            .fold(Choices::builder(), |b, i| b.choice(format!("k{i}"), move || i))
            .include_choices_in_usage(Tristate::True)
            .build()
            .unwrap();
        assert_eq!(forced.usage("level", &ctx), "<k0|k1|k2|k3|k4>");

        let hidden = Choices::builder()
            .choice("a", || 1)
            .include_choices_in_usage(Tristate::False)
            .build()
            .unwrap();
        assert_eq!(hidden.usage("level", &ctx), "level");
    }

    #[test]
    fn dynamic_choices_follow_the_source() {
        let online = Arc::new(Mutex::new(vec!["Alex".to_string(), "Steve".to_string()]));
        let keys = Arc::clone(&online);
        let choices = DynamicChoices::new(
            move || keys.lock().unwrap().clone(),
            |key| Some(key.to_string()),
        );

        assert_eq!(parse(&choices, "steve"), Ok("Steve".to_string()));
        online.lock().unwrap().retain(|name| name != "Steve");
        let err = parse(&choices, "steve").unwrap_err();
        assert!(matches!(err.kind(), ArgumentErrorKind::InvalidChoice { valid, .. } if valid == &vec!["alex".to_string()]));
        assert_eq!(complete(&choices, "a"), vec!["Alex"]);
    }
}
