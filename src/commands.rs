use std::{collections::BTreeMap, fmt::Debug};

use anyhow::{Context, Result};
use mdcommand_args::{
    ArgumentError, CatalogTypeParameter, CatalogedValueParameter, Choices, ColorParameter,
    CommandArgs, DataContainerParameter, DateTimeParameter, DurationParameter, DynamicChoices,
    EntityParameter, Literal, LocationParameter, PlayerParameter, TextFormat, TextParameter,
    UuidParameter, ValueParameter, Vector3dParameter, WorldPropertiesParameter,
};
use mdcommand_core::{CommandContext, RegistryKey, DIMENSION_TYPE_CATALOG};

/// A registered parameter with its value type erased to a printable form.
pub trait CliParameter {
    fn id(&self) -> RegistryKey;
    fn name(&self) -> &str;
    fn parse_display(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<String, ArgumentError>;
    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String>;
    fn usage(&self, key: &str, ctx: &dyn CommandContext) -> String;
}

impl<P> CliParameter for P
where
    P: CatalogedValueParameter,
    P::Value: Debug,
{
    fn id(&self) -> RegistryKey {
        CatalogedValueParameter::id(self)
    }

    fn name(&self) -> &str {
        CatalogedValueParameter::name(self)
    }

    fn parse_display(
        &self,
        ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<String, ArgumentError> {
        ValueParameter::parse(self, ctx, args).map(|value| format!("{value:#?}"))
    }

    fn complete(&self, ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        ValueParameter::complete(self, ctx, args)
    }

    fn usage(&self, key: &str, ctx: &dyn CommandContext) -> String {
        ValueParameter::usage(self, key, ctx)
    }
}

/// Parameters addressable from the command line, by name.
pub struct ParameterRegistry {
    parameters: BTreeMap<String, Box<dyn CliParameter>>,
}

impl ParameterRegistry {
    /// Every built-in parameter, plus a choice over `catalogs`.
    pub fn builtin(catalogs: Vec<String>) -> Result<Self> {
        let mut registry = Self {
            parameters: BTreeMap::new(),
        };

        registry.register("color", ColorParameter);
        registry.register("duration", DurationParameter);
        registry.register("vector", Vector3dParameter::new());
        registry.register("location", LocationParameter::new());
        registry.register("world", WorldPropertiesParameter::new());
        registry.register("entity", EntityParameter::new());
        registry.register("player", PlayerParameter::new());
        registry.register("block", CatalogTypeParameter::new("block_type"));
        registry.register("dimension", CatalogTypeParameter::new(DIMENSION_TYPE_CATALOG));
        registry.register("uuid", UuidParameter);
        registry.register("datetime", DateTimeParameter::new());
        registry.register("text", TextParameter::new(TextFormat::Plain).remaining());
        registry.register("json_text", TextParameter::new(TextFormat::Json).remaining());
        registry.register("data", DataContainerParameter);
        registry.register(
            "yes_no",
            Choices::from_values([("true", true), ("yes", true), ("false", false), ("no", false)])?,
        );
        registry.register(
            "gamemode",
            Choices::from_values([
                ("survival", 0u8),
                ("creative", 1),
                ("adventure", 2),
                ("spectator", 3),
            ])?,
        );
        registry.register(
            "catalog",
            DynamicChoices::new(
                move || catalogs.clone(),
                |key: &str| Some(key.to_string()),
            ),
        );
        registry.register("confirm", Literal::new("i am sure", || true)?);

        Ok(registry)
    }

    fn register<P>(&mut self, name: &str, parameter: P)
    where
        P: CliParameter + 'static,
    {
        self.parameters.insert(name.to_string(), Box::new(parameter));
    }

    /// Look up a parameter by its registered name.
    pub fn get(&self, name: &str) -> Result<&dyn CliParameter> {
        self.parameters
            .get(name)
            .map(|parameter| parameter.as_ref())
            .with_context(|| format!("unknown parameter '{name}' (see `mdcommand list`)"))
    }

    /// Registered names and parameters, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn CliParameter)> {
        self.parameters
            .iter()
            .map(|(name, parameter)| (name.as_str(), parameter.as_ref()))
    }
}

/// Re-join shell words into one argument line, quoting words that would
/// otherwise split or lose characters.
pub fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            let needs_quotes = word.is_empty()
                || word
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'));
            if needs_quotes {
                let escaped = word.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{escaped}\"")
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
