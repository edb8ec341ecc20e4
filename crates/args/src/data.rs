//! Structured data given inline as the rest of the command line.

use mdcommand_core::{CommandContext, RegistryKey};
use serde_json::{Map, Number, Value};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

/// A tree of data keyed by string at the top level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataContainer(Map<String, Value>);

impl DataContainer {
    /// Value at a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value at a dotted path such as `display.name`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let first = self.0.get(parts.next()?)?;
        parts.try_fold(first, |value, part| value.as_object()?.get(part))
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Reads the remaining line as TOML, falling back to a JSON object.
///
/// One line of TOML holds a single `key = value` pair, so several top-level
/// keys need an inline table (`root = { a = 1, b = 2 }`) or a JSON object
/// (`{"a": 1, "b": 2}`). When both readings fail, the TOML error is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataContainerParameter;

impl DataContainerParameter {
    fn read(raw: &str) -> Result<DataContainer, String> {
        let toml_error = match toml::from_str::<toml::Table>(raw) {
            Ok(table) => return Ok(DataContainer(toml_table_to_json(table))),
            Err(err) => err.message().to_string(),
        };
        tracing::debug!(error = %toml_error, "not TOML, trying JSON");
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Ok(DataContainer(map)),
            _ => Err(toml_error),
        }
    }
}

impl ValueParameter for DataContainerParameter {
    type Value = DataContainer;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<DataContainer, ArgumentError> {
        args.peek()?;
        let raw = args.raw_remaining().to_string();
        args.next()?;
        let data = Self::read(&raw)
            .map_err(|message| args.error(ArgumentErrorKind::MalformedStructuredData(message)))?;
        args.drain();
        Ok(data)
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        args.drain();
        Vec::new()
    }
}

impl CatalogedValueParameter for DataContainerParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("data_container")
    }

    fn name(&self) -> &str {
        "Data container"
    }
}

fn toml_table_to_json(table: toml::Table) -> Map<String, Value> {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect()
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(toml_table_to_json(table)),
    }
}
