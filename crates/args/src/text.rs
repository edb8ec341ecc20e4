//! Chat text arguments.

use mdcommand_core::{CommandContext, RegistryKey};
use serde::{Deserialize, Serialize};

use crate::args::CommandArgs;
use crate::error::{ArgumentError, ArgumentErrorKind};
use crate::parameter::{builtin_id, CatalogedValueParameter, ValueParameter};

/// A chat component: some text, an optional color, and child components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    /// Literal content of this component.
    #[serde(default)]
    pub text: String,
    /// Color name, inherited by children that do not set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Components appended after this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Text>,
}

impl Text {
    /// Uncolored text with no children.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// All content flattened, formatting dropped.
    pub fn to_plain(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.extra {
            out.push_str(&child.to_plain());
        }
        out
    }
}

/// How the argument is turned into a [`Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Taken verbatim.
    #[default]
    Plain,
    /// A JSON chat component.
    Json,
}

/// One token, or with [`TextParameter::remaining`] the rest of the line, as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParameter {
    format: TextFormat,
    remaining: bool,
}

impl TextParameter {
    /// Parse with the given format.
    pub fn new(format: TextFormat) -> Self {
        Self {
            format,
            remaining: false,
        }
    }

    /// Consume the rest of the line verbatim instead of one token.
    pub fn remaining(mut self) -> Self {
        self.remaining = true;
        self
    }

    fn read(&self, input: String, args: &CommandArgs) -> Result<Text, ArgumentError> {
        match self.format {
            TextFormat::Plain => Ok(Text::plain(input)),
            TextFormat::Json => serde_json::from_str(&input)
                .map_err(|err| args.error(ArgumentErrorKind::MalformedText(err.to_string()))),
        }
    }
}

impl ValueParameter for TextParameter {
    type Value = Text;

    fn parse(
        &self,
        _ctx: &dyn CommandContext,
        args: &mut CommandArgs,
    ) -> Result<Text, ArgumentError> {
        if !self.remaining {
            let token = args.next()?;
            return self.read(token, args);
        }

        args.peek()?;
        let raw = args.raw_remaining().to_string();
        // Failures point at the start of the text, not its last word.
        args.next()?;
        let text = self.read(raw, args);
        args.drain();
        text
    }

    fn complete(&self, _ctx: &dyn CommandContext, args: &mut CommandArgs) -> Vec<String> {
        if self.remaining {
            args.drain();
        } else {
            args.next_if_present();
        }
        Vec::new()
    }
}

impl CatalogedValueParameter for TextParameter {
    fn id(&self) -> RegistryKey {
        builtin_id("text")
    }

    fn name(&self) -> &str {
        "Text"
    }
}
