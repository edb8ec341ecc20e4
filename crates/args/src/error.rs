//! Parse failures.

use thiserror::Error;

/// Why a parameter rejected its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentErrorKind {
    /// The cursor ran out of tokens.
    #[error("Not enough arguments")]
    NoMoreTokens,
    /// A quoted token was never closed.
    #[error("Unterminated quoted argument")]
    UnterminatedQuote,
    /// A choice parameter received a key it does not know.
    #[error("Argument was not a valid choice. Valid choices: {}", .valid.join(", "))]
    InvalidChoice {
        /// The rejected token.
        input: String,
        /// Every valid key, case-folded and sorted.
        valid: Vec<String>,
    },
    /// A literal parameter received the wrong word.
    #[error("Argument '{input}' did not match expected literal '{expected}'")]
    LiteralMismatch {
        /// The rejected token.
        input: String,
        /// The word that was expected.
        expected: String,
    },
    /// A `0x`/`#` color was not valid base 16.
    #[error("'{0}' is not a valid hexadecimal number")]
    NotHexadecimal(String),
    /// A comma-separated value had the wrong number of parts.
    #[error("Expected {expected} comma-separated components, found {found}")]
    WrongComponentCount {
        /// Required component count.
        expected: usize,
        /// Components actually present.
        found: usize,
    },
    /// A color component was negative.
    #[error("Color component {0} is below the minimum of 0")]
    ComponentTooSmall(String),
    /// A color component was above 255.
    #[error("Color component {0} exceeds the maximum of 255")]
    ComponentTooLarge(String),
    /// A color component was not an integer.
    #[error("Color component '{0}' is not a number")]
    ComponentNotANumber(String),
    /// A color name was not in the named-color table.
    #[error("Unknown color '{input}'. Did you mean '{suggestion}'?")]
    UnknownColorName {
        /// The rejected name.
        input: String,
        /// Closest known name by edit distance.
        suggestion: String,
    },
    /// No duration syntax accepted the input.
    #[error("Invalid duration '{0}'. Use seconds, D:HH:MM:SS, or [n]w[n]d[n]h[n]m[n]s[n]ms")]
    UnsupportedDurationFormat(String),
    /// A coordinate was not a finite number.
    #[error("Expected a number, but input '{0}' was not")]
    NotADouble(String),
    /// Relative input was used by a source without a position.
    #[error("Source does not have a location to be relative to")]
    NoContextPosition,
    /// `#target` traced into nothing.
    #[error("No block is being targeted")]
    NoTargetBlock,
    /// No world was given and the source has no location to take one from.
    #[error("No world was specified and the source does not have a world")]
    NoFallbackWorld,
    /// A world selector matched other than exactly one world.
    #[error("Expected exactly one world, but the selection matched {0}")]
    AmbiguousWorldSelection(usize),
    /// The remaining line was neither TOML nor a JSON object.
    #[error("Invalid structured data: {0}")]
    MalformedStructuredData(String),
    /// A JSON text component could not be read.
    #[error("Invalid text component: {0}")]
    MalformedText(String),
    /// No date/time layout accepted the input.
    #[error("Invalid date-time '{0}'. Expected yyyy-MM-ddTHH:mm:ss, HH:mm:ss or yyyy-MM-dd")]
    UnparseableDateTime(String),
    /// A pattern matched nothing, or what it matched is gone.
    #[error("{0}")]
    NotFound(String),
    /// The token was not a UUID.
    #[error("'{0}' is not a valid UUID")]
    InvalidUuid(String),
}

/// A failure bound to a byte offset of the raw argument line.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ArgumentError {
    kind: ArgumentErrorKind,
    input: String,
    position: usize,
}

impl ArgumentError {
    pub(crate) fn new(kind: ArgumentErrorKind, input: &str, position: usize) -> Self {
        Self {
            kind,
            input: input.to_string(),
            position: position.min(input.len()),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &ArgumentErrorKind {
        &self.kind
    }

    /// Consume the error, keeping only its kind.
    pub fn into_kind(self) -> ArgumentErrorKind {
        self.kind
    }

    /// The full raw argument line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset into [`ArgumentError::input`].
    pub fn position(&self) -> usize {
        self.position
    }

    /// The raw line with a caret under the failing position.
    pub fn annotated_position(&self) -> String {
        let column = self.input[..self.position].chars().count();
        format!("{}\n{}^", self.input, " ".repeat(column))
    }
}

/// Invalid parameter configuration, reported at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterBuildError {
    /// Two choice keys are equal ignoring case.
    #[error("duplicate choice key '{0}' (keys are case-insensitive)")]
    DuplicateChoice(String),
    /// A literal with no words.
    #[error("literal parameters need at least one word")]
    EmptyLiteral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_choice_lists_keys() {
        let kind = ArgumentErrorKind::InvalidChoice {
            input: "maybe".into(),
            valid: vec!["false".into(), "no".into()],
        };
        assert_eq!(
            kind.to_string(),
            "Argument was not a valid choice. Valid choices: false, no"
        );
    }

    #[test]
    fn annotates_position_in_chars() {
        let err = ArgumentError::new(ArgumentErrorKind::NoTargetBlock, "é #target", 3);
        assert_eq!(err.annotated_position(), "é #target\n  ^");
    }

    #[test]
    fn clamps_position_to_input() {
        let err = ArgumentError::new(ArgumentErrorKind::NoMoreTokens, "abc", 10);
        assert_eq!(err.position(), 3);
        assert_eq!(err.to_string(), "Not enough arguments");
    }
}
