//! The token cursor shared by every parameter of one command line.
//!
//! Tokens are split once, up front; parsing only moves an index over them.
//! Composite parameters take a [`CursorState`] before trying a branch and
//! [`CommandArgs::restore`] it to undo whatever the branch consumed.

use crate::error::{ArgumentError, ArgumentErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    value: String,
    /// Byte offset of the first character as typed (quote included).
    start: usize,
}

/// Saved read position of a [`CommandArgs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorState(usize);

/// Tokenized argument line with a forward-only read position.
#[derive(Debug, Clone)]
pub struct CommandArgs {
    raw: String,
    tokens: Vec<Token>,
    index: usize,
}

impl CommandArgs {
    /// Tokenize strictly: an unterminated quote is an error.
    pub fn parse(raw: &str) -> Result<Self, ArgumentError> {
        let tokens = tokenize(raw, false)?;
        Ok(Self::from_tokens(raw, tokens))
    }

    /// Tokenize leniently: an unterminated quote runs to the end of the line.
    pub fn lenient(raw: &str) -> Self {
        Self::from_tokens(raw, tokenize(raw, true).unwrap_or_default())
    }

    /// Tokenize for tab-completion.
    ///
    /// A line that is empty or ends in whitespace gets an empty trailing token,
    /// so the parameter being completed always has an in-progress token.
    pub fn for_completion(raw: &str) -> Self {
        let mut args = Self::lenient(raw);
        if raw.chars().last().map_or(true, char::is_whitespace) {
            args.tokens.push(Token {
                value: String::new(),
                start: raw.len(),
            });
        }
        args
    }

    fn from_tokens(raw: &str, tokens: Vec<Token>) -> Self {
        Self {
            raw: raw.to_string(),
            tokens,
            index: 0,
        }
    }

    /// The raw line as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of tokens on the line.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the line has no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether an unconsumed token remains.
    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// Read the current token without consuming it.
    pub fn peek(&self) -> Result<&str, ArgumentError> {
        self.tokens
            .get(self.index)
            .map(|token| token.value.as_str())
            .ok_or_else(|| self.exhausted())
    }

    /// Consume and return the current token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<String, ArgumentError> {
        let token = self.tokens.get(self.index).ok_or_else(|| self.exhausted())?;
        let value = token.value.clone();
        self.index += 1;
        Ok(value)
    }

    /// Consume the current token if there is one.
    pub fn next_if_present(&mut self) -> Option<String> {
        self.next().ok()
    }

    /// Raw text of every unconsumed token, exactly as typed.
    pub fn raw_remaining(&self) -> &str {
        match self.tokens.get(self.index) {
            Some(token) => &self.raw[token.start..],
            None => "",
        }
    }

    /// Mark every token consumed.
    pub fn drain(&mut self) {
        self.index = self.tokens.len();
    }

    /// Save the read position.
    pub fn snapshot(&self) -> CursorState {
        CursorState(self.index)
    }

    /// Return to a saved read position, un-consuming everything read since.
    pub fn restore(&mut self, state: CursorState) {
        self.index = state.0.min(self.tokens.len());
    }

    /// Build a failure at the most recently consumed token.
    pub fn error(&self, kind: ArgumentErrorKind) -> ArgumentError {
        let position = match self.index.checked_sub(1) {
            Some(last) => self.tokens[last].start,
            None => self.tokens.first().map_or(0, |token| token.start),
        };
        ArgumentError::new(kind, &self.raw, position)
    }

    fn exhausted(&self) -> ArgumentError {
        ArgumentError::new(ArgumentErrorKind::NoMoreTokens, &self.raw, self.raw.len())
    }
}

fn tokenize(raw: &str, lenient: bool) -> Result<Vec<Token>, ArgumentError> {
    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();

    loop {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let Some(&(start, _)) = chars.peek() else {
            break;
        };

        let mut value = String::new();
        while let Some((_, c)) = chars.next_if(|(_, c)| !c.is_whitespace()) {
            match c {
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        value.push(escaped);
                    }
                }
                '"' | '\'' => {
                    let mut closed = false;
                    while let Some((_, inner)) = chars.next() {
                        if inner == '\\' {
                            if let Some((_, escaped)) = chars.next() {
                                value.push(escaped);
                            }
                        } else if inner == c {
                            closed = true;
                            break;
                        } else {
                            value.push(inner);
                        }
                    }
                    if !closed && !lenient {
                        return Err(ArgumentError::new(
                            ArgumentErrorKind::UnterminatedQuote,
                            raw,
                            start,
                        ));
                    }
                }
                other => value.push(other),
            }
        }
        tokens.push(Token { value, start });
    }

    Ok(tokens)
}
