//! Token abstraction consumed by terminal nodes.

use serde::{Deserialize, Serialize};

/// Token type of the end-of-file token.
pub const TOKEN_EOF: i32 = -1;

/// A matched token as seen by the parse tree.
///
/// Token streams live outside the tree; terminals only borrow tokens.
pub trait Token {
    /// Returns the grammar token type.
    fn token_type(&self) -> i32;

    /// Returns the index of this token in its stream, or a negative value for
    /// tokens that were never part of a stream.
    fn token_index(&self) -> isize;

    /// Returns the literal text of this token.
    fn text(&self) -> &str;

    /// Returns true if this is the end-of-file token.
    #[inline]
    fn is_eof(&self) -> bool {
        self.token_type() == TOKEN_EOF
    }
}

/// A plain owned token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommonToken {
    /// Grammar token type.
    #[serde(rename = "type")]
    pub token_type: i32,
    /// Index in the token stream; `-1` when unassigned.
    #[serde(default = "unassigned_index", rename = "index")]
    pub token_index: isize,
    /// Literal text.
    #[serde(default)]
    pub text: String,
    /// Line number (1-indexed), `0` when unknown.
    #[serde(default)]
    pub line: u32,
    /// Column number (0-indexed).
    #[serde(default)]
    pub column: u32,
}

fn unassigned_index() -> isize {
    -1
}

impl CommonToken {
    /// Creates a token with an unassigned index.
    pub fn new(token_type: i32, text: impl Into<String>) -> Self {
        Self {
            token_type,
            token_index: unassigned_index(),
            text: text.into(),
            line: 0,
            column: 0,
        }
    }

    /// Creates an end-of-file token at the given stream index.
    pub fn eof(token_index: isize) -> Self {
        Self::new(TOKEN_EOF, "").with_index(token_index)
    }

    /// Sets the stream index.
    #[must_use]
    pub fn with_index(mut self, token_index: isize) -> Self {
        self.token_index = token_index;
        self
    }

    /// Sets the source position.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

impl Token for CommonToken {
    #[inline]
    fn token_type(&self) -> i32 {
        self.token_type
    }

    #[inline]
    fn token_index(&self) -> isize {
        self.token_index
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }
}
