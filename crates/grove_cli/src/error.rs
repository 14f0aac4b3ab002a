//! CLI error types.

use grove_tree::TreeError;
use thiserror::Error;

/// Errors raised while loading inputs or building trees.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed tree document.
    #[error("Document error: {0}")]
    Document(String),

    /// A rule name that is neither in the document nor in the config.
    #[error("Unknown rule '{0}'")]
    UnknownRule(String),

    /// A token reference past the end of the token list.
    #[error("Token {index} out of range ({len} tokens)")]
    TokenOutOfRange { index: usize, len: usize },

    /// Structural error from the tree builder.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a document error.
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }
}
