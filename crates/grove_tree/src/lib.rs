//! # grove_tree
//!
//! Parse tree model and traversal engine for Grove.
//!
//! This crate models the tree a generated parser produces and provides the two
//! ways of consuming it:
//!
//! - a push-based [`ParseTreeListener`] driven by the [`ParseTreeWalker`]
//! - a pull-based [`ParseTreeVisitor`] that computes an aggregated result
//!
//! ## Architecture
//!
//! - Nodes are allocated in a [`TreeArena`] (`bumpalo`) and freed all at once
//! - A [`Node`] is a rule invocation, a matched token, or an error-recovery token
//! - Parent links are non-owning borrows into the same arena, set exactly once
//! - The finished tree is immutable, so it can be shared across threads
//!
//! ## Example
//!
//! ```rust
//! use grove_tree::{BasicContext, CommonToken, ParseTree, TreeArena, TreeBuilder};
//!
//! let tokens = [CommonToken::new(1, "x").with_index(0)];
//! let arena = TreeArena::new();
//!
//! let mut builder = TreeBuilder::new(&arena);
//! builder.start_rule(BasicContext::new(0)).unwrap();
//! builder.token(&tokens[0]).unwrap();
//! builder.finish_rule().unwrap();
//! let root = builder.finish().unwrap();
//!
//! assert_eq!(root.text(), "x");
//! assert_eq!(root.to_string_tree(&["expr"]), "(expr x)");
//! ```

mod arena;
mod builder;
mod context;
mod error;
mod interval;
mod node;
mod token;
pub mod trees;
pub mod visitor;

pub use arena::TreeArena;
pub use builder::TreeBuilder;
pub use context::{BasicContext, RuleContext, RuleHooks, INVALID_ALT_NUMBER};
pub use error::TreeError;
pub use interval::Interval;
pub use node::{ErrorNode, Node, ParseTree, Payload, RuleNode, SyntaxTree, TerminalNode, Tree};
pub use token::{CommonToken, TOKEN_EOF, Token};

// Re-export commonly used traversal items for convenience
pub use visitor::{ParseTreeListener, ParseTreeVisitor, ParseTreeWalker};
