//! Traversal protocols for parse trees.
//!
//! Two ways to consume a tree are provided:
//!
//! - [`ParseTreeVisitor`] - pull-based; every visit returns a value and rule
//!   results are aggregated from their children
//! - [`ParseTreeListener`] driven by [`ParseTreeWalker`] - push-based; the walker
//!   notifies the listener on rule entry, rule exit and every leaf
//!
//! # Examples
//!
//! ## Counting leaves with a visitor
//!
//! ```rust
//! use grove_tree::visitor::ParseTreeVisitor;
//! use grove_tree::{BasicContext, CommonToken, TerminalNode, TreeArena};
//!
//! struct LeafCounter;
//!
//! impl<'a> ParseTreeVisitor<'a, BasicContext, CommonToken> for LeafCounter {
//!     type Output = usize;
//!
//!     fn visit_terminal(
//!         &mut self,
//!         _node: &'a TerminalNode<'a, BasicContext, CommonToken>,
//!     ) -> usize {
//!         1
//!     }
//!
//!     fn aggregate_result(&mut self, aggregate: usize, next: usize) -> usize {
//!         aggregate + next
//!     }
//! }
//!
//! let tokens = [CommonToken::new(1, "a"), CommonToken::new(1, "b")];
//! let arena = TreeArena::new();
//! let root = arena
//!     .rule(BasicContext::new(0), &[arena.terminal(&tokens[0]), arena.terminal(&tokens[1])])
//!     .unwrap();
//!
//! assert_eq!(LeafCounter.visit(root), 2);
//! ```
//!
//! ## Tracing rule boundaries with a listener
//!
//! ```rust
//! use grove_tree::visitor::{ParseTreeListener, ParseTreeWalker};
//! use grove_tree::{BasicContext, CommonToken, RuleNode, TreeArena};
//!
//! #[derive(Default)]
//! struct Depth {
//!     current: usize,
//!     max: usize,
//! }
//!
//! impl<'a> ParseTreeListener<'a, BasicContext, CommonToken> for Depth {
//!     fn enter_every_rule(&mut self, _node: &'a RuleNode<'a, BasicContext, CommonToken>) {
//!         self.current += 1;
//!         self.max = self.max.max(self.current);
//!     }
//!
//!     fn exit_every_rule(&mut self, _node: &'a RuleNode<'a, BasicContext, CommonToken>) {
//!         self.current -= 1;
//!     }
//! }
//!
//! let arena = TreeArena::new();
//! let inner = arena.rule::<BasicContext, CommonToken>(BasicContext::new(1), &[]).unwrap();
//! let root = arena.rule(BasicContext::new(0), &[inner]).unwrap();
//!
//! let mut depth = Depth::default();
//! ParseTreeWalker::DEFAULT.walk(&mut depth, root);
//! assert_eq!((depth.current, depth.max), (0, 2));
//! ```

mod listener;
mod visit;
mod walk;

pub use listener::ParseTreeListener;
pub use visit::{visit_children, ParseTreeVisitor};
pub use walk::{walk, ParseTreeWalker};
