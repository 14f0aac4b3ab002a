//! Parse tree node definitions.
//!
//! A parse tree is made of three node kinds, collected in the [`Node`] enum:
//!
//! - [`RuleNode`] - one invocation of a grammar rule, owning its children
//! - [`TerminalNode`] - a leaf wrapping one matched token
//! - [`ErrorNode`] - a leaf wrapping a token consumed during error recovery
//!
//! The capability hierarchy is expressed as three traits: [`Tree`] for structure,
//! [`SyntaxTree`] for source intervals and [`ParseTree`] for text renderings.

use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use crate::trees::{self, Ancestors};
use crate::visitor::ParseTreeVisitor;
use crate::{Interval, RuleContext, Token, TreeError};

/// The payload a node carries: the rule context for rule nodes, the token for
/// leaves.
#[derive(Debug)]
pub enum Payload<'p, C, S> {
    /// Context of a rule invocation.
    Context(&'p C),
    /// Token of a terminal or error node, absent for conjured leaves.
    Symbol(Option<&'p S>),
}

/// Structural view shared by every parse tree node.
///
/// Child indices outside `0..child_count()` are not an error: [`Tree::child`]
/// returns `None` for them.
pub trait Tree<'a, C: 'a, S: 'a> {
    /// Returns the rule node this node is attached to.
    fn parent(&self) -> Option<&'a RuleNode<'a, C, S>>;

    /// Attaches this node to `parent`.
    ///
    /// A node is attached at most once. Re-attaching fails with
    /// [`TreeError::AlreadyAttached`] and keeps the existing parent.
    fn set_parent(&self, parent: &'a RuleNode<'a, C, S>) -> Result<(), TreeError>;

    /// Returns the payload of this node.
    fn payload(&self) -> Payload<'_, C, S>;

    /// Returns the children in grammar order. Leaves have none.
    fn children(&self) -> &'a [&'a Node<'a, C, S>];

    /// Returns the `i`-th child, or `None` when `i` is out of range.
    #[inline]
    fn child(&self, i: usize) -> Option<&'a Node<'a, C, S>> {
        self.children().get(i).copied()
    }

    /// Returns the number of children.
    #[inline]
    fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Iterates over the enclosing rule nodes, nearest first.
    #[inline]
    fn ancestors(&self) -> Ancestors<'a, C, S> {
        Ancestors::new(self.parent())
    }

    /// Returns the number of ancestors; a root has depth 0.
    #[inline]
    fn depth(&self) -> usize {
        self.ancestors().count()
    }
}

/// A tree that knows which tokens it covers.
pub trait SyntaxTree<'a, C: 'a, S: 'a>: Tree<'a, C, S> {
    /// Returns the token interval this subtree spans, or [`Interval::INVALID`].
    fn source_interval(&self) -> Interval;
}

/// A syntax tree that can render itself.
pub trait ParseTree<'a, C: 'a, S: 'a>: SyntaxTree<'a, C, S> {
    /// Returns the text of all terminal descendants, left to right.
    fn text(&self) -> String;

    /// Renders the subtree in LISP form, e.g. `(expr 1 + (atom 2))`.
    ///
    /// `rule_names` maps rule indices to names; missing entries fall back to the
    /// numeric index.
    fn to_string_tree(&self, rule_names: &[&str]) -> String;
}

/// A node in a parse tree.
///
/// Error nodes are terminals too; code that distinguishes the two must check
/// [`Node::Error`] before treating a node as a plain terminal.
#[derive(Debug)]
pub enum Node<'a, C, S> {
    /// A grammar rule invocation.
    Rule(RuleNode<'a, C, S>),
    /// A successfully matched token.
    Terminal(TerminalNode<'a, C, S>),
    /// A token consumed during error recovery.
    Error(ErrorNode<'a, C, S>),
}

impl<'a, C, S> Node<'a, C, S> {
    /// Returns true if this node is a rule invocation.
    #[inline]
    pub const fn is_rule(&self) -> bool {
        matches!(self, Node::Rule(_))
    }

    /// Returns true if this node is a leaf, including error nodes.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_) | Node::Error(_))
    }

    /// Returns true if this node was produced by error recovery.
    #[inline]
    pub const fn is_error_node(&self) -> bool {
        matches!(self, Node::Error(_))
    }

    /// Returns the rule node, if this is one.
    #[inline]
    pub fn as_rule(&self) -> Option<&RuleNode<'a, C, S>> {
        match self {
            Node::Rule(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the terminal view of a leaf. Error nodes are included.
    #[inline]
    pub fn as_terminal(&self) -> Option<&TerminalNode<'a, C, S>> {
        match self {
            Node::Terminal(node) => Some(node),
            Node::Error(node) => Some(node.as_terminal()),
            Node::Rule(_) => None,
        }
    }

    /// Returns the error node, if this is one.
    #[inline]
    pub fn as_error(&self) -> Option<&ErrorNode<'a, C, S>> {
        match self {
            Node::Error(node) => Some(node),
            _ => None,
        }
    }

    /// Dispatches to the visitor method matching this node's kind.
    ///
    /// Error nodes go to `visit_error_node`, plain terminals to
    /// `visit_terminal` and rule nodes to `visit_rule`.
    pub fn accept<V>(&'a self, visitor: &mut V) -> V::Output
    where
        V: ParseTreeVisitor<'a, C, S> + ?Sized,
    {
        match self {
            Node::Error(node) => visitor.visit_error_node(node),
            Node::Terminal(node) => visitor.visit_terminal(node),
            Node::Rule(node) => visitor.visit_rule(node),
        }
    }
}

impl<'a, C, S> Tree<'a, C, S> for Node<'a, C, S> {
    fn parent(&self) -> Option<&'a RuleNode<'a, C, S>> {
        match self {
            Node::Rule(node) => node.parent(),
            Node::Terminal(node) => node.parent(),
            Node::Error(node) => node.parent(),
        }
    }

    fn set_parent(&self, parent: &'a RuleNode<'a, C, S>) -> Result<(), TreeError> {
        match self {
            Node::Rule(node) => node.set_parent(parent),
            Node::Terminal(node) => node.set_parent(parent),
            Node::Error(node) => node.set_parent(parent),
        }
    }

    fn payload(&self) -> Payload<'_, C, S> {
        match self {
            Node::Rule(node) => node.payload(),
            Node::Terminal(node) => node.payload(),
            Node::Error(node) => node.payload(),
        }
    }

    fn children(&self) -> &'a [&'a Node<'a, C, S>] {
        match self {
            Node::Rule(node) => node.children(),
            Node::Terminal(_) | Node::Error(_) => &[],
        }
    }
}

impl<'a, C, S: Token> SyntaxTree<'a, C, S> for Node<'a, C, S> {
    fn source_interval(&self) -> Interval {
        match self {
            Node::Rule(node) => node.source_interval(),
            Node::Terminal(node) => node.source_interval(),
            Node::Error(node) => node.source_interval(),
        }
    }
}

impl<'a, C: RuleContext, S: Token> ParseTree<'a, C, S> for Node<'a, C, S> {
    fn text(&self) -> String {
        match self {
            Node::Rule(node) => node.text(),
            Node::Terminal(node) => node.text(),
            Node::Error(node) => node.text(),
        }
    }

    fn to_string_tree(&self, rule_names: &[&str]) -> String {
        trees::to_string_tree(self, rule_names)
    }
}

/// A grammar rule invocation.
///
/// The children slice and the source interval are fixed when the node is
/// created; only the parent link is filled in later, once.
pub struct RuleNode<'a, C, S> {
    context: C,
    parent: OnceLock<&'a RuleNode<'a, C, S>>,
    children: &'a [&'a Node<'a, C, S>],
    interval: Interval,
}

impl<'a, C, S: Token> RuleNode<'a, C, S> {
    /// Creates a detached rule node over `children`.
    ///
    /// This does not attach the children; use [`TreeArena::rule`] or
    /// [`TreeBuilder`] to build connected trees.
    ///
    /// [`TreeArena::rule`]: crate::TreeArena::rule
    /// [`TreeBuilder`]: crate::TreeBuilder
    pub fn new(context: C, children: &'a [&'a Node<'a, C, S>]) -> Self {
        let interval = children
            .iter()
            .fold(Interval::INVALID, |acc, child| {
                acc.union(&child.source_interval())
            });
        Self {
            context,
            parent: OnceLock::new(),
            children,
            interval,
        }
    }
}

impl<'a, C, S> RuleNode<'a, C, S> {
    /// Returns the rule context.
    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns the outermost rule node of the tree containing this node.
    pub fn root(&'a self) -> &'a RuleNode<'a, C, S> {
        self.ancestors().last().unwrap_or(self)
    }
}

impl<'a, C: RuleContext, S> RuleNode<'a, C, S> {
    /// Returns the grammar rule index of this invocation.
    #[inline]
    pub fn rule_index(&self) -> usize {
        self.context.rule_index()
    }
}

impl<'a, C, S> Tree<'a, C, S> for RuleNode<'a, C, S> {
    #[inline]
    fn parent(&self) -> Option<&'a RuleNode<'a, C, S>> {
        self.parent.get().copied()
    }

    fn set_parent(&self, parent: &'a RuleNode<'a, C, S>) -> Result<(), TreeError> {
        self.parent
            .set(parent)
            .map_err(|_| TreeError::AlreadyAttached)
    }

    #[inline]
    fn payload(&self) -> Payload<'_, C, S> {
        Payload::Context(&self.context)
    }

    #[inline]
    fn children(&self) -> &'a [&'a Node<'a, C, S>] {
        self.children
    }
}

impl<'a, C, S: Token> SyntaxTree<'a, C, S> for RuleNode<'a, C, S> {
    #[inline]
    fn source_interval(&self) -> Interval {
        self.interval
    }
}

impl<'a, C: RuleContext, S: Token> ParseTree<'a, C, S> for RuleNode<'a, C, S> {
    fn text(&self) -> String {
        trees::Descendants::of_children(self.children)
            .filter_map(Node::as_terminal)
            .map(|leaf| leaf.text())
            .collect()
    }

    fn to_string_tree(&self, rule_names: &[&str]) -> String {
        let mut out = String::new();
        trees::write_rule(self, rule_names, &mut out);
        out
    }
}

impl<C: fmt::Debug, S> fmt::Debug for RuleNode<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleNode")
            .field("context", &self.context)
            .field("interval", &self.interval)
            .field("child_count", &self.children.len())
            .field("attached", &self.parent.get().is_some())
            .finish()
    }
}

/// A leaf wrapping one matched token.
pub struct TerminalNode<'a, C, S> {
    symbol: Option<&'a S>,
    parent: OnceLock<&'a RuleNode<'a, C, S>>,
}

impl<'a, C, S> TerminalNode<'a, C, S> {
    /// Creates a detached terminal.
    ///
    /// `None` models a token the parser conjured without consuming input.
    #[inline]
    pub const fn new(symbol: Option<&'a S>) -> Self {
        Self {
            symbol,
            parent: OnceLock::new(),
        }
    }

    /// Returns the wrapped token.
    #[inline]
    pub fn symbol(&self) -> Option<&'a S> {
        self.symbol
    }
}

impl<'a, C, S> Tree<'a, C, S> for TerminalNode<'a, C, S> {
    #[inline]
    fn parent(&self) -> Option<&'a RuleNode<'a, C, S>> {
        self.parent.get().copied()
    }

    fn set_parent(&self, parent: &'a RuleNode<'a, C, S>) -> Result<(), TreeError> {
        self.parent
            .set(parent)
            .map_err(|_| TreeError::AlreadyAttached)
    }

    #[inline]
    fn payload(&self) -> Payload<'_, C, S> {
        Payload::Symbol(self.symbol)
    }

    #[inline]
    fn children(&self) -> &'a [&'a Node<'a, C, S>] {
        &[]
    }
}

impl<'a, C, S: Token> SyntaxTree<'a, C, S> for TerminalNode<'a, C, S> {
    /// `(index, index)` of the wrapped token, or [`Interval::INVALID`] when the
    /// token is absent.
    fn source_interval(&self) -> Interval {
        match self.symbol {
            Some(symbol) => Interval::of(symbol.token_index()),
            None => Interval::INVALID,
        }
    }
}

impl<'a, C: RuleContext, S: Token> ParseTree<'a, C, S> for TerminalNode<'a, C, S> {
    /// The token's literal text; empty when the token is absent.
    fn text(&self) -> String {
        self.symbol
            .map(|symbol| symbol.text().to_string())
            .unwrap_or_default()
    }

    fn to_string_tree(&self, _rule_names: &[&str]) -> String {
        trees::escape_whitespace(&self.to_string())
    }
}

/// Renders the token text, `<EOF>` for end-of-file tokens and `<missing>` for
/// absent tokens.
impl<C, S: Token> fmt::Display for TerminalNode<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Some(symbol) if symbol.is_eof() => f.write_str("<EOF>"),
            Some(symbol) => f.write_str(symbol.text()),
            None => f.write_str("<missing>"),
        }
    }
}

impl<C, S: fmt::Debug> fmt::Debug for TerminalNode<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalNode")
            .field("symbol", &self.symbol)
            .field("attached", &self.parent.get().is_some())
            .finish()
    }
}

/// A token consumed during error recovery rather than a successful match,
/// such as single-token insertion or deletion, or resynchronization.
///
/// It has the same state as a [`TerminalNode`] and dereferences to one; the
/// wrapper exists only to tell the two apart.
pub struct ErrorNode<'a, C, S>(TerminalNode<'a, C, S>);

impl<'a, C, S> ErrorNode<'a, C, S> {
    /// Creates a detached error node.
    #[inline]
    pub const fn new(symbol: Option<&'a S>) -> Self {
        Self(TerminalNode::new(symbol))
    }

    /// Returns the terminal view of this node.
    #[inline]
    pub fn as_terminal(&self) -> &TerminalNode<'a, C, S> {
        &self.0
    }
}

impl<'a, C, S> Deref for ErrorNode<'a, C, S> {
    type Target = TerminalNode<'a, C, S>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, C, S> Tree<'a, C, S> for ErrorNode<'a, C, S> {
    #[inline]
    fn parent(&self) -> Option<&'a RuleNode<'a, C, S>> {
        self.0.parent()
    }

    #[inline]
    fn set_parent(&self, parent: &'a RuleNode<'a, C, S>) -> Result<(), TreeError> {
        self.0.set_parent(parent)
    }

    #[inline]
    fn payload(&self) -> Payload<'_, C, S> {
        self.0.payload()
    }

    #[inline]
    fn children(&self) -> &'a [&'a Node<'a, C, S>] {
        &[]
    }
}

impl<'a, C, S: Token> SyntaxTree<'a, C, S> for ErrorNode<'a, C, S> {
    #[inline]
    fn source_interval(&self) -> Interval {
        self.0.source_interval()
    }
}

impl<'a, C: RuleContext, S: Token> ParseTree<'a, C, S> for ErrorNode<'a, C, S> {
    #[inline]
    fn text(&self) -> String {
        self.0.text()
    }

    #[inline]
    fn to_string_tree(&self, rule_names: &[&str]) -> String {
        self.0.to_string_tree(rule_names)
    }
}

impl<C, S: Token> fmt::Display for ErrorNode<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<C, S: fmt::Debug> fmt::Debug for ErrorNode<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorNode").field(&self.0).finish()
    }
}
