//! Top-down tree construction.

use tracing::{debug, trace};

use crate::arena::check_detached;
use crate::{
    ErrorNode, Node, RuleContext, SyntaxTree, TerminalNode, Token, Tree, TreeArena, TreeError,
};

/// A rule whose children are still being collected.
struct OpenRule<'a, C, S> {
    context: C,
    children: Vec<&'a Node<'a, C, S>>,
}

/// Builds a parse tree in the order a parser produces it.
///
/// Rules are opened with [`start_rule`](Self::start_rule), filled with leaves
/// and nested rules, and closed with [`finish_rule`](Self::finish_rule). Nodes
/// are allocated when they are complete, and children are attached to their
/// parent when that parent closes, so a child removed with
/// [`remove_last_child`](Self::remove_last_child) comes back unattached.
///
/// # Example
///
/// ```rust
/// use grove_tree::{BasicContext, CommonToken, ParseTree, TreeArena, TreeBuilder};
///
/// let tokens = [
///     CommonToken::new(1, "1").with_index(0),
///     CommonToken::new(2, "+").with_index(1),
///     CommonToken::new(1, "2").with_index(2),
/// ];
/// let arena = TreeArena::new();
/// let mut builder = TreeBuilder::new(&arena);
///
/// builder.start_rule(BasicContext::new(0))?;
/// builder.token(&tokens[0])?;
/// builder.token(&tokens[1])?;
/// builder.start_rule(BasicContext::new(1))?;
/// builder.token(&tokens[2])?;
/// builder.finish_rule()?;
/// builder.finish_rule()?;
///
/// let root = builder.finish()?;
/// assert_eq!(root.to_string_tree(&["expr", "atom"]), "(expr 1 + (atom 2))");
/// # Ok::<(), grove_tree::TreeError>(())
/// ```
pub struct TreeBuilder<'a, C, S> {
    arena: &'a TreeArena,
    open: Vec<OpenRule<'a, C, S>>,
    root: Option<&'a Node<'a, C, S>>,
    node_count: usize,
}

impl<'a, C: RuleContext, S: Token> TreeBuilder<'a, C, S> {
    /// Creates a builder allocating into `arena`.
    pub fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            open: Vec::new(),
            root: None,
            node_count: 0,
        }
    }

    /// Returns the number of currently open rules.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Opens a rule. The first rule opened becomes the root.
    pub fn start_rule(&mut self, context: C) -> Result<(), TreeError> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(TreeError::RootAlreadyBuilt);
        }

        trace!(rule = context.rule_index(), depth = self.open.len(), "Start rule");
        self.open.push(OpenRule {
            context,
            children: Vec::new(),
        });
        Ok(())
    }

    /// Adds a matched token to the open rule.
    pub fn token(&mut self, symbol: &'a S) -> Result<&'a Node<'a, C, S>, TreeError> {
        self.push_leaf(Node::Terminal(TerminalNode::new(Some(symbol))), "token")
    }

    /// Adds a terminal without a token, for input the parser conjured.
    pub fn missing_token(&mut self) -> Result<&'a Node<'a, C, S>, TreeError> {
        self.push_leaf(Node::Terminal(TerminalNode::new(None)), "missing token")
    }

    /// Adds an error-recovery token to the open rule.
    pub fn error_token(&mut self, symbol: Option<&'a S>) -> Result<&'a Node<'a, C, S>, TreeError> {
        self.push_leaf(Node::Error(ErrorNode::new(symbol)), "error token")
    }

    /// Grafts a complete, unattached subtree onto the open rule.
    ///
    /// A node already collected by an open rule counts as attached.
    pub fn attach(&mut self, subtree: &'a Node<'a, C, S>) -> Result<(), TreeError> {
        let pending = self
            .open
            .iter()
            .flat_map(|open| &open.children)
            .any(|child| std::ptr::eq(*child, subtree));
        if pending || subtree.parent().is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        let open = self
            .open
            .last_mut()
            .ok_or(TreeError::NoOpenRule("subtree"))?;
        open.children.push(subtree);
        self.node_count += subtree.descendants().count();
        Ok(())
    }

    /// Detaches and returns the last child of the open rule.
    pub fn remove_last_child(&mut self) -> Option<&'a Node<'a, C, S>> {
        let removed = self.open.last_mut()?.children.pop()?;
        self.node_count -= removed.descendants().count();
        Some(removed)
    }

    /// Closes the innermost open rule and attaches its children to it.
    ///
    /// On error the rule stays open and no child is modified.
    pub fn finish_rule(&mut self) -> Result<&'a Node<'a, C, S>, TreeError> {
        let open = self.open.last().ok_or(TreeError::NoOpenRule("rule end"))?;
        check_detached(&open.children)?;
        let Some(OpenRule { context, children }) = self.open.pop() else {
            return Err(TreeError::NoOpenRule("rule end"));
        };

        let rule_index = context.rule_index();
        let node = self.arena.rule(context, &children)?;
        self.node_count += 1;
        trace!(
            rule = rule_index,
            children = children.len(),
            interval = %node.source_interval(),
            "Finish rule"
        );

        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
        Ok(node)
    }

    /// Returns the completed root.
    pub fn finish(self) -> Result<&'a Node<'a, C, S>, TreeError> {
        if !self.open.is_empty() {
            return Err(TreeError::UnclosedRules(self.open.len()));
        }
        let root = self.root.ok_or(TreeError::EmptyTree)?;
        debug!(nodes = self.node_count, "Built parse tree");
        Ok(root)
    }

    fn push_leaf(
        &mut self,
        leaf: Node<'a, C, S>,
        what: &'static str,
    ) -> Result<&'a Node<'a, C, S>, TreeError> {
        let open = self.open.last_mut().ok_or(TreeError::NoOpenRule(what))?;
        let node = self.arena.alloc(leaf);
        open.children.push(node);
        self.node_count += 1;
        Ok(node)
    }
}
