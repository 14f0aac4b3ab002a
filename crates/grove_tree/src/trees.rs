//! Tree queries and renderings.
//!
//! Iteration here uses explicit stacks, so arbitrarily deep trees can be
//! searched without growing the call stack.

use crate::context::INVALID_ALT_NUMBER;
use crate::{Node, RuleContext, RuleNode, TerminalNode, Token, Tree};

/// Pre-order iterator over a subtree, including its root.
pub struct Descendants<'a, C, S> {
    stack: Vec<&'a Node<'a, C, S>>,
}

impl<'a, C, S> Descendants<'a, C, S> {
    /// Starts at `root`.
    pub fn new(root: &'a Node<'a, C, S>) -> Self {
        Self { stack: vec![root] }
    }

    pub(crate) fn of_children(children: &'a [&'a Node<'a, C, S>]) -> Self {
        Self {
            stack: children.iter().rev().copied().collect(),
        }
    }
}

impl<'a, C, S> Iterator for Descendants<'a, C, S> {
    type Item = &'a Node<'a, C, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev().copied());
        Some(node)
    }
}

/// Iterator over enclosing rule nodes, nearest first.
pub struct Ancestors<'a, C, S> {
    next: Option<&'a RuleNode<'a, C, S>>,
}

impl<'a, C, S> Ancestors<'a, C, S> {
    pub(crate) fn new(start: Option<&'a RuleNode<'a, C, S>>) -> Self {
        Self { next: start }
    }
}

impl<'a, C, S> Iterator for Ancestors<'a, C, S> {
    type Item = &'a RuleNode<'a, C, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

impl<'a, C, S> Node<'a, C, S> {
    /// Iterates over this subtree in pre-order, starting with this node.
    #[inline]
    pub fn descendants(&'a self) -> Descendants<'a, C, S> {
        Descendants::new(self)
    }
}

/// Returns true if `ancestor` encloses `node`. A node is not its own ancestor.
pub fn is_ancestor_of<'a, C: 'a, S: 'a>(
    ancestor: &RuleNode<'a, C, S>,
    node: &impl Tree<'a, C, S>,
) -> bool {
    node.ancestors().any(|a| std::ptr::eq(a, ancestor))
}

/// Collects every leaf under `tree` whose token has the given type, in
/// left-to-right order. Error nodes are leaves too and are included.
pub fn find_all_token_nodes<'a, C, S: Token>(
    tree: &'a Node<'a, C, S>,
    token_type: i32,
) -> Vec<&'a TerminalNode<'a, C, S>> {
    tree.descendants()
        .filter_map(Node::as_terminal)
        .filter(|leaf| leaf.symbol().is_some_and(|s| s.token_type() == token_type))
        .collect()
}

/// Collects every rule node under `tree`, `tree` included, invoking the given
/// rule, in pre-order.
pub fn find_all_rule_nodes<'a, C: RuleContext, S>(
    tree: &'a Node<'a, C, S>,
    rule_index: usize,
) -> Vec<&'a RuleNode<'a, C, S>> {
    tree.descendants()
        .filter_map(Node::as_rule)
        .filter(|rule| rule.rule_index() == rule_index)
        .collect()
}

/// Returns the label of a single node: the rule label or the rendered token.
pub fn node_text<C: RuleContext, S: Token>(node: &Node<'_, C, S>, rule_names: &[&str]) -> String {
    match node {
        Node::Rule(rule) => rule_label(rule.context(), rule_names),
        Node::Terminal(leaf) => leaf.to_string(),
        Node::Error(leaf) => leaf.to_string(),
    }
}

/// Escapes tabs, newlines and carriage returns so a rendering stays on one line.
pub fn escape_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns the rule name for `context`, or its index when `rule_names` has no
/// entry, suffixed with `:alt` when an alternative number is recorded.
pub fn rule_label<C: RuleContext>(context: &C, rule_names: &[&str]) -> String {
    let index = context.rule_index();
    let name = rule_names
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| index.to_string());

    match context.alt_number() {
        INVALID_ALT_NUMBER => name,
        alt => format!("{name}:{alt}"),
    }
}

pub(crate) fn to_string_tree<C: RuleContext, S: Token>(
    node: &Node<'_, C, S>,
    rule_names: &[&str],
) -> String {
    let mut out = String::new();
    write_node(node, rule_names, &mut out);
    out
}

fn write_node<C: RuleContext, S: Token>(
    node: &Node<'_, C, S>,
    rule_names: &[&str],
    out: &mut String,
) {
    match node {
        Node::Rule(rule) => write_rule(rule, rule_names, out),
        Node::Terminal(_) | Node::Error(_) => {
            out.push_str(&escape_whitespace(&node_text(node, rule_names)));
        }
    }
}

pub(crate) fn write_rule<C: RuleContext, S: Token>(
    rule: &RuleNode<'_, C, S>,
    rule_names: &[&str],
    out: &mut String,
) {
    let label = escape_whitespace(&rule_label(rule.context(), rule_names));
    if rule.child_count() == 0 {
        out.push_str(&label);
        return;
    }

    out.push('(');
    out.push_str(&label);
    for child in rule.children() {
        out.push(' ');
        write_node(child, rule_names, out);
    }
    out.push(')');
}
