//! Visitor trait for computing values over a parse tree.
//!
//! Each method has a default, so a visitor overrides only what it cares about:
//! leaves yield [`default_result`](ParseTreeVisitor::default_result), and rules
//! fold their children's results with
//! [`aggregate_result`](ParseTreeVisitor::aggregate_result).

use crate::{ErrorNode, Node, RuleNode, TerminalNode, Tree};

/// Visitor trait producing a value of type [`Output`](Self::Output) per node.
///
/// # Lifetime
///
/// The `'a` lifetime ties visited nodes to their arena, so a visitor may keep
/// references to the nodes it sees.
///
/// # Early termination
///
/// [`should_visit_next_child`](Self::should_visit_next_child) is consulted
/// before every child of a rule, the first included. Returning `false` stops
/// that rule's children; the aggregate collected so far is its result.
pub trait ParseTreeVisitor<'a, C, S> {
    /// Result type of every visit.
    type Output: Default;

    /// Visits any node. Equivalent to `tree.accept(self)`.
    #[inline]
    fn visit(&mut self, tree: &'a Node<'a, C, S>) -> Self::Output {
        tree.accept(self)
    }

    /// Visits a rule node. Defaults to visiting its children.
    #[inline]
    fn visit_rule(&mut self, node: &'a RuleNode<'a, C, S>) -> Self::Output {
        self.visit_children(node)
    }

    /// Visits the children of a rule and aggregates their results.
    #[inline]
    fn visit_children(&mut self, node: &'a RuleNode<'a, C, S>) -> Self::Output {
        visit_children(self, node)
    }

    /// Visits a plain terminal.
    #[inline]
    fn visit_terminal(&mut self, _node: &'a TerminalNode<'a, C, S>) -> Self::Output {
        self.default_result()
    }

    /// Visits an error node.
    #[inline]
    fn visit_error_node(&mut self, _node: &'a ErrorNode<'a, C, S>) -> Self::Output {
        self.default_result()
    }

    /// The result for leaves and the seed for aggregation.
    #[inline]
    fn default_result(&mut self) -> Self::Output {
        Self::Output::default()
    }

    /// Combines the aggregate so far with the next child's result. Defaults to
    /// keeping `next`, so the last visited child wins.
    #[inline]
    fn aggregate_result(&mut self, _aggregate: Self::Output, next: Self::Output) -> Self::Output {
        next
    }

    /// Decides whether to visit the next child of `node`.
    #[inline]
    fn should_visit_next_child(
        &mut self,
        _node: &'a RuleNode<'a, C, S>,
        _current: &Self::Output,
    ) -> bool {
        true
    }
}

/// Visits the children of `node` in order and folds their results.
///
/// This is the default body of [`ParseTreeVisitor::visit_children`]; call it
/// from an override to keep the default traversal.
pub fn visit_children<'a, C, S, V>(visitor: &mut V, node: &'a RuleNode<'a, C, S>) -> V::Output
where
    V: ParseTreeVisitor<'a, C, S> + ?Sized,
{
    let mut result = visitor.default_result();
    for child in node.children() {
        if !visitor.should_visit_next_child(node, &result) {
            break;
        }
        let child_result = child.accept(visitor);
        result = visitor.aggregate_result(result, child_result);
    }
    result
}
