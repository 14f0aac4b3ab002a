//! Listener trait notified by [`ParseTreeWalker`](super::ParseTreeWalker).

use crate::{ErrorNode, RuleNode, TerminalNode};

/// Receives events while a tree is walked.
///
/// Every method defaults to a no-op, so implementations only override the
/// events they need. Rule-specific callbacks are not part of this trait; they
/// are dispatched through the context type's [`RuleHooks`](crate::RuleHooks).
pub trait ParseTreeListener<'a, C, S> {
    /// Called for every plain terminal.
    #[inline]
    fn visit_terminal(&mut self, _node: &'a TerminalNode<'a, C, S>) {}

    /// Called for every error node, instead of `visit_terminal`.
    #[inline]
    fn visit_error_node(&mut self, _node: &'a ErrorNode<'a, C, S>) {}

    /// Called when a rule node is entered, before its children.
    #[inline]
    fn enter_every_rule(&mut self, _node: &'a RuleNode<'a, C, S>) {}

    /// Called when a rule node is left, after its children.
    #[inline]
    fn exit_every_rule(&mut self, _node: &'a RuleNode<'a, C, S>) {}
}
