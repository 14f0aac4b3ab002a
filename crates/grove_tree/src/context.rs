//! Rule-context capabilities.
//!
//! A rule node owns a context value describing the rule invocation. The tree
//! treats it as opaque apart from the two traits below.

use serde::{Deserialize, Serialize};

use crate::RuleNode;

/// Alternative number reported by contexts that do not track one.
pub const INVALID_ALT_NUMBER: usize = 0;

/// Generic per-invocation rule state.
pub trait RuleContext {
    /// Index of the grammar rule this context belongs to.
    fn rule_index(&self) -> usize;

    /// Outer alternative number the rule matched, or [`INVALID_ALT_NUMBER`].
    #[inline]
    fn alt_number(&self) -> usize {
        INVALID_ALT_NUMBER
    }
}

/// Rule-specific listener hooks.
///
/// The walker calls [`enter_rule`](RuleHooks::enter_rule) right after the
/// listener's `enter_every_rule`, and [`exit_rule`](RuleHooks::exit_rule) right
/// before its `exit_every_rule`. Generated contexts implement this to forward to
/// their grammar's listener methods; `L` is that listener type.
///
/// # Example
///
/// ```rust
/// use grove_tree::{CommonToken, ParseTreeListener, RuleContext, RuleHooks, RuleNode};
///
/// #[derive(Debug)]
/// enum ExprContext {
///     Sum,
///     Atom,
/// }
///
/// impl RuleContext for ExprContext {
///     fn rule_index(&self) -> usize {
///         match self {
///             ExprContext::Sum => 0,
///             ExprContext::Atom => 1,
///         }
///     }
/// }
///
/// trait ExprListener<'a>: ParseTreeListener<'a, ExprContext, CommonToken> {
///     fn enter_sum(&mut self, _node: &'a RuleNode<'a, ExprContext, CommonToken>) {}
/// }
///
/// impl<'a, L: ExprListener<'a> + ?Sized> RuleHooks<'a, CommonToken, L> for ExprContext {
///     fn enter_rule(node: &'a RuleNode<'a, Self, CommonToken>, listener: &mut L) {
///         if let ExprContext::Sum = node.context() {
///             listener.enter_sum(node);
///         }
///     }
/// }
/// ```
pub trait RuleHooks<'a, S: 'a, L: ?Sized>: RuleContext + Sized + 'a {
    /// Runs rule-specific enter logic.
    #[inline]
    fn enter_rule(_node: &'a RuleNode<'a, Self, S>, _listener: &mut L) {}

    /// Runs rule-specific exit logic.
    #[inline]
    fn exit_rule(_node: &'a RuleNode<'a, Self, S>, _listener: &mut L) {}
}

/// A context carrying only the rule index and alternative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasicContext {
    /// Grammar rule index.
    pub rule_index: usize,
    /// Outer alternative number.
    #[serde(default)]
    pub alt_number: usize,
}

impl BasicContext {
    /// Creates a context for the given rule.
    #[inline]
    pub const fn new(rule_index: usize) -> Self {
        Self {
            rule_index,
            alt_number: INVALID_ALT_NUMBER,
        }
    }

    /// Sets the alternative number.
    #[inline]
    #[must_use]
    pub const fn with_alt(mut self, alt_number: usize) -> Self {
        self.alt_number = alt_number;
        self
    }
}

impl RuleContext for BasicContext {
    #[inline]
    fn rule_index(&self) -> usize {
        self.rule_index
    }

    #[inline]
    fn alt_number(&self) -> usize {
        self.alt_number
    }
}

impl<'a, S: 'a, L: ?Sized> RuleHooks<'a, S, L> for BasicContext {}
