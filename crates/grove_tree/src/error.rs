//! Tree construction error types.

use thiserror::Error;

/// Structural contract violations raised while assembling a tree.
///
/// These indicate a bug in whatever produces the tree, not a condition to
/// recover from at traversal time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node that already has a parent was attached again.
    #[error("Node is already attached to a parent")]
    AlreadyAttached,

    /// A child or rule end was emitted while no rule was open.
    #[error("No open rule to attach {0} to")]
    NoOpenRule(&'static str),

    /// The builder was finished with rules still open.
    #[error("{0} rule(s) still open")]
    UnclosedRules(usize),

    /// The builder was finished without ever completing a rule.
    #[error("Tree has no root rule")]
    EmptyTree,

    /// A new top-level rule was started after the root was completed.
    #[error("Root rule is already complete")]
    RootAlreadyBuilt,
}
