//! Stats command implementation

use std::fmt;
use std::path::Path;

use grove_tree::visitor::{ParseTreeVisitor, visit_children};
use grove_tree::{BasicContext, CommonToken, ErrorNode, RuleNode, TerminalNode, Tree};
use miette::Result;

use crate::config::GroveConfig;
use crate::document::CliNode;

use super::with_tree;

pub fn run(input: &Path, config: &GroveConfig) -> Result<()> {
    with_tree(input, config, |root, _| {
        print!("{}", collect(root));
        Ok(())
    })
}

/// Node counts of a tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub rules: usize,
    pub terminals: usize,
    pub errors: usize,
    /// Depth of the deepest node; the root is at depth 0.
    pub max_depth: usize,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rules: {}", self.rules)?;
        writeln!(f, "terminals: {}", self.terminals)?;
        writeln!(f, "errors: {}", self.errors)?;
        writeln!(f, "max depth: {}", self.max_depth)
    }
}

/// Counts the nodes of `root` by kind.
pub fn collect<'a>(root: &'a CliNode<'a>) -> TreeStats {
    StatsVisitor.visit(root)
}

/// Sums the counts of every subtree.
struct StatsVisitor;

impl<'a> ParseTreeVisitor<'a, BasicContext, CommonToken> for StatsVisitor {
    type Output = TreeStats;

    fn visit_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) -> TreeStats {
        let below = visit_children(self, node);
        TreeStats {
            rules: below.rules + 1,
            max_depth: if node.child_count() == 0 {
                0
            } else {
                below.max_depth + 1
            },
            ..below
        }
    }

    fn visit_terminal(
        &mut self,
        _node: &'a TerminalNode<'a, BasicContext, CommonToken>,
    ) -> TreeStats {
        TreeStats {
            terminals: 1,
            ..TreeStats::default()
        }
    }

    fn visit_error_node(
        &mut self,
        _node: &'a ErrorNode<'a, BasicContext, CommonToken>,
    ) -> TreeStats {
        TreeStats {
            errors: 1,
            ..TreeStats::default()
        }
    }

    fn aggregate_result(&mut self, aggregate: TreeStats, next: TreeStats) -> TreeStats {
        TreeStats {
            rules: aggregate.rules + next.rules,
            terminals: aggregate.terminals + next.terminals,
            errors: aggregate.errors + next.errors,
            max_depth: aggregate.max_depth.max(next.max_depth),
        }
    }
}
