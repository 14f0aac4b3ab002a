//! Find command implementation

use grove_tree::trees::{escape_whitespace, rule_label};
use grove_tree::visitor::{ParseTreeVisitor, visit_children};
use grove_tree::{
    BasicContext, CommonToken, ErrorNode, Interval, RuleNode, SyntaxTree, TerminalNode, Token,
};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::FindArgs;
use crate::config::GroveConfig;
use crate::document::{CliNode, RuleRef, resolve_rule};

use super::with_tree;

pub fn run(args: &FindArgs, config: &GroveConfig) -> Result<()> {
    with_tree(&args.input, config, |root, rule_names| {
        let query = match (&args.rule, &args.token) {
            (Some(rule), _) => Query::Rule(
                resolve_rule(&RuleRef::Name(rule.clone()), rule_names).into_diagnostic()?,
            ),
            (None, Some(token)) => Query::Token(
                config
                    .token_type(token)
                    .ok_or_else(|| miette::miette!("Unknown token type '{}'", token))?,
            ),
            (None, None) => return Err(miette::miette!("Either --rule or --token is required")),
        };

        let matches = search(root, query, args.first, rule_names);
        if matches.is_empty() {
            info!("No matching nodes");
        }
        for found in matches {
            println!("{} {}", found.label, found.interval);
        }
        Ok(())
    })
}

/// What to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Rule nodes of the given rule index.
    Rule(usize),
    /// Leaves, error nodes included, whose token has the given type.
    Token(i32),
}

/// A matching node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub label: String,
    pub interval: Interval,
}

/// Returns the nodes under `root` matching `query`, in pre-order.
///
/// With `first`, the search stops at the first match and does not descend
/// into a matching rule.
pub fn search<'a>(
    root: &'a CliNode<'a>,
    query: Query,
    first: bool,
    rule_names: &[&str],
) -> Vec<Match> {
    let mut finder = Finder {
        query,
        first,
        rule_names,
    };
    finder.visit(root)
}

struct Finder<'c> {
    query: Query,
    first: bool,
    rule_names: &'c [&'c str],
}

impl Finder<'_> {
    fn leaf(&self, node: &TerminalNode<'_, BasicContext, CommonToken>) -> Vec<Match> {
        match (self.query, node.symbol()) {
            (Query::Token(token_type), Some(symbol)) if symbol.token_type() == token_type => {
                vec![Match {
                    label: escape_whitespace(&node.to_string()),
                    interval: node.source_interval(),
                }]
            }
            _ => Vec::new(),
        }
    }
}

impl<'a> ParseTreeVisitor<'a, BasicContext, CommonToken> for Finder<'_> {
    type Output = Vec<Match>;

    fn visit_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) -> Vec<Match> {
        let mut found = Vec::new();
        if let Query::Rule(rule_index) = self.query
            && node.rule_index() == rule_index
        {
            found.push(Match {
                label: rule_label(node.context(), self.rule_names),
                interval: node.source_interval(),
            });
            if self.first {
                return found;
            }
        }
        found.extend(visit_children(self, node));
        found
    }

    fn visit_terminal(
        &mut self,
        node: &'a TerminalNode<'a, BasicContext, CommonToken>,
    ) -> Vec<Match> {
        self.leaf(node)
    }

    fn visit_error_node(
        &mut self,
        node: &'a ErrorNode<'a, BasicContext, CommonToken>,
    ) -> Vec<Match> {
        self.leaf(node)
    }

    fn aggregate_result(&mut self, mut aggregate: Vec<Match>, next: Vec<Match>) -> Vec<Match> {
        aggregate.extend(next);
        aggregate
    }

    fn should_visit_next_child(
        &mut self,
        _node: &'a RuleNode<'a, BasicContext, CommonToken>,
        current: &Vec<Match>,
    ) -> bool {
        !(self.first && !current.is_empty())
    }
}
