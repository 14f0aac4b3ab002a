//! Walk command implementation

use std::path::Path;

use grove_tree::trees::{escape_whitespace, rule_label};
use grove_tree::visitor::{ParseTreeListener, walk};
use grove_tree::{
    BasicContext, CommonToken, ErrorNode, RuleNode, SyntaxTree, TerminalNode, Token,
};
use miette::Result;

use crate::config::GroveConfig;
use crate::document::CliNode;

use super::with_tree;

pub fn run(input: &Path, config: &GroveConfig) -> Result<()> {
    with_tree(input, config, |root, rule_names| {
        print!("{}", render(root, rule_names, config));
        Ok(())
    })
}

/// Walks `root` and returns one indented line per listener event.
pub fn render<'a>(root: &'a CliNode<'a>, rule_names: &[&str], config: &GroveConfig) -> String {
    let mut printer = EventPrinter::new(rule_names, config);
    walk(&mut printer, root);
    printer.out
}

/// Listener that writes every event it receives.
struct EventPrinter<'c> {
    rule_names: &'c [&'c str],
    config: &'c GroveConfig,
    depth: usize,
    out: String,
}

impl<'c> EventPrinter<'c> {
    fn new(rule_names: &'c [&'c str], config: &'c GroveConfig) -> Self {
        Self {
            rule_names,
            config,
            depth: 0,
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        let pad = self.depth * self.config.indent;
        self.out.push_str(&" ".repeat(pad));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn rule_line(&self, event: &str, node: &RuleNode<'_, BasicContext, CommonToken>) -> String {
        let label = rule_label(node.context(), self.rule_names);
        if self.config.show_intervals {
            format!("{event} {label} {}", node.source_interval())
        } else {
            format!("{event} {label}")
        }
    }

    fn leaf_line(&self, event: &str, node: &TerminalNode<'_, BasicContext, CommonToken>) -> String {
        let text = escape_whitespace(&node.to_string());
        match node
            .symbol()
            .and_then(|symbol| self.config.token_name(symbol.token_type()))
        {
            Some(name) => format!("{event} {text} ({name})"),
            None => format!("{event} {text}"),
        }
    }
}

impl<'a> ParseTreeListener<'a, BasicContext, CommonToken> for EventPrinter<'_> {
    fn visit_terminal(&mut self, node: &'a TerminalNode<'a, BasicContext, CommonToken>) {
        let line = self.leaf_line("terminal", node);
        self.line(&line);
    }

    fn visit_error_node(&mut self, node: &'a ErrorNode<'a, BasicContext, CommonToken>) {
        let line = self.leaf_line("error", node);
        self.line(&line);
    }

    fn enter_every_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) {
        let line = self.rule_line("enter", node);
        self.line(&line);
        self.depth += 1;
    }

    fn exit_every_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) {
        self.depth = self.depth.saturating_sub(1);
        let line = self.rule_line("exit", node);
        self.line(&line);
    }
}
