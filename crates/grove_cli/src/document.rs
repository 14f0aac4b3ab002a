//! JSON tree documents.
//!
//! A document lists its tokens once and describes the tree by referring to
//! them by position:
//!
//! ```json
//! {
//!   "ruleNames": ["expr", "atom"],
//!   "tokens": [{"type": 1, "text": "1"}, {"type": 2, "text": "+"}],
//!   "tree": {"rule": "expr", "children": [{"token": 0}, {"error": 1}, {"missing": true}]}
//! }
//! ```

use std::fs;
use std::path::Path;

use grove_tree::{BasicContext, CommonToken, Node, TreeArena, TreeBuilder};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::config::GroveConfig;
use crate::error::CliError;

/// The concrete tree type the CLI works with.
pub type CliNode<'a> = Node<'a, BasicContext, CommonToken>;

/// A parse tree serialized as JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Rule names by rule index.
    #[serde(default)]
    pub rule_names: Vec<String>,

    /// Tokens referenced by the tree.
    #[serde(default, deserialize_with = "tokens_by_position")]
    pub tokens: Vec<CommonToken>,

    /// The root node.
    pub tree: NodeSpec,
}

/// One node of a document tree.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// A rule invocation.
    Rule {
        rule: RuleRef,
        #[serde(default)]
        alt: usize,
        #[serde(default)]
        children: Vec<NodeSpec>,
    },
    /// A matched token, by position in the token list.
    Token { token: usize },
    /// A terminal whose token is absent. Only `true` is accepted.
    Missing { missing: bool },
    /// An error-recovery token; `null` for one the parser conjured.
    Error {
        // Required, but may be null.
        #[serde(deserialize_with = "Option::deserialize")]
        error: Option<usize>,
    },
}

/// A rule given by name or by index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RuleRef {
    Index(usize),
    Name(String),
}

impl Document {
    /// Loads a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::document(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parses a document from JSON.
    ///
    /// Tokens without an explicit `index` get their position in the list.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        serde_json::from_str(json)
            .map_err(|e| CliError::document(format!("Invalid document: {}", e)))
    }

    /// Returns the rule names to render with: the document's own, or the
    /// configured ones when the document has none.
    pub fn rule_names<'c>(&'c self, config: &'c GroveConfig) -> Vec<&'c str> {
        let names = if self.rule_names.is_empty() {
            &config.rule_names
        } else {
            &self.rule_names
        };
        names.iter().map(String::as_str).collect()
    }

    /// Builds the described tree in `arena`.
    pub fn build<'a>(
        &'a self,
        arena: &'a TreeArena,
        rule_names: &[&str],
    ) -> Result<&'a CliNode<'a>, CliError> {
        if !matches!(self.tree, NodeSpec::Rule { .. }) {
            return Err(CliError::document("The root of a tree must be a rule"));
        }

        let mut builder = TreeBuilder::new(arena);
        self.emit(&self.tree, &mut builder, rule_names)?;
        let root = builder.finish()?;
        debug!(tokens = self.tokens.len(), "Loaded tree document");
        Ok(root)
    }

    fn emit<'a>(
        &'a self,
        spec: &NodeSpec,
        builder: &mut TreeBuilder<'a, BasicContext, CommonToken>,
        rule_names: &[&str],
    ) -> Result<(), CliError> {
        match spec {
            NodeSpec::Rule {
                rule,
                alt,
                children,
            } => {
                let rule_index = resolve_rule(rule, rule_names)?;
                builder.start_rule(BasicContext::new(rule_index).with_alt(*alt))?;
                for child in children {
                    self.emit(child, builder, rule_names)?;
                }
                builder.finish_rule()?;
            }
            NodeSpec::Token { token } => {
                builder.token(self.token(*token)?)?;
            }
            NodeSpec::Missing { missing: true } => {
                builder.missing_token()?;
            }
            NodeSpec::Missing { missing: false } => {
                return Err(CliError::document("\"missing\" must be true"));
            }
            NodeSpec::Error { error } => {
                let symbol = error.map(|index| self.token(index)).transpose()?;
                builder.error_token(symbol)?;
            }
        }
        Ok(())
    }

    fn token(&self, index: usize) -> Result<&CommonToken, CliError> {
        self.tokens.get(index).ok_or(CliError::TokenOutOfRange {
            index,
            len: self.tokens.len(),
        })
    }
}

/// A token entry as written in a document.
#[derive(Debug, Deserialize)]
struct TokenSpec {
    #[serde(rename = "type")]
    token_type: i32,
    #[serde(default)]
    index: Option<isize>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    column: u32,
}

fn tokens_by_position<'de, D>(deserializer: D) -> Result<Vec<CommonToken>, D::Error>
where
    D: Deserializer<'de>,
{
    let specs = Vec::<TokenSpec>::deserialize(deserializer)?;
    Ok(specs
        .into_iter()
        .enumerate()
        .map(|(position, spec)| {
            CommonToken::new(spec.token_type, spec.text)
                .with_index(spec.index.unwrap_or(position as isize))
                .with_position(spec.line, spec.column)
        })
        .collect())
}

/// Resolves a rule reference to a rule index.
pub fn resolve_rule(rule: &RuleRef, rule_names: &[&str]) -> Result<usize, CliError> {
    match rule {
        RuleRef::Index(index) => Ok(*index),
        RuleRef::Name(name) => rule_names
            .iter()
            .position(|candidate| candidate == name)
            .or_else(|| name.parse().ok())
            .ok_or_else(|| CliError::UnknownRule(name.clone())),
    }
}
