//! Command implementations

pub mod find;
pub mod stats;
pub mod text;
pub mod tree;
pub mod walk;

use std::path::Path;

use grove_tree::TreeArena;
use miette::{IntoDiagnostic, Result};

use crate::config::GroveConfig;
use crate::document::{CliNode, Document};

/// Loads `input`, builds its tree and passes the root and the rule names to `f`.
fn with_tree<R>(
    input: &Path,
    config: &GroveConfig,
    f: impl for<'a> FnOnce(&'a CliNode<'a>, &[&str]) -> Result<R>,
) -> Result<R> {
    let document = Document::from_file(input).into_diagnostic()?;
    let arena = TreeArena::new();
    let rule_names = document.rule_names(config);
    let root = document.build(&arena, &rule_names).into_diagnostic()?;
    f(root, &rule_names)
}

#[cfg(test)]
pub(crate) mod test_support {
    use grove_tree::TreeArena;

    use crate::document::{CliNode, Document};

    /// `expr[1, +, atom[2], <error !>]` with named rules and tokens.
    pub const SAMPLE: &str = r#"{
        "ruleNames": ["expr", "atom"],
        "tokens": [
            {"type": 1, "text": "1"},
            {"type": 2, "text": "+"},
            {"type": 1, "text": "2"},
            {"type": 3, "text": "!"}
        ],
        "tree": {"rule": "expr", "children": [
            {"token": 0},
            {"token": 1},
            {"rule": "atom", "children": [{"token": 2}]},
            {"error": 3}
        ]}
    }"#;

    pub fn sample_document() -> Document {
        Document::from_json(SAMPLE).unwrap()
    }

    pub fn build<'a>(document: &'a Document, arena: &'a TreeArena) -> &'a CliNode<'a> {
        let names: Vec<&str> = document.rule_names.iter().map(String::as_str).collect();
        document.build(arena, &names).unwrap()
    }
}
