//! Tree command implementation

use std::path::Path;

use grove_tree::ParseTree;
use miette::Result;

use crate::config::GroveConfig;

use super::with_tree;

pub fn run(input: &Path, config: &GroveConfig) -> Result<()> {
    with_tree(input, config, |root, rule_names| {
        println!("{}", root.to_string_tree(rule_names));
        Ok(())
    })
}
