//! CLI configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Display settings shared by all commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroveConfig {
    /// Rule names by rule index, used when a document carries none.
    #[serde(default)]
    pub rule_names: Vec<String>,

    /// Token names by token type.
    #[serde(default)]
    pub token_names: BTreeMap<i32, String>,

    /// Indentation per nesting level in `walk` output.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Whether `walk` prints the source interval of each rule.
    #[serde(default)]
    pub show_intervals: bool,
}

fn default_indent() -> usize {
    2
}

impl Default for GroveConfig {
    fn default() -> Self {
        Self {
            rule_names: Vec::new(),
            token_names: BTreeMap::new(),
            indent: default_indent(),
            show_intervals: false,
        }
    }
}

impl GroveConfig {
    /// File names looked up in the working directory, in priority order.
    pub const CONFIG_FILES: &'static [&'static str] = &["grove.jsonc", "grove.json"];

    /// Finds a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| CliError::config(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses configuration from JSON. Comments are accepted.
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| CliError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| CliError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the configured name of a token type.
    pub fn token_name(&self, token_type: i32) -> Option<&str> {
        self.token_names.get(&token_type).map(String::as_str)
    }

    /// Resolves a token type from its configured name or its number.
    pub fn token_type(&self, name_or_type: &str) -> Option<i32> {
        self.token_names
            .iter()
            .find(|(_, name)| name.as_str() == name_or_type)
            .map(|(&token_type, _)| token_type)
            .or_else(|| name_or_type.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_default() {
        let config = GroveConfig::default();
        assert!(config.rule_names.is_empty());
        assert_eq!(config.indent, 2);
        assert!(!config.show_intervals);
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // names for the expression grammar
            "rule_names": ["expr", "atom"],
            "token_names": { "1": "NUM", "2": "PLUS" },
            "indent": 4
        }"#;

        let config = GroveConfig::from_json(json).unwrap();
        assert_eq!(config.rule_names, vec!["expr", "atom"]);
        assert_eq!(config.token_name(2), Some("PLUS"));
        assert_eq!(config.indent, 4);
        assert!(!config.show_intervals);
    }

    #[test]
    fn test_config_empty_document() {
        assert_eq!(GroveConfig::from_json("").unwrap(), GroveConfig::default());
    }

    #[test]
    fn test_config_invalid() {
        assert!(matches!(
            GroveConfig::from_json("invalid json"),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            GroveConfig::from_json(r#"{"indent": "wide"}"#),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_token_type_lookup() {
        let config = GroveConfig::from_json(r#"{"token_names": {"7": "ID"}}"#).unwrap();
        assert_eq!(config.token_type("ID"), Some(7));
        assert_eq!(config.token_type("-1"), Some(-1));
        assert_eq!(config.token_type("NOPE"), None);
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GroveConfig::discover(dir.path()), None);

        fs::write(dir.path().join("grove.json"), "{}").unwrap();
        fs::write(dir.path().join("grove.jsonc"), "{}").unwrap();
        assert_eq!(
            GroveConfig::discover(dir.path()),
            Some(dir.path().join("grove.jsonc"))
        );
    }
}
