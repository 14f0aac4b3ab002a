//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command for the grove CLI
fn grove_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_grove"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        grove_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        grove_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod render_commands {
    use super::*;

    #[test]
    fn prints_text() {
        grove_cmd()
            .arg("text")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("1+2<EOF>\n");
    }

    #[test]
    fn prints_lisp_tree() {
        grove_cmd()
            .arg("tree")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("(expr (atom 1) + (atom:2 2) <EOF>)\n");
    }

    #[test]
    fn renders_missing_and_error_leaves() {
        grove_cmd()
            .arg("tree")
            .arg(fixture("recovered.json"))
            .assert()
            .success()
            .stdout("(0 x ) <missing>)\n");
    }
}

mod walk_command {
    use super::*;

    #[test]
    fn prints_events_in_walk_order() {
        let expected = "\
enter expr
  enter atom
    terminal 1
  exit atom
  terminal +
  enter atom:2
    terminal 2
  exit atom:2
  terminal <EOF>
exit expr
";
        grove_cmd()
            .arg("walk")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout(expected);
    }

    #[test]
    fn reports_error_nodes() {
        grove_cmd()
            .arg("walk")
            .arg(fixture("recovered.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("  error )\n"))
            .stdout(predicate::str::contains("  terminal <missing>\n"));
    }
}

mod stats_command {
    use super::*;

    #[test]
    fn counts_nodes() {
        grove_cmd()
            .arg("stats")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("rules: 3\nterminals: 4\nerrors: 0\nmax depth: 2\n");
    }

    #[test]
    fn counts_error_nodes_separately() {
        grove_cmd()
            .arg("stats")
            .arg(fixture("recovered.json"))
            .assert()
            .success()
            .stdout("rules: 1\nterminals: 2\nerrors: 1\nmax depth: 1\n");
    }
}

mod find_command {
    use super::*;

    #[test]
    fn finds_rules_by_name() {
        grove_cmd()
            .args(["find", "--rule", "atom"])
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("atom 0..0\natom:2 2..2\n");
    }

    #[test]
    fn stops_at_first_match() {
        grove_cmd()
            .args(["find", "--rule", "atom", "--first"])
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("atom 0..0\n");
    }

    #[test]
    fn finds_tokens_by_type() {
        grove_cmd()
            .args(["find", "--token", "1"])
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("1 0..0\n2 2..2\n");
    }

    #[test]
    fn finds_eof_token() {
        grove_cmd()
            .args(["find", "--token", "-1"])
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("<EOF> 3..3\n");
    }

    #[test]
    fn requires_a_query() {
        grove_cmd()
            .arg("find")
            .arg(fixture("expr.json"))
            .assert()
            .failure();
    }

    #[test]
    fn rejects_rule_and_token_together() {
        grove_cmd()
            .args(["find", "--rule", "atom", "--token", "1"])
            .arg(fixture("expr.json"))
            .assert()
            .failure();
    }

    #[test]
    fn fails_on_unknown_rule() {
        grove_cmd()
            .args(["find", "--rule", "nope"])
            .arg(fixture("expr.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Unknown rule 'nope'"));
    }
}

mod config_file_handling {
    use super::*;

    #[test]
    fn uses_rule_names_from_discovered_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("grove.jsonc"),
            r#"{
                // the recovered fixture carries no names
                "rule_names": ["stmt"]
            }"#,
        )
        .unwrap();

        grove_cmd()
            .current_dir(temp_dir.path())
            .arg("tree")
            .arg(fixture("recovered.json"))
            .assert()
            .success()
            .stdout("(stmt x ) <missing>)\n")
            .stderr(predicate::str::contains("Using config"));
    }

    #[test]
    fn document_names_take_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("custom.json");
        fs::write(&config_file, r#"{"rule_names": ["program", "term"]}"#).unwrap();

        grove_cmd()
            .arg("--config")
            .arg(&config_file)
            .arg("tree")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("(expr "));
    }

    #[test]
    fn applies_token_names_and_intervals() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("custom.json");
        fs::write(
            &config_file,
            r#"{"token_names": {"1": "NUM"}, "indent": 4, "show_intervals": true}"#,
        )
        .unwrap();

        grove_cmd()
            .arg("--config")
            .arg(&config_file)
            .arg("walk")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("enter expr 0..3\n"))
            .stdout(predicate::str::contains("        terminal 1 (NUM)\n"));
    }

    #[test]
    fn finds_tokens_by_configured_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("custom.json");
        fs::write(&config_file, r#"{"token_names": {"1": "NUM"}}"#).unwrap();

        grove_cmd()
            .arg("--config")
            .arg(&config_file)
            .args(["find", "--token", "NUM"])
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stdout("1 0..0\n2 2..2\n");
    }

    #[test]
    fn fails_on_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("invalid.json");
        fs::write(&config_file, "invalid json").unwrap();

        grove_cmd()
            .arg("--config")
            .arg(&config_file)
            .arg("text")
            .arg(fixture("expr.json"))
            .assert()
            .code(2);
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn exits_with_two_on_missing_input() {
        grove_cmd()
            .arg("text")
            .arg("nonexistent_tree.json")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Failed to read"));
    }

    #[test]
    fn exits_with_two_on_bad_token_reference() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.json");
        fs::write(&input, r#"{"tree": {"rule": 0, "children": [{"token": 5}]}}"#).unwrap();

        grove_cmd()
            .arg("stats")
            .arg(&input)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("out of range"));
    }

    #[test]
    fn verbose_logs_tree_loading() {
        grove_cmd()
            .arg("--verbose")
            .arg("stats")
            .arg(fixture("expr.json"))
            .assert()
            .success()
            .stderr(predicate::str::contains("Built parse tree"));
    }
}
