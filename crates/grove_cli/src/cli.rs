//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Grove - inspect and traverse parse trees
#[derive(Parser)]
#[command(name = "grove")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the text covered by the tree
    Text {
        /// Tree document (JSON)
        input: PathBuf,
    },

    /// Print the tree in LISP form
    Tree {
        /// Tree document (JSON)
        input: PathBuf,
    },

    /// Walk the tree and print every listener event
    Walk {
        /// Tree document (JSON)
        input: PathBuf,
    },

    /// Count nodes by kind
    Stats {
        /// Tree document (JSON)
        input: PathBuf,
    },

    /// List rule or token nodes
    Find(FindArgs),
}

#[derive(Args)]
pub struct FindArgs {
    /// Tree document (JSON)
    pub input: PathBuf,

    /// Rule name or index to look for
    #[arg(long, conflicts_with = "token", required_unless_present = "token")]
    pub rule: Option<String>,

    /// Token type, by configured name or number
    #[arg(long, allow_hyphen_values = true)]
    pub token: Option<String>,

    /// Stop at the first match
    #[arg(long)]
    pub first: bool,
}
