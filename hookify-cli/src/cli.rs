//! CLI definition for the hookify command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hookify - content policy for agent file mutations
///
/// Checks writes, edits, and patches against rule descriptors before (or
/// after) an agent applies them.
#[derive(Parser, Debug)]
#[command(name = "hookify")]
#[command(version)]
#[command(about = "Hookify - content policy for agent file mutations")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one tool call read as JSON from stdin
    Check {
        /// Run after-mutation rules instead of before-mutation rules
        #[arg(long)]
        after: bool,
    },
    /// List all loaded rules in evaluation order
    List {
        /// Show the descriptor path of each rule
        #[arg(short, long)]
        verbose: bool,
        /// Show only global (user-level) rules
        #[arg(long)]
        global: bool,
        /// Show only local (project-level) rules
        #[arg(long)]
        local: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load every rule descriptor and report the ones that fail to parse
    Validate,
}
