//! Hookify CLI - content policy hook processor.
//!
//! Commands:
//! - `hookify check [--after]`: Read a tool call as JSON from stdin, print the outcome
//! - `hookify list`: List loaded rules in evaluation order
//! - `hookify validate`: Report rule descriptors that fail to load
//!
//! Exit codes:
//! - 0: Success (proceed or warn)
//! - 1: Error
//! - 2: Blocking error (a rule rejected the mutation)

use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hookify::check::{run_check, BLOCKING_EXIT_CODE};
use hookify::{list, validate};
use hookify::{Cli, Commands};
use hookify_common::rule::HookPoint;
use hookify_common::{HookifyError, HookifySettings};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("hookify=debug,hookify_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli).await;
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
async fn dispatch_command(cli: Cli) -> i32 {
    let project_root = match resolve_project_root(cli.project) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let settings = match HookifySettings::load(&project_root) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match cli.command {
        Commands::Check { after } => {
            let hook_point = if after {
                HookPoint::After
            } else {
                HookPoint::Before
            };
            run_check_or_error(&settings, &project_root, hook_point).await
        }
        Commands::List {
            verbose,
            global,
            local,
            json,
        } => list::run_list(&settings, &project_root, verbose, global, local, json).await,
        Commands::Validate => validate::run_validate(&settings, &project_root).await,
    }
}

fn resolve_project_root(project: Option<PathBuf>) -> io::Result<PathBuf> {
    match project {
        Some(root) => Ok(root),
        None => std::env::current_dir(),
    }
}

/// Run the check command, reporting failures as a block.
///
/// A hook that cannot evaluate a mutation must not let it through silently.
async fn run_check_or_error(
    settings: &HookifySettings,
    project_root: &std::path::Path,
    hook_point: HookPoint,
) -> i32 {
    match read_and_check(settings, project_root, hook_point).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            let error_output = serde_json::json!({
                "decision": "block",
                "reason": e.to_string()
            });
            // Best-effort: write error JSON to stdout for the hook caller.
            let _ = io::stdout().write_all(error_output.to_string().as_bytes());
            BLOCKING_EXIT_CODE
        }
    }
}

async fn read_and_check(
    settings: &HookifySettings,
    project_root: &std::path::Path,
    hook_point: HookPoint,
) -> Result<i32, HookifyError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let (output, exit_code) = run_check(settings, project_root, hook_point, &input).await?;

    // Write JSON to stdout with trailing newline
    io::stdout().write_all(output.as_bytes())?;
    io::stdout().write_all(b"\n")?;

    Ok(exit_code)
}
