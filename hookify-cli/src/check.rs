//! Hookify Check - evaluate one tool call read from stdin.
//!
//! Input is a JSON object naming the tool and its arguments:
//!
//! ```json
//! {"tool": "write", "args": {"filePath": "main.go", "content": "..."}}
//! ```
//!
//! `tool_name`/`tool_input` are accepted as aliases. The outcome is written
//! to stdout as JSON; a block exits with [`BLOCKING_EXIT_CODE`].

use std::path::Path;

use hookify_common::rule::HookPoint;
use hookify_common::{HookDispatcher, HookifySettings, Outcome, Result};
use serde::Deserialize;

/// Exit code returned when the mutation is blocked.
pub const BLOCKING_EXIT_CODE: i32 = 2;

/// A tool call as sent by the host.
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    /// Tool identifier, e.g. `write` or `apply_patch`.
    #[serde(alias = "tool_name")]
    pub tool: String,
    /// Raw tool arguments.
    #[serde(default, alias = "tool_input")]
    pub args: serde_json::Value,
}

/// Evaluate `input` against the project's guards.
///
/// Returns the JSON to print and the process exit code. Empty input
/// proceeds.
pub async fn run_check(
    settings: &HookifySettings,
    project_root: &Path,
    hook_point: HookPoint,
    input: &str,
) -> Result<(String, i32)> {
    let input = input.trim();
    if input.is_empty() {
        tracing::warn!("no input provided");
        return finish(&Outcome::Proceed);
    }
    tracing::debug!("Input: {}", input);

    let call: ToolCall = serde_json::from_str(input)?;
    let (dispatcher, diagnostics) = HookDispatcher::from_settings(settings, project_root).await;
    if !diagnostics.is_empty() {
        tracing::debug!("{} descriptor(s) skipped while loading", diagnostics.len());
    }

    let outcome = dispatcher
        .dispatch_tool_call(hook_point, &call.tool, &call.args)
        .await?;
    tracing::debug!(tool = %call.tool, hook = %hook_point, ?outcome, "Tool call checked");
    finish(&outcome)
}

fn finish(outcome: &Outcome) -> Result<(String, i32)> {
    let code = if outcome.is_block() {
        BLOCKING_EXIT_CODE
    } else {
        0
    };
    Ok((serde_json::to_string(outcome)?, code))
}
