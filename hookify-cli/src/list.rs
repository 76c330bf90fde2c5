//! Hookify List - List all loaded rules.
//!
//! Lists rules from the global and project roots in evaluation order with
//! their hook, action, scope, and source. Enabled built-in guards are listed
//! last.

use std::path::Path;

use comfy_table::{presets::UTF8_FULL, Table};
use hookify_common::rule::{Rule, RuleLoader};
use hookify_common::HookifySettings;
use serde::Serialize;

/// Where a listed rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    /// Shipped with hookify.
    Builtin,
    /// User-level rules root.
    Global,
    /// Project rules root.
    Project,
}

/// One row of the listing.
#[derive(Debug, Clone, Serialize)]
pub struct RuleRow {
    pub name: String,
    pub hook: String,
    pub action: String,
    pub tools: Vec<String>,
    pub extensions: Vec<String>,
    pub source: RuleSource,
    pub path: Option<String>,
}

impl RuleRow {
    fn from_rule(rule: &Rule, source: RuleSource) -> Self {
        Self {
            name: rule.name().to_string(),
            hook: rule.hook_point().to_string(),
            action: rule.action().to_string(),
            tools: rule.tool_scope().to_vec(),
            extensions: rule.extension_scope().to_vec(),
            source,
            path: Some(rule.source().display().to_string()),
        }
    }

    fn go_errors() -> Self {
        Self {
            name: "go-errors".to_string(),
            hook: "before".to_string(),
            action: "block".to_string(),
            tools: Vec::new(),
            extensions: vec![".go".to_string()],
            source: RuleSource::Builtin,
            path: None,
        }
    }
}

/// Collect rows in evaluation order, honoring the `global`/`local` filters.
pub async fn collect_rows(
    settings: &HookifySettings,
    project_root: &Path,
    global: bool,
    local: bool,
) -> Vec<RuleRow> {
    let show_global = global || !local;
    let show_local = local || !global;

    let loader = RuleLoader::with_descriptor_file(&settings.descriptor_file);
    let (global_rules, project_rules) = loader
        .load_pair(
            settings.global_hooks_dir.as_deref(),
            &settings.project_hooks_root(project_root),
        )
        .await;

    let mut rows = Vec::new();
    if show_global {
        rows.extend(
            global_rules
                .rules
                .iter()
                .map(|r| RuleRow::from_rule(r, RuleSource::Global)),
        );
    }
    if show_local {
        rows.extend(
            project_rules
                .rules
                .iter()
                .map(|r| RuleRow::from_rule(r, RuleSource::Project)),
        );
    }
    if settings.builtin_go_errors && !global && !local {
        rows.push(RuleRow::go_errors());
    }
    rows
}

/// Run the list command and display rules.
///
/// # Returns
///
/// Exit code: 0 on success, 1 if JSON serialization fails.
pub async fn run_list(
    settings: &HookifySettings,
    project_root: &Path,
    verbose: bool,
    global: bool,
    local: bool,
    json: bool,
) -> i32 {
    let rows = collect_rows(settings, project_root, global, local).await;

    if json {
        return match serde_json::to_string_pretty(&rows) {
            Ok(out) => {
                println!("{out}");
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }

    if rows.is_empty() {
        println!("No rules found.");
        return 0;
    }

    println!("{}", render_table(&rows, verbose));
    println!();
    println!("{} rule(s) found", rows.len());
    0
}

fn render_table(rows: &[RuleRow], verbose: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Name", "Hook", "Action", "Tools", "Extensions", "Source"];
    if verbose {
        header.push("Path");
    }
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            row.name.clone(),
            row.hook.clone(),
            row.action.clone(),
            scope_label(&row.tools),
            scope_label(&row.extensions),
            source_emoji(row.source),
        ];
        if verbose {
            cells.push(row.path.clone().unwrap_or_else(|| "-".to_string()));
        }
        table.add_row(cells);
    }
    table
}

/// Empty scopes mean "all".
fn scope_label(scope: &[String]) -> String {
    if scope.is_empty() {
        "all".to_string()
    } else {
        scope.join(", ")
    }
}

/// Get emoji representation for a rule source.
fn source_emoji(source: RuleSource) -> String {
    match source {
        RuleSource::Builtin => "📦 Built-in".to_string(),
        RuleSource::Global => "👤 Global".to_string(),
        RuleSource::Project => "📁 Project".to_string(),
    }
}
