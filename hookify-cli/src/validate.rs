//! Hookify Validate - report rule descriptors that fail to load.

use std::path::Path;

use hookify_common::rule::{LoadDiagnostic, RuleLoader};
use hookify_common::HookifySettings;

/// Outcome of validating both rules roots.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Number of descriptors that loaded.
    pub valid: usize,
    /// Descriptors that were skipped.
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Load the global and project roots and collect diagnostics.
pub async fn validate(settings: &HookifySettings, project_root: &Path) -> ValidationReport {
    let loader = RuleLoader::with_descriptor_file(&settings.descriptor_file);
    let (global, project) = loader
        .load_pair(
            settings.global_hooks_dir.as_deref(),
            &settings.project_hooks_root(project_root),
        )
        .await;

    ValidationReport {
        valid: global.len() + project.len(),
        diagnostics: global
            .diagnostics
            .into_iter()
            .chain(project.diagnostics)
            .collect(),
    }
}

/// Run the validate command.
///
/// # Returns
///
/// Exit code: 0 when every descriptor loads, 1 otherwise.
pub async fn run_validate(settings: &HookifySettings, project_root: &Path) -> i32 {
    let report = validate(settings, project_root).await;

    for diagnostic in &report.diagnostics {
        println!("✗ {}", diagnostic);
    }
    println!(
        "{} rule(s) valid, {} invalid",
        report.valid,
        report.diagnostics.len()
    );

    if report.diagnostics.is_empty() {
        0
    } else {
        1
    }
}
