//! Evaluation of descriptor rules against mutation events.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{HookifyError, Result};
use crate::render::render_violation;
use crate::rule::{Action, HookPoint, Rule, RuleRegistry};
use crate::scan::{self, Scanner};
use crate::types::{MutationEvent, ViolationReport};

use super::{MutationGuard, Outcome};

/// Runs registry rules over mutation events.
///
/// Rules are evaluated one after another in registry order. The first
/// blocking match aborts the whole dispatch, so later rules (blocking or
/// not) are never evaluated for that event.
#[derive(Debug, Clone)]
pub struct RuleDispatcher {
    registry: Arc<RuleRegistry>,
    project_root: PathBuf,
    scanner: Scanner,
}

impl RuleDispatcher {
    /// Create a dispatcher reporting paths relative to `project_root`.
    pub fn new(registry: Arc<RuleRegistry>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            project_root: project_root.into(),
            scanner: Scanner::default(),
        }
    }

    /// The rules being enforced.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate every rule wired to `hook_point`.
    ///
    /// Returns the warnings raised along the way. A blocking match is
    /// returned as [`HookifyError::Blocked`] and stops evaluation.
    pub fn dispatch(
        &self,
        hook_point: HookPoint,
        event: &MutationEvent,
    ) -> Result<Vec<ViolationReport>> {
        let mut warnings = Vec::new();

        for rule in self.registry.for_hook(hook_point) {
            if !RuleRegistry::applicable(rule, event.kind(), event.file_path()) {
                continue;
            }
            let Some(report) = self.evaluate(rule, event) else {
                continue;
            };

            match report.action() {
                Action::Block => {
                    tracing::info!(rule = rule.name(), file = %report.file_path, "blocking mutation");
                    return Err(HookifyError::Blocked(Box::new(report)));
                }
                Action::Warn => {
                    tracing::warn!(rule = rule.name(), file = %report.file_path, "{}", report.rendered_message);
                    warnings.push(report);
                }
            }
        }

        Ok(warnings)
    }

    fn evaluate(&self, rule: &Arc<Rule>, event: &MutationEvent) -> Option<ViolationReport> {
        if let Some(diff) = event.patch_text() {
            if !scan::scan_patch(diff, rule.patterns(), rule.excludes()) {
                return None;
            }
            let file = scan::target_file_or_unknown(diff);
            return Some(self.report(rule, file, Vec::new()));
        }

        let file = relative_to(event.file_path().unwrap_or_default(), &self.project_root);
        event
            .fragments()
            .iter()
            .map(|fragment| self.scanner.scan(fragment, rule.patterns(), rule.excludes()))
            .find(|lines| !lines.is_empty())
            .map(|lines| self.report(rule, file, lines))
    }

    fn report(&self, rule: &Arc<Rule>, file: String, lines: Vec<usize>) -> ViolationReport {
        let joined = lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ViolationReport {
            rule: Arc::clone(rule),
            rendered_message: render_violation(rule.message_template(), &file, &joined),
            file_path: file,
            matched_lines: lines,
        }
    }

    fn outcome(&self, hook_point: HookPoint, event: &MutationEvent) -> Outcome {
        match self.dispatch(hook_point, event) {
            Ok(warnings) if warnings.is_empty() => Outcome::Proceed,
            Ok(warnings) => Outcome::Warn {
                messages: warnings.iter().map(|w| w.rendered_message.clone()).collect(),
            },
            Err(HookifyError::Blocked(report)) => Outcome::block(report.to_string()),
            Err(e) => {
                tracing::error!("rule dispatch failed: {}", e);
                Outcome::Proceed
            }
        }
    }
}

/// `path` relative to `root`, or `path` itself when no relative form exists.
pub(crate) fn relative_to(path: &str, root: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .map(|rel| rel.to_string_lossy().into_owned())
        .filter(|rel| !rel.is_empty())
        .unwrap_or_else(|| path.to_string())
}

#[async_trait]
impl MutationGuard for RuleDispatcher {
    fn name(&self) -> &str {
        "rules"
    }

    async fn before_mutation(&self, event: &MutationEvent) -> Outcome {
        self.outcome(HookPoint::Before, event)
    }

    async fn after_mutation(&self, event: &MutationEvent) -> Outcome {
        self.outcome(HookPoint::After, event).retroactive()
    }
}
