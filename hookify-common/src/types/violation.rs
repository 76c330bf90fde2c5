//! Violation reports produced when a rule matches.

use std::fmt;
use std::sync::Arc;

use crate::rule::{Action, Rule};

/// The result of a rule matching content it governs.
#[derive(Debug, Clone)]
pub struct ViolationReport {
    /// The rule that matched.
    pub rule: Arc<Rule>,
    /// The offending file, relative to the project root when possible.
    pub file_path: String,
    /// 1-indexed matched lines. Empty for patch-mode detections.
    pub matched_lines: Vec<usize>,
    /// The rule's message template with placeholders substituted.
    pub rendered_message: String,
}

impl ViolationReport {
    /// The action of the rule that produced this report.
    pub fn action(&self) -> Action {
        self.rule.action()
    }

    /// Matched lines joined as `"3, 10"`; empty when unattributed.
    pub fn lines_label(&self) -> String {
        self.matched_lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action() {
            Action::Block => "blocked",
            Action::Warn => "warning",
        };
        write!(f, "[{}] {} in {}", self.rule.name(), verb, self.file_path)?;
        match self.matched_lines.len() {
            0 => {}
            1 => write!(f, " (line: {})", self.lines_label())?,
            _ => write!(f, " (lines: {})", self.lines_label())?,
        }
        write!(f, "\n\n{}", self.rendered_message)
    }
}

impl PartialEq for ViolationReport {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rule, &other.rule)
            && self.file_path == other.file_path
            && self.matched_lines == other.matched_lines
            && self.rendered_message == other.rendered_message
    }
}
