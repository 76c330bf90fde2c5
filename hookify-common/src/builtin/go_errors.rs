//! Blocks direct `fmt.Errorf` calls in Go sources.
//!
//! Go code should build errors through a structured errors package. When the
//! project ships its own (see [`Convention::go_errors`]) the block
//! message points at it; otherwise it suggests `github.com/cockroachdb/errors`.

use std::path::PathBuf;
use std::slice;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use crate::guard::{MutationGuard, Outcome};
use crate::project::{Convention, ProjectContext, ProjectContextResolver};
use crate::scan::{patch, CommentSyntax, Scanner};
use crate::types::{MutationEvent, OperationKind};

static FMT_ERRORF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfmt\.Errorf\s*\(").expect("fmt.Errorf regex is valid"));

const GO_SUFFIX: &str = ".go";
const UNKNOWN_GO_FILE: &str = "unknown .go file";
const LINE_COMMENT: &str = "//";

/// Built-in guard rejecting `fmt.Errorf` in `.go` content.
#[derive(Debug, Clone)]
pub struct GoErrorsGuard {
    project_root: PathBuf,
    resolver: Arc<ProjectContextResolver>,
    scanner: Scanner,
}

impl GoErrorsGuard {
    /// Create a guard for the project at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>, resolver: Arc<ProjectContextResolver>) -> Self {
        Self {
            project_root: project_root.into(),
            resolver,
            scanner: Scanner::new(CommentSyntax::C_FAMILY),
        }
    }

    /// Create a guard with a default Go resolver.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        Self::new(
            project_root,
            Arc::new(ProjectContextResolver::new(
                Convention::go_errors(),
                crate::project::DEFAULT_TTL,
            )),
        )
    }

    /// Find the offending file and lines, if any.
    fn detect(&self, event: &MutationEvent) -> Option<(String, Vec<usize>)> {
        if event.kind() == OperationKind::Patch {
            let diff = event.patch_text()?;
            let hit = patch::added_lines(diff).any(|line| {
                !line.trim_start().starts_with(LINE_COMMENT) && FMT_ERRORF.is_match(line)
            });
            if !hit {
                return None;
            }
            let file = patch::extract_target_file_with_suffix(diff, GO_SUFFIX)
                .unwrap_or_else(|| UNKNOWN_GO_FILE.to_string());
            return Some((file, Vec::new()));
        }

        let path = event.file_path().filter(|p| p.ends_with(GO_SUFFIX))?;
        let lines = event
            .fragments()
            .iter()
            .filter(|fragment| FMT_ERRORF.is_match(fragment))
            .map(|fragment| {
                self.scanner
                    .scan(fragment, slice::from_ref(&*FMT_ERRORF), &[])
            })
            .find(|lines| !lines.is_empty())?;

        let file = crate::guard::relative_to(path, &self.project_root);
        Some((file, lines))
    }
}

/// The block message for `file`, naming `lines` when known.
pub fn violation_message(file: &str, lines: &[usize], context: &ProjectContext) -> String {
    let joined = lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let line_info = match lines.len() {
        0 => String::new(),
        1 => format!(" (line: {joined})"),
        _ => format!(" (lines: {joined})"),
    };
    let suggestion = if context.has_own_convention {
        format!(
            "Use the project's errors package: \"{}\"",
            context.package_identifier
        )
    } else {
        "Use \"github.com/cockroachdb/errors\" instead (e.g., errors.Newf, errors.Wrap, errors.Wrapf)"
            .to_string()
    };

    [
        format!("🚫 fmt.Errorf detected in {file}{line_info}"),
        String::new(),
        "Direct usage of fmt.Errorf is not allowed in this project.".to_string(),
        suggestion,
        String::new(),
        "Common replacements:".to_string(),
        "  fmt.Errorf(\"message: %w\", err)  →  errors.Wrap(err, \"message\")".to_string(),
        "  fmt.Errorf(\"message: %v\", err)  →  errors.Newf(\"message: %v\", err)".to_string(),
        "  fmt.Errorf(\"message\")           →  errors.New(\"message\")".to_string(),
    ]
    .join("\n")
}

#[async_trait]
impl MutationGuard for GoErrorsGuard {
    fn name(&self) -> &str {
        "go-errors"
    }

    async fn before_mutation(&self, event: &MutationEvent) -> Outcome {
        let Some((file, lines)) = self.detect(event) else {
            return Outcome::Proceed;
        };
        let context = self.resolver.resolve(&self.project_root).await;
        tracing::info!(file = %file, package = %context.package_identifier, "blocking fmt.Errorf");
        Outcome::block(violation_message(&file, &lines, &context))
    }
}
