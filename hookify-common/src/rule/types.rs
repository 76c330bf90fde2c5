//! Rule types.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{HookifyError, Result};
use crate::types::OperationKind;

/// When a rule is evaluated relative to the mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookPoint {
    /// Before the mutation is committed; a block rejects it.
    #[serde(alias = "tool.execute.before")]
    Before,
    /// After the mutation happened; observations only.
    #[serde(alias = "tool.execute.after")]
    After,
}

impl FromStr for HookPoint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "before" | "tool.execute.before" => Ok(Self::Before),
            "after" | "tool.execute.after" => Ok(Self::After),
            other => Err(format!(
                "unsupported hook \"{other}\" (expected \"before\" or \"after\")"
            )),
        }
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookPoint::Before => write!(f, "before"),
            HookPoint::After => write!(f, "after"),
        }
    }
}

/// What happens when a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Reject the mutation and stop evaluating further rules.
    Block,
    /// Report the match and keep going.
    Warn,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "block" => Ok(Self::Block),
            "warn" => Ok(Self::Warn),
            other => Err(format!(
                "action must be \"block\" or \"warn\", got \"{other}\""
            )),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Block => write!(f, "block"),
            Action::Warn => write!(f, "warn"),
        }
    }
}

/// Raw header values of a rule descriptor, before validation.
///
/// Scalars that are absent or empty are `None`; list fields accept either a
/// single value or a list in the descriptor and are always lists here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFrontmatter {
    /// `name:`
    pub name: Option<String>,
    /// `hook:`
    pub hook: Option<String>,
    /// `tools:`
    pub tools: Vec<String>,
    /// `extensions:`
    pub extensions: Vec<String>,
    /// `action:`
    pub action: Option<String>,
    /// `pattern:`
    pub pattern: Vec<String>,
    /// `exclude:`
    pub exclude: Vec<String>,
}

/// A validated, compiled policy rule.
///
/// Rules are immutable once built. Changing a rule means reloading its
/// descriptor.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    hook_point: HookPoint,
    tool_scope: Vec<String>,
    extension_scope: Vec<String>,
    action: Action,
    patterns: Vec<Regex>,
    excludes: Vec<Regex>,
    message_template: String,
    source: PathBuf,
}

impl Rule {
    /// Validate header values and compile patterns into a rule.
    ///
    /// Fails with [`HookifyError::Config`] naming the first missing or
    /// invalid field, or [`HookifyError::PatternCompile`] for a bad pattern.
    pub fn compile(
        frontmatter: RuleFrontmatter,
        message_template: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Result<Self> {
        let source = source.into();
        let message_template = message_template.into();

        let name = required(frontmatter.name, "name", &source)?;
        let hook = required(frontmatter.hook, "hook", &source)?;
        let action = required(frontmatter.action, "action", &source)?;
        if frontmatter.pattern.is_empty() {
            return Err(HookifyError::config(
                &source,
                "pattern",
                "missing required field",
            ));
        }

        let hook_point = hook
            .parse::<HookPoint>()
            .map_err(|reason| HookifyError::config(&source, "hook", reason))?;
        let action = action
            .parse::<Action>()
            .map_err(|reason| HookifyError::config(&source, "action", reason))?;

        if message_template.trim().is_empty() {
            return Err(HookifyError::config(
                &source,
                "## Message",
                "missing message section",
            ));
        }

        let patterns = compile_patterns(&frontmatter.pattern, &source)?;
        let excludes = compile_patterns(&frontmatter.exclude, &source)?;

        Ok(Self {
            name,
            hook_point,
            tool_scope: frontmatter.tools,
            extension_scope: frontmatter.extensions,
            action,
            patterns,
            excludes,
            message_template,
            source,
        })
    }

    /// Rule name. Not necessarily unique across sources.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// When this rule runs.
    pub fn hook_point(&self) -> HookPoint {
        self.hook_point
    }

    /// Tool identifiers this rule is limited to; empty means all.
    pub fn tool_scope(&self) -> &[String] {
        &self.tool_scope
    }

    /// File suffixes this rule is limited to; empty means all.
    pub fn extension_scope(&self) -> &[String] {
        &self.extension_scope
    }

    /// Block or warn.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Compiled match patterns (OR semantics).
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// Compiled exclude patterns.
    pub fn excludes(&self) -> &[Regex] {
        &self.excludes
    }

    /// Message template with `{{file}}` and `{{lines}}` placeholders.
    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    /// Descriptor the rule was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Whether the rule's tool scope admits `kind`.
    pub fn applies_to_tool(&self, kind: OperationKind) -> bool {
        self.tool_scope.is_empty() || self.tool_scope.iter().any(|t| kind.matches_tool_id(t))
    }

    /// Whether the rule's extension scope admits `file_path`.
    ///
    /// An unknown path (a patch without a `+++` header) is admitted, since
    /// the rule cannot be shown to be out of scope.
    pub fn applies_to_path(&self, file_path: Option<&str>) -> bool {
        if self.extension_scope.is_empty() {
            return true;
        }
        match file_path {
            Some(path) => self.extension_scope.iter().any(|ext| path.ends_with(ext)),
            None => true,
        }
    }
}

fn required(value: Option<String>, field: &str, source: &Path) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(HookifyError::config(source, field, "missing required field")),
    }
}

fn compile_patterns(patterns: &[String], source: &Path) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| HookifyError::PatternCompile {
                path: source.to_path_buf(),
                pattern: pattern.clone(),
                source: e,
            })
        })
        .collect()
}
