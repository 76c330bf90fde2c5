//! Error types for the hookify crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ViolationReport;

/// Result type alias using [`HookifyError`].
pub type Result<T> = std::result::Result<T, HookifyError>;

/// Main error type for hookify operations.
#[derive(Debug, Error)]
pub enum HookifyError {
    /// IO error while reading descriptors, manifests, or stdin.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be extracted from the configuration sources.
    #[error("settings error: {0}")]
    Settings(#[from] figment::Error),

    /// A rule descriptor is malformed.
    #[error("{}: {field}: {reason}", path.display())]
    Config {
        /// The descriptor file.
        path: PathBuf,
        /// The offending header field or section.
        field: String,
        /// Why the field was rejected.
        reason: String,
    },

    /// A rule pattern is not a valid regular expression.
    #[error("{}: invalid pattern '{pattern}': {source}", path.display())]
    PatternCompile {
        /// The descriptor file.
        path: PathBuf,
        /// The pattern text as written in the descriptor.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A blocking rule matched; the mutation must be rejected.
    #[error("{0}")]
    Blocked(Box<ViolationReport>),
}

impl HookifyError {
    /// Build a [`HookifyError::Config`] for a descriptor field.
    pub fn config(path: impl Into<PathBuf>, field: &str, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// The violation carried by a blocking error, if any.
    pub fn violation(&self) -> Option<&ViolationReport> {
        match self {
            Self::Blocked(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_file_and_field() {
        let err = HookifyError::config("/hooks/a/HOOK.md", "action", "missing required field");
        let text = err.to_string();
        assert!(text.contains("/hooks/a/HOOK.md"));
        assert!(text.contains("action"));
        assert!(err.violation().is_none());
    }

    #[test]
    fn test_pattern_compile_error_display() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = HookifyError::PatternCompile {
            path: PathBuf::from("x/HOOK.md"),
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().contains("invalid pattern '(unclosed'"));
    }
}
