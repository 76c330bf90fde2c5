//! Detection of a project's own error-handling package.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use super::cache::{Clock, TtlCache, DEFAULT_TTL};

static GO_MODULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^module\s+(\S+)").expect("module regex is valid"));

/// Package suggested when a project has no errors package of its own.
pub const FALLBACK_ERRORS_PACKAGE: &str = "github.com/cockroachdb/errors";

/// What was detected about a project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectContext {
    /// Whether the project ships its own package for the convention.
    pub has_own_convention: bool,
    /// Import path of that package, or the fallback.
    pub package_identifier: String,
}

impl ProjectContext {
    fn fallback(identifier: &str) -> Self {
        Self {
            has_own_convention: false,
            package_identifier: identifier.to_string(),
        }
    }
}

/// Where to look for a project-owned convention package, and how to name it.
#[derive(Debug, Clone)]
pub struct Convention {
    /// Relative subdirectories, checked in order.
    pub candidates: Vec<String>,
    /// A candidate counts only if it holds a file with this suffix.
    pub source_suffix: String,
    /// Manifest at the project root declaring the module path.
    pub manifest: String,
    /// Extracts the module path from the manifest (first capture group).
    pub module_pattern: Regex,
    /// Identifier returned when no candidate matches.
    pub fallback: String,
}

impl Convention {
    /// Go projects: `internal/errors`, `pkg/errors`, `lib/errors`, `errors`,
    /// module path from `go.mod`.
    pub fn go_errors() -> Self {
        Self {
            candidates: ["internal/errors", "pkg/errors", "lib/errors", "errors"]
                .into_iter()
                .map(String::from)
                .collect(),
            source_suffix: ".go".to_string(),
            manifest: "go.mod".to_string(),
            module_pattern: GO_MODULE_LINE.clone(),
            fallback: FALLBACK_ERRORS_PACKAGE.to_string(),
        }
    }
}

impl Default for Convention {
    fn default() -> Self {
        Self::go_errors()
    }
}

/// Resolves [`ProjectContext`] per directory, cached for a fixed TTL.
#[derive(Debug)]
pub struct ProjectContextResolver {
    convention: Convention,
    cache: TtlCache<PathBuf, ProjectContext>,
}

impl Default for ProjectContextResolver {
    fn default() -> Self {
        Self::new(Convention::default(), DEFAULT_TTL)
    }
}

impl ProjectContextResolver {
    /// Create a resolver on the system clock.
    pub fn new(convention: Convention, ttl: Duration) -> Self {
        Self {
            convention,
            cache: TtlCache::new(ttl),
        }
    }

    /// Create a resolver on a custom clock.
    pub fn with_clock(convention: Convention, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            convention,
            cache: TtlCache::with_clock(ttl, clock),
        }
    }

    /// The convention being detected.
    pub fn convention(&self) -> &Convention {
        &self.convention
    }

    /// Context for `directory`, from cache when fresh.
    pub async fn resolve(&self, directory: &Path) -> ProjectContext {
        self.cache
            .get_or_refresh(directory.to_path_buf(), || self.detect(directory))
            .await
    }

    async fn detect(&self, directory: &Path) -> ProjectContext {
        tracing::debug!("Detecting project context in {}", directory.display());

        for candidate in &self.convention.candidates {
            if !self.holds_source_file(&directory.join(candidate)).await {
                continue;
            }
            let package_identifier = match self.module_path(directory).await {
                Some(module) => format!("{module}/{candidate}"),
                None => candidate.clone(),
            };
            return ProjectContext {
                has_own_convention: true,
                package_identifier,
            };
        }

        ProjectContext::fallback(&self.convention.fallback)
    }

    /// Any error while probing counts as "not there".
    async fn holds_source_file(&self, dir: &Path) -> bool {
        let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
            return false;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry
                .file_name()
                .to_string_lossy()
                .ends_with(&self.convention.source_suffix)
            {
                return true;
            }
        }
        false
    }

    async fn module_path(&self, directory: &Path) -> Option<String> {
        let content = tokio::fs::read_to_string(directory.join(&self.convention.manifest))
            .await
            .ok()?;
        self.convention
            .module_pattern
            .captures(&content)
            .map(|caps| caps[1].to_string())
    }
}
