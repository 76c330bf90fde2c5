//! Rule loading from rules directories.
//!
//! A rules root holds one subdirectory per rule, each containing a
//! descriptor file (`HOOK.md` by default):
//!
//! ```text
//! hooks/
//!   no-fmt-errorf/HOOK.md
//!   warn-todo/HOOK.md
//! ```
//!
//! A missing root, or a subdirectory without a descriptor, yields no rules
//! and no diagnostics. A malformed or unreadable descriptor is reported and
//! skipped; loading always continues with the remaining entries. Symlinked
//! rule subdirectories are followed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::parser::parse_descriptor;
use super::types::Rule;

/// Descriptor file name looked up in every rule subdirectory.
pub const DEFAULT_DESCRIPTOR_FILE: &str = "HOOK.md";

/// A descriptor that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// The descriptor file.
    pub path: PathBuf,
    /// Human-readable reason naming the offending field.
    pub message: String,
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Rules loaded from one rules root.
#[derive(Debug, Default)]
pub struct LoadedRules {
    /// Valid rules in directory enumeration order.
    pub rules: Vec<Rule>,
    /// Descriptors that were skipped.
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadedRules {
    /// Number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule was loaded.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Loads rule descriptors from rules roots.
#[derive(Debug, Clone)]
pub struct RuleLoader {
    descriptor_file: String,
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLoader {
    /// Create a loader looking for `HOOK.md` descriptors.
    pub fn new() -> Self {
        Self::with_descriptor_file(DEFAULT_DESCRIPTOR_FILE)
    }

    /// Create a loader looking for a custom descriptor file name.
    pub fn with_descriptor_file(name: impl Into<String>) -> Self {
        Self {
            descriptor_file: name.into(),
        }
    }

    /// The descriptor file name this loader reads.
    pub fn descriptor_file(&self) -> &str {
        &self.descriptor_file
    }

    /// Load every rule under `root`.
    ///
    /// Entries are visited in directory enumeration order, one descriptor at
    /// a time; that order is preserved into the result.
    pub async fn load(&self, root: &Path) -> LoadedRules {
        let mut loaded = LoadedRules::default();

        let mut entries = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::debug!("Cannot read rules root {}: {}", root.display(), e);
                }
                return loaded;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to enumerate {}: {}", root.display(), e);
                    break;
                }
            };

            // metadata() follows symlinks; file_type() does not.
            let is_dir = match tokio::fs::metadata(entry.path()).await {
                Ok(metadata) => metadata.is_dir(),
                Err(_) => false,
            };
            if !is_dir {
                continue;
            }

            let descriptor = entry.path().join(&self.descriptor_file);
            let content = match tokio::fs::read_to_string(&descriptor).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!(
                        "[hookify] skipping rule: cannot read {}: {}",
                        descriptor.display(),
                        e
                    );
                    loaded.diagnostics.push(LoadDiagnostic {
                        message: format!("cannot read descriptor: {e}"),
                        path: descriptor,
                    });
                    continue;
                }
            };

            match parse_descriptor(&content, &descriptor) {
                Ok(rule) => {
                    tracing::debug!(
                        "Loaded rule '{}' ({}, {}) from {}",
                        rule.name(),
                        rule.hook_point(),
                        rule.action(),
                        descriptor.display()
                    );
                    loaded.rules.push(rule);
                }
                Err(e) => {
                    tracing::warn!("[hookify] skipping rule: {}", e);
                    loaded.diagnostics.push(LoadDiagnostic {
                        path: descriptor,
                        message: e.to_string(),
                    });
                }
            }
        }

        loaded
    }

    /// Load the global and project roots concurrently.
    ///
    /// Returns `(global, project)`. The two loads share no state.
    pub async fn load_pair(&self, global: Option<&Path>, project: &Path) -> (LoadedRules, LoadedRules) {
        let global_load = async {
            match global {
                Some(root) => self.load(root).await,
                None => LoadedRules::default(),
            }
        };
        tokio::join!(global_load, self.load(project))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_rule(root: &Path, dir: &str, content: &str) {
        let rule_dir = root.join(dir);
        fs::create_dir_all(&rule_dir).unwrap();
        fs::write(rule_dir.join(DEFAULT_DESCRIPTOR_FILE), content).unwrap();
    }

    const TODO_RULE: &str = "---\nname: warn-todo\nhook: before\naction: warn\npattern: TODO\n---\n## Message\nTODO in {{file}}\n";

    #[tokio::test]
    async fn test_missing_root_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let loaded = RuleLoader::new().load(&temp.path().join("absent")).await;
        assert!(loaded.is_empty());
        assert!(loaded.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_loads_rule_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        write_rule(temp.path(), "warn-todo", TODO_RULE);

        let loaded = RuleLoader::new().load(temp.path()).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.rules[0].name(), "warn-todo");
        assert!(loaded.rules[0].source().ends_with("warn-todo/HOOK.md"));
    }

    #[tokio::test]
    async fn test_files_at_root_and_empty_dirs_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("HOOK.md"), TODO_RULE).unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let loaded = RuleLoader::new().load(temp.path()).await;
        assert!(loaded.is_empty());
        assert!(loaded.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_bad_pattern_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        write_rule(
            temp.path(),
            "bad",
            "---\nname: bad\nhook: before\naction: warn\npattern: (oops\n---\n## Message\nx\n",
        );
        write_rule(temp.path(), "good", TODO_RULE);

        let loaded = RuleLoader::new().load(temp.path()).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.diagnostics.len(), 1);
        assert!(loaded.diagnostics[0].message.contains("invalid pattern"));
    }

    #[tokio::test]
    async fn test_custom_descriptor_file() {
        let temp = TempDir::new().unwrap();
        let rule_dir = temp.path().join("r");
        fs::create_dir_all(&rule_dir).unwrap();
        fs::write(rule_dir.join("RULE.md"), TODO_RULE).unwrap();

        assert!(RuleLoader::new().load(temp.path()).await.is_empty());
        let loaded = RuleLoader::with_descriptor_file("RULE.md")
            .load(temp.path())
            .await;
        assert_eq!(loaded.len(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_rule_directory_is_loaded() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared-rules");
        write_rule(&shared, "warn-todo", TODO_RULE);
        let root = temp.path().join("hooks");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(shared.join("warn-todo"), root.join("warn-todo")).unwrap();

        let loaded = RuleLoader::new().load(&root).await;
        assert_eq!(loaded.len(), 1);
        assert!(loaded.diagnostics.is_empty());
        assert_eq!(loaded.rules[0].name(), "warn-todo");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_is_skipped_quietly() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("broken")).unwrap();

        let loaded = RuleLoader::new().load(temp.path()).await;
        assert!(loaded.is_empty());
        assert!(loaded.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_descriptor_is_reported() {
        let temp = TempDir::new().unwrap();
        let rule_dir = temp.path().join("binary");
        fs::create_dir_all(&rule_dir).unwrap();
        fs::write(rule_dir.join(DEFAULT_DESCRIPTOR_FILE), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        write_rule(temp.path(), "warn-todo", TODO_RULE);

        let loaded = RuleLoader::new().load(temp.path()).await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.diagnostics.len(), 1);
        assert!(loaded.diagnostics[0].path.ends_with("binary/HOOK.md"));
        assert!(loaded.diagnostics[0].message.contains("cannot read descriptor"));
    }

    #[tokio::test]
    async fn test_load_pair_without_global_root() {
        let temp = TempDir::new().unwrap();
        write_rule(temp.path(), "warn-todo", TODO_RULE);

        let (global, project) = RuleLoader::new().load_pair(None, temp.path()).await;
        assert!(global.is_empty());
        assert_eq!(project.len(), 1);
    }
}
