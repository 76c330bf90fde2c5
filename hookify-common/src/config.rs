//! Settings for rule discovery and built-in guards.
//!
//! Sources are merged in precedence order, later ones overriding earlier:
//!
//! 1. Built-in defaults
//! 2. `<project>/.opencode/hookify.toml`, when present
//! 3. Environment variables prefixed `HOOKIFY_` (e.g. `HOOKIFY_DESCRIPTOR_FILE`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rule::DEFAULT_DESCRIPTOR_FILE;

/// Settings file looked up under the project root.
pub const SETTINGS_FILE: &str = ".opencode/hookify.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "HOOKIFY_";

/// Resolved hookify settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookifySettings {
    /// User-scope rules root. `None` when no home directory is known.
    pub global_hooks_dir: Option<PathBuf>,
    /// Project-scope rules root, relative to the project root unless absolute.
    pub project_hooks_dir: PathBuf,
    /// Descriptor file name inside each rule directory.
    pub descriptor_file: String,
    /// Lifetime of cached project detection results, in seconds.
    pub context_cache_ttl_secs: u64,
    /// Whether the built-in Go errors guard is enabled.
    pub builtin_go_errors: bool,
}

impl Default for HookifySettings {
    fn default() -> Self {
        Self {
            global_hooks_dir: dirs::home_dir().map(|home| home.join(".config/opencode/hooks")),
            project_hooks_dir: PathBuf::from(".opencode/hooks"),
            descriptor_file: DEFAULT_DESCRIPTOR_FILE.to_string(),
            context_cache_ttl_secs: 30,
            builtin_go_errors: true,
        }
    }
}

impl HookifySettings {
    /// Load settings for the project rooted at `project_root`.
    pub fn load(project_root: &Path) -> Result<Self> {
        let settings: Self = Self::figment(project_root).extract()?;
        tracing::debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    /// The merged configuration sources, before extraction.
    pub fn figment(project_root: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(SETTINGS_FILE)))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Absolute project rules root.
    pub fn project_hooks_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project_hooks_dir)
    }

    /// Project detection cache lifetime.
    pub fn context_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.context_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_file_or_env() {
        let temp = TempDir::new().unwrap();
        let settings = HookifySettings::load(temp.path()).unwrap();

        assert_eq!(settings.project_hooks_dir, PathBuf::from(".opencode/hooks"));
        assert_eq!(settings.descriptor_file, "HOOK.md");
        assert_eq!(settings.context_cache_ttl(), Duration::from_secs(30));
        assert!(settings.builtin_go_errors);
        assert_eq!(
            settings.project_hooks_root(temp.path()),
            temp.path().join(".opencode/hooks")
        );
    }

    #[test]
    #[serial]
    fn test_project_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".opencode")).unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE),
            "descriptor_file = \"RULE.md\"\nbuiltin_go_errors = false\n",
        )
        .unwrap();

        let settings = HookifySettings::load(temp.path()).unwrap();
        assert_eq!(settings.descriptor_file, "RULE.md");
        assert!(!settings.builtin_go_errors);
        assert_eq!(settings.context_cache_ttl_secs, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides_project_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".opencode")).unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "context_cache_ttl_secs = 5\n").unwrap();

        std::env::set_var("HOOKIFY_CONTEXT_CACHE_TTL_SECS", "90");
        let settings = HookifySettings::load(temp.path());
        std::env::remove_var("HOOKIFY_CONTEXT_CACHE_TTL_SECS");

        assert_eq!(settings.unwrap().context_cache_ttl_secs, 90);
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_a_settings_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".opencode")).unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "context_cache_ttl_secs = \"soon\"\n").unwrap();

        let err = HookifySettings::load(temp.path()).unwrap_err();
        assert!(matches!(err, crate::error::HookifyError::Settings(_)));
    }
}
