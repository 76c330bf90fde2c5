//! Shared test helpers for integration tests.
//!
//! Fixtures are laid out the way hookify finds them on disk: a project root
//! with `.opencode/hooks/<rule>/HOOK.md`, and a separate global rules root.

#![allow(dead_code)] // Not every test file uses every helper

use hookify_common::HookifySettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project and global rules root.
pub struct Fixture {
    /// Holds the project directory alive.
    pub project: TempDir,
    /// Holds the global rules root alive.
    pub global: TempDir,
}

impl Fixture {
    /// Create empty project and global roots.
    pub fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            global: TempDir::new().unwrap(),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        self.project.path()
    }

    /// The project rules root.
    pub fn project_hooks(&self) -> PathBuf {
        self.root().join(".opencode/hooks")
    }

    /// Write a descriptor under the project rules root.
    pub fn project_rule(&self, dir: &str, content: &str) -> &Self {
        write_descriptor(&self.project_hooks(), dir, content);
        self
    }

    /// Write a descriptor under the global rules root.
    pub fn global_rule(&self, dir: &str, content: &str) -> &Self {
        write_descriptor(self.global.path(), dir, content);
        self
    }

    /// Write a file relative to the project root.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    /// Settings pointing at this fixture's roots.
    pub fn settings(&self) -> HookifySettings {
        HookifySettings {
            global_hooks_dir: Some(self.global.path().to_path_buf()),
            ..HookifySettings::default()
        }
    }

    /// Absolute path of a project file, as a host would report it.
    pub fn abs(&self, relative: &str) -> String {
        self.root().join(relative).to_string_lossy().into_owned()
    }
}

/// Write `<root>/<dir>/HOOK.md`.
pub fn write_descriptor(root: &Path, dir: &str, content: &str) {
    let rule_dir = root.join(dir);
    fs::create_dir_all(&rule_dir).unwrap();
    fs::write(rule_dir.join("HOOK.md"), content).unwrap();
}

/// Builder for descriptor text.
pub struct RuleBuilder {
    name: String,
    hook: String,
    action: Option<String>,
    tools: Vec<String>,
    extensions: Vec<String>,
    patterns: Vec<String>,
    excludes: Vec<String>,
    message: Option<String>,
}

impl RuleBuilder {
    /// A before-mutation warning rule with no patterns yet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hook: "before".to_string(),
            action: Some("warn".to_string()),
            tools: Vec::new(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            excludes: Vec::new(),
            message: Some(format!("{name} matched {{{{file}}}} at {{{{lines}}}}")),
        }
    }

    /// Set the hook point.
    pub fn hook(mut self, hook: &str) -> Self {
        self.hook = hook.to_string();
        self
    }

    /// Make the rule blocking.
    pub fn block(mut self) -> Self {
        self.action = Some("block".to_string());
        self
    }

    /// Drop the `action` field.
    pub fn without_action(mut self) -> Self {
        self.action = None;
        self
    }

    /// Add a tool to the scope.
    pub fn tool(mut self, tool: &str) -> Self {
        self.tools.push(tool.to_string());
        self
    }

    /// Add an extension to the scope.
    pub fn extension(mut self, ext: &str) -> Self {
        self.extensions.push(ext.to_string());
        self
    }

    /// Add a match pattern.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.patterns.push(pattern.to_string());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Self {
        self.excludes.push(pattern.to_string());
        self
    }

    /// Replace the message template.
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// Render the descriptor.
    pub fn build(self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("name: {}\n", self.name));
        out.push_str(&format!("hook: {}\n", self.hook));
        if let Some(action) = &self.action {
            out.push_str(&format!("action: {action}\n"));
        }
        if !self.tools.is_empty() {
            out.push_str(&format!("tools: [{}]\n", self.tools.join(", ")));
        }
        if !self.extensions.is_empty() {
            out.push_str(&format!("extensions: [{}]\n", self.extensions.join(", ")));
        }
        push_list(&mut out, "pattern", &self.patterns);
        push_list(&mut out, "exclude", &self.excludes);
        out.push_str("---\n\nTest rule.\n\n");
        if let Some(message) = &self.message {
            out.push_str(&format!("## Message\n{message}\n"));
        }
        out
    }
}

fn push_list(out: &mut String, key: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("{key}:\n"));
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// `n` filler lines followed by `line`, so `line` lands on line `n + 1`.
pub fn content_with_line_at(n: usize, line: &str) -> String {
    let mut lines = vec!["package foo"; n];
    lines.push(line);
    lines.join("\n")
}
