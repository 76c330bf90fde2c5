//! Declarative content rules.
//!
//! Rules are markdown descriptors with a small `---` fenced header, one per
//! subdirectory of a rules root:
//!
//! ```markdown
//! ---
//! name: no-fmt-errorf
//! hook: before
//! tools: [write, edit, multiedit, apply_patch]
//! extensions: [.go]
//! action: block
//! pattern: fmt\.Errorf\(
//! exclude:
//!   - nolint:errorf
//! ---
//!
//! Free-form description.
//!
//! ## Message
//! Use the errors package in {{file}} (lines {{lines}}).
//! ```
//!
//! A global root and a project root are both loaded; their rules are
//! concatenated (global first) into a [`RuleRegistry`] and never shadow one
//! another.

pub mod frontmatter;
mod loader;
mod parser;
mod registry;
mod types;

pub use loader::{LoadDiagnostic, LoadedRules, RuleLoader, DEFAULT_DESCRIPTOR_FILE};
pub use parser::{extract_message_section, parse_descriptor};
pub use registry::RuleRegistry;
pub use types::{Action, HookPoint, Rule, RuleFrontmatter};
