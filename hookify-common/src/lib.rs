//! Hookify Common - content policy for agent file mutations.
//!
//! This crate provides rule loading, comment-aware scanning, and the guard
//! interface a host consults before and after an agent writes, edits, or
//! patches files.
//!
//! ```no_run
//! use hookify_common::{HookDispatcher, HookifySettings, HookPoint};
//!
//! # async fn run() -> hookify_common::Result<()> {
//! let root = std::path::Path::new(".");
//! let settings = HookifySettings::load(root)?;
//! let (dispatcher, _diagnostics) = HookDispatcher::from_settings(&settings, root).await;
//!
//! let args = serde_json::json!({"filePath": "main.go", "content": "package main"});
//! let outcome = dispatcher
//!     .dispatch_tool_call(HookPoint::Before, "write", &args)
//!     .await?;
//! assert!(!outcome.is_block());
//! # Ok(())
//! # }
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod guard;
pub mod project;
pub mod render;
pub mod rule;
pub mod scan;
pub mod types;

pub use builtin::GoErrorsGuard;
pub use config::HookifySettings;
pub use error::{HookifyError, Result};
pub use guard::{HookDispatcher, MutationGuard, Outcome, RuleDispatcher};
pub use project::{ProjectContext, ProjectContextResolver, TtlCache};
pub use rule::{Action, HookPoint, LoadDiagnostic, Rule, RuleLoader, RuleRegistry};
pub use scan::{CommentSyntax, Scanner};
pub use types::{MutationEvent, OperationKind, ViolationReport};
