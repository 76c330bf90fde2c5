//! Hookify - content policy hook processor.
//!
//! The `hookify` binary wraps `hookify-common` for hosts that run hooks as
//! external processes:
//!
//! - `hookify check` reads one tool call from stdin and prints the outcome
//! - `hookify list` shows the rules in evaluation order
//! - `hookify validate` reports descriptors that fail to load
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hookify::check::run_check;
//! use hookify::{HookifySettings, HookPoint};
//!
//! #[tokio::main]
//! async fn main() {
//!     let root = std::path::Path::new(".");
//!     let settings = HookifySettings::load(root).unwrap();
//!     let input = r#"{"tool": "write", "args": {"filePath": "a.go", "content": "package a"}}"#;
//!
//!     let (json, exit_code) = run_check(&settings, root, HookPoint::Before, input).await.unwrap();
//!     assert_eq!(exit_code, 0);
//!     println!("{json}");
//! }
//! ```

pub mod check;
pub mod cli;
pub mod list;
pub mod validate;

pub use cli::{Cli, Commands};

// Re-export everything from hookify-common for library users
pub use hookify_common::*;
