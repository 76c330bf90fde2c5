//! Pattern scanning over file content and unified diffs.
//!
//! Two distinct traversals live here:
//!
//! - [`Scanner`] walks full text line by line and ignores code inside
//!   comments, reporting the 1-indexed lines that match.
//! - [`patch`] walks only the added lines of a unified diff and tests them
//!   verbatim, reporting presence only.
//!
//! Both share [`matches_line`]: a line matches when any pattern matches and
//! no exclude matches the same text.

mod lines;
pub mod patch;

use regex::Regex;

pub use lines::{CommentSyntax, Scanner};
pub use patch::{extract_target_file, scan_patch, target_file_or_unknown, UNKNOWN_FILE};

/// Test one piece of text against include and exclude patterns.
pub fn matches_line(text: &str, patterns: &[Regex], excludes: &[Regex]) -> bool {
    patterns.iter().any(|p| p.is_match(text)) && !excludes.iter().any(|e| e.is_match(text))
}
