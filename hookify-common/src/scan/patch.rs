//! Diff-aware scanning of unified patches.
//!
//! Only added lines are inspected. Diff content is tested verbatim with no
//! comment handling, since a hunk rarely carries enough context to know
//! whether a line sits inside a comment.

use std::sync::LazyLock;

use regex::Regex;

use super::matches_line;

/// Target reported when a patch carries no `+++` header.
pub const UNKNOWN_FILE: &str = "unknown file";

const ADDED_MARKER: char = '+';
const NEW_FILE_HEADER: &str = "+++";

static NEW_FILE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\+\+\+\s+(?:b/)?(\S+)").expect("new-file header regex is valid")
});

/// Iterate the added lines of a diff with their leading `+` stripped.
///
/// `+++` file headers are not added lines.
pub fn added_lines(diff_text: &str) -> impl Iterator<Item = &str> {
    diff_text
        .split('\n')
        .filter(|line| !line.starts_with(NEW_FILE_HEADER))
        .filter_map(|line| line.strip_prefix(ADDED_MARKER))
}

/// Return true as soon as one added line matches.
pub fn scan_patch(diff_text: &str, patterns: &[Regex], excludes: &[Regex]) -> bool {
    added_lines(diff_text).any(|line| matches_line(line, patterns, excludes))
}

/// The path named by the first `+++` header, with any `b/` prefix removed.
pub fn extract_target_file(diff_text: &str) -> Option<String> {
    NEW_FILE_HEADER_RE
        .captures(diff_text)
        .map(|caps| caps[1].to_string())
}

/// Like [`extract_target_file`] but only accepts headers whose path ends with `suffix`.
pub fn extract_target_file_with_suffix(diff_text: &str, suffix: &str) -> Option<String> {
    NEW_FILE_HEADER_RE
        .captures_iter(diff_text)
        .map(|caps| caps[1].to_string())
        .find(|path| path.ends_with(suffix))
}

/// [`extract_target_file`] falling back to [`UNKNOWN_FILE`].
pub fn target_file_or_unknown(diff_text: &str) -> String {
    extract_target_file(diff_text).unwrap_or_else(|| UNKNOWN_FILE.to_string())
}
