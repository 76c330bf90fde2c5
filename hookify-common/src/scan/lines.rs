//! Comment-aware line scanning.

use regex::Regex;

use super::matches_line;

/// Comment markers recognized by a [`Scanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Markers that start a comment running to the end of the line.
    pub line_markers: &'static [&'static str],
    /// Block comment opener.
    pub block_start: &'static str,
    /// Block comment closer.
    pub block_end: &'static str,
}

impl CommentSyntax {
    /// `//` and `#` line comments, `/* */` block comments.
    pub const DEFAULT: Self = Self {
        line_markers: &["//", "#"],
        block_start: "/*",
        block_end: "*/",
    };

    /// C-family syntax: `//` line comments, `/* */` block comments.
    pub const C_FAMILY: Self = Self {
        line_markers: &["//"],
        block_start: "/*",
        block_end: "*/",
    };

    fn is_line_comment(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        self.line_markers.iter().any(|m| trimmed.starts_with(m))
    }
}

impl Default for CommentSyntax {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InsideBlockComment,
}

/// Line scanner that skips commented-out code.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    syntax: CommentSyntax,
}

impl Scanner {
    /// Create a scanner for the given comment syntax.
    pub fn new(syntax: CommentSyntax) -> Self {
        Self { syntax }
    }

    /// The comment syntax this scanner honors.
    pub fn syntax(&self) -> CommentSyntax {
        self.syntax
    }

    /// Return the 1-indexed lines of `text` that match.
    ///
    /// Lines starting with a line-comment marker are skipped. On a line that
    /// opens a block comment only the text before the opener is tested, and
    /// lines inside the block are skipped up to and including the line with
    /// the closer; text after a closer is never tested.
    pub fn scan(&self, text: &str, patterns: &[Regex], excludes: &[Regex]) -> Vec<usize> {
        let CommentSyntax {
            block_start,
            block_end,
            ..
        } = self.syntax;

        let mut state = State::Normal;
        let mut matched = Vec::new();

        for (idx, line) in text.split('\n').enumerate() {
            match state {
                State::InsideBlockComment => {
                    if line.contains(block_end) {
                        state = State::Normal;
                    }
                }
                State::Normal => {
                    if self.syntax.is_line_comment(line) {
                        continue;
                    }

                    let tested = match line.find(block_start) {
                        Some(open) => {
                            let after_open = &line[open + block_start.len()..];
                            if !after_open.contains(block_end) {
                                state = State::InsideBlockComment;
                            }
                            &line[..open]
                        }
                        None => line,
                    };

                    if matches_line(tested, patterns, excludes) {
                        matched.push(idx + 1);
                    }
                }
            }
        }

        matched
    }
}
