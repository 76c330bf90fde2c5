//! Line-oriented parser for rule descriptor headers.
//!
//! The header is a restricted `key: value` format, not general YAML:
//!
//! - `key: value` sets a scalar; everything after the first `:` is the value.
//! - `key: [a, b]` sets a list, split on commas and trimmed.
//! - `- item` continues the most recently introduced key: it appends when
//!   that key holds a list, or starts a list when the key's value is empty.
//! - Blank lines and lines starting with `#` are ignored.
//!
//! Nested structures are not supported.

use indexmap::IndexMap;

const FENCE: &str = "---";
const LIST_ITEM: &str = "- ";
const COMMENT: char = '#';

/// A parsed header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// A single, possibly empty, string.
    Scalar(String),
    /// A list of strings.
    List(Vec<String>),
}

impl HeaderValue {
    /// The value as a non-empty scalar. Lists yield `None`.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            HeaderValue::Scalar(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// The value as a list; a non-empty scalar becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            HeaderValue::Scalar(s) if s.is_empty() => Vec::new(),
            HeaderValue::Scalar(s) => vec![s.clone()],
            HeaderValue::List(items) => items.clone(),
        }
    }
}

/// Header entries in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: IndexMap<String, HeaderValue>,
}

impl Header {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keys were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty scalar value for `key`.
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.get(key).and_then(HeaderValue::as_scalar).map(String::from)
    }

    /// List value for `key`; absent keys yield an empty list.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.get(key).map(HeaderValue::to_list).unwrap_or_default()
    }
}

/// Split a descriptor into its raw header and body.
///
/// The first line must be exactly `---`; the header runs to the next line
/// that is exactly `---`. Returns `None` when either fence is missing.
pub fn split_descriptor(content: &str) -> Option<(&str, &str)> {
    let after_open = strip_fence_line(content)?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if is_fence(line) {
            let header = after_open[..offset].trim_end_matches(['\r', '\n']);
            let body = &after_open[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

/// Parse header lines into key/value entries.
pub fn parse_header(raw: &str) -> Header {
    let mut entries: IndexMap<String, HeaderValue> = IndexMap::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix(LIST_ITEM) {
            if let Some((_, last)) = entries.last_mut() {
                let item = item.trim().to_string();
                let starts_list = matches!(last, HeaderValue::Scalar(s) if s.is_empty());
                if let HeaderValue::List(items) = last {
                    items.push(item);
                } else if starts_list {
                    *last = HeaderValue::List(vec![item]);
                }
                continue;
            }
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        entries.insert(key.trim().to_string(), parse_value(value.trim()));
    }

    Header { entries }
}

fn parse_value(value: &str) -> HeaderValue {
    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => HeaderValue::List(
            inner
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        None => HeaderValue::Scalar(value.to_string()),
    }
}

fn strip_fence_line(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some(split) => split,
        None => (content, ""),
    };
    is_fence(first).then_some(rest)
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == FENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_descriptor() {
        let content = "---\nname: a\n---\nbody text\n## Message\nhi\n";
        let (header, body) = split_descriptor(content).unwrap();
        assert_eq!(header, "name: a");
        assert_eq!(body, "body text\n## Message\nhi\n");
    }

    #[test]
    fn test_split_descriptor_with_crlf() {
        let content = "---\r\nname: a\r\n---\r\nbody\r\n";
        let (header, body) = split_descriptor(content).unwrap();
        assert_eq!(header, "name: a");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_requires_both_fences() {
        assert!(split_descriptor("name: a\n---\nbody").is_none());
        assert!(split_descriptor("---\nname: a\nbody").is_none());
        assert!(split_descriptor(" ---\nname: a\n---\n").is_none());
    }

    #[test]
    fn test_fence_must_be_line_exact() {
        let content = "---\nname: a\n----\nmore: b\n---\n";
        let (header, _) = split_descriptor(content).unwrap();
        assert_eq!(header, "name: a\n----\nmore: b");
    }

    #[test]
    fn test_scalars_and_inline_lists() {
        let header = parse_header("name: no-todo\ntools: [write, edit , ]\naction: block");
        assert_eq!(header.scalar("name").as_deref(), Some("no-todo"));
        assert_eq!(header.list("tools"), vec!["write", "edit"]);
        assert_eq!(header.scalar("action").as_deref(), Some("block"));
    }

    #[test]
    fn test_value_keeps_everything_after_first_colon() {
        let header = parse_header(r"pattern: https?://\S+ # not a comment");
        assert_eq!(
            header.scalar("pattern").as_deref(),
            Some(r"https?://\S+ # not a comment")
        );
    }

    #[test]
    fn test_dash_continuation_starts_and_extends_list() {
        let header = parse_header("pattern:\n  - foo\n  - bar\nexclude: [a]\n  - b");
        assert_eq!(header.list("pattern"), vec!["foo", "bar"]);
        assert_eq!(header.list("exclude"), vec!["a", "b"]);
    }

    #[test]
    fn test_dash_after_non_empty_scalar_is_dropped() {
        let header = parse_header("pattern: foo\n- bar");
        assert_eq!(header.get("pattern"), Some(&HeaderValue::Scalar("foo".into())));
    }

    #[test]
    fn test_comments_and_blank_lines_are_ignored() {
        let header = parse_header("# comment\n\nname: x\n   # indented comment\n");
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn test_continuation_follows_first_insertion_order() {
        let header = parse_header("pattern:\nname: x\npattern:\n- foo");
        assert_eq!(header.scalar("name").as_deref(), Some("x"));
        assert!(header.list("pattern").is_empty());
    }

    #[test]
    fn test_scalar_reads_as_single_element_list() {
        let header = parse_header("extensions: .go");
        assert_eq!(header.list("extensions"), vec![".go"]);
        assert!(header.list("missing").is_empty());
    }
}
