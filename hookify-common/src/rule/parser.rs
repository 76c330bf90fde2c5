//! Parser for rule descriptor files.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{HookifyError, Result};

use super::frontmatter::{parse_header, split_descriptor, Header};
use super::types::{Rule, RuleFrontmatter};

static MESSAGE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^##[ \t]+Message[ \t]*\r?$").expect("message heading regex is valid")
});

/// Parse a descriptor into a compiled [`Rule`].
///
/// # Format
///
/// ```markdown
/// ---
/// name: no-todo
/// hook: before
/// action: warn
/// pattern: TODO
/// ---
///
/// Flags new TODO markers.
///
/// ## Message
/// TODO added to {{file}} on lines {{lines}}.
/// ```
pub fn parse_descriptor(content: &str, path: &Path) -> Result<Rule> {
    let (raw_header, body) = split_descriptor(content).ok_or_else(|| {
        HookifyError::config(path, "frontmatter", "invalid or unterminated --- header")
    })?;

    let frontmatter = frontmatter_from_header(&parse_header(raw_header));
    let message = extract_message_section(body)
        .ok_or_else(|| HookifyError::config(path, "## Message", "missing message section"))?;

    Rule::compile(frontmatter, message, path)
}

/// Text following the `## Message` heading, trimmed.
///
/// Returns `None` when the heading is absent or nothing follows it.
pub fn extract_message_section(body: &str) -> Option<String> {
    let heading = MESSAGE_HEADING.find(body)?;
    let message = body[heading.end()..].trim();
    (!message.is_empty()).then(|| message.to_string())
}

fn frontmatter_from_header(header: &Header) -> RuleFrontmatter {
    RuleFrontmatter {
        name: header.scalar("name"),
        hook: header.scalar("hook"),
        tools: header.list("tools"),
        extensions: header.list("extensions"),
        action: header.scalar("action"),
        pattern: header.list("pattern"),
        exclude: header.list("exclude"),
    }
}
