//! Placeholder substitution for violation messages.
//!
//! Templates use `{{name}}` placeholders. Every occurrence of each supplied
//! key is replaced with its literal value; placeholders without a value are
//! left as written.

/// Variable holding the offending file path.
pub const FILE_VAR: &str = "file";

/// Variable holding the comma-joined matched line numbers.
pub const LINES_VAR: &str = "lines";

/// Substitute `{{key}}` placeholders in `template`.
///
/// Keys are applied in iteration order and values are not escaped: a value
/// containing a later key's placeholder is expanded by that later pass.
pub fn render<'a, I>(template: &str, variables: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    variables
        .into_iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{{key}}}}}"), value)
        })
}

/// Render a rule message with the standard `file` and `lines` variables.
pub fn render_violation(template: &str, file: &str, lines: &str) -> String {
    render(template, [(FILE_VAR, file), (LINES_VAR, lines)])
}
