//! Normalized mutation events.
//!
//! Hosts describe file mutations in four shapes (write, edit, multi-edit and
//! unified-diff patch). [`MutationEvent`] flattens all of them into an ordered
//! list of content fragments, or raw diff text for patches, so rules only ever
//! see one shape.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The kind of mutating operation a host is about to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Whole-file write.
    #[serde(rename = "write")]
    Write,
    /// Single string replacement inside a file.
    #[serde(rename = "edit")]
    Edit,
    /// Several string replacements inside one file.
    #[serde(rename = "multiedit", alias = "multi_edit")]
    MultiEdit,
    /// Unified-diff patch, possibly touching several files.
    #[serde(rename = "apply_patch", alias = "patch")]
    Patch,
}

impl OperationKind {
    /// Map a host tool identifier to an operation kind.
    ///
    /// Matching is case-insensitive so both `write` and `Write` are accepted.
    /// Returns `None` for tools that do not mutate files.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "write" => Some(Self::Write),
            "edit" => Some(Self::Edit),
            "multiedit" | "multi_edit" => Some(Self::MultiEdit),
            "apply_patch" | "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    /// Canonical tool identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Edit => "edit",
            Self::MultiEdit => "multiedit",
            Self::Patch => "apply_patch",
        }
    }

    /// Check whether a tool identifier from a rule's `tools` list names this kind.
    pub fn matches_tool_id(&self, id: &str) -> bool {
        Self::from_tool_name(id) == Some(*self)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized view of an intercepted file mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEvent {
    kind: OperationKind,
    file_path: Option<String>,
    fragments: Vec<String>,
    patch_text: Option<String>,
}

impl MutationEvent {
    /// A whole-file write: one fragment holding the full content.
    pub fn write(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Write,
            file_path: Some(file_path.into()),
            fragments: vec![content.into()],
            patch_text: None,
        }
    }

    /// A single edit: one fragment holding the replacement text.
    pub fn edit(file_path: impl Into<String>, new_string: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Edit,
            file_path: Some(file_path.into()),
            fragments: vec![new_string.into()],
            patch_text: None,
        }
    }

    /// A multi-edit: one fragment per sub-edit, in order.
    pub fn multi_edit<I, S>(file_path: impl Into<String>, new_strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: OperationKind::MultiEdit,
            file_path: Some(file_path.into()),
            fragments: new_strings.into_iter().map(Into::into).collect(),
            patch_text: None,
        }
    }

    /// A unified-diff patch. The target file is recovered from the diff headers.
    pub fn patch(patch_text: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Patch,
            file_path: None,
            fragments: Vec::new(),
            patch_text: Some(patch_text.into()),
        }
    }

    /// Normalize a raw host tool call.
    ///
    /// Argument names are accepted in both camelCase (`filePath`, `newString`,
    /// `patchText`) and snake_case. Missing string arguments default to empty.
    /// Returns `Ok(None)` for tools that do not mutate files.
    pub fn from_tool_call(tool: &str, args: &serde_json::Value) -> Result<Option<Self>> {
        let Some(kind) = OperationKind::from_tool_name(tool) else {
            return Ok(None);
        };

        let event = match kind {
            OperationKind::Write => {
                let args: WriteArgs = serde_json::from_value(args.clone())?;
                Self::write(args.file_path, args.content)
            }
            OperationKind::Edit => {
                let args: EditArgs = serde_json::from_value(args.clone())?;
                Self::edit(args.file_path, args.new_string)
            }
            OperationKind::MultiEdit => {
                let args: MultiEditArgs = serde_json::from_value(args.clone())?;
                Self::multi_edit(
                    args.file_path,
                    args.edits.into_iter().map(|edit| edit.new_string),
                )
            }
            OperationKind::Patch => {
                let args: PatchArgs = serde_json::from_value(args.clone())?;
                Self::patch(args.patch_text)
            }
        };

        Ok(Some(event))
    }

    /// The operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The target file as supplied by the host (absent for patches).
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    /// Content fragments to scan, in order. Empty for patches.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Raw diff text. Present only for patches.
    pub fn patch_text(&self) -> Option<&str> {
        self.patch_text.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct WriteArgs {
    #[serde(default, alias = "filePath")]
    file_path: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct EditArgs {
    #[serde(default, alias = "filePath")]
    file_path: String,
    #[serde(default, alias = "newString")]
    new_string: String,
}

#[derive(Debug, Deserialize)]
struct SubEdit {
    #[serde(default, alias = "newString")]
    new_string: String,
}

#[derive(Debug, Deserialize)]
struct MultiEditArgs {
    #[serde(default, alias = "filePath")]
    file_path: String,
    #[serde(default)]
    edits: Vec<SubEdit>,
}

#[derive(Debug, Deserialize)]
struct PatchArgs {
    #[serde(default, alias = "patchText")]
    patch_text: String,
}
