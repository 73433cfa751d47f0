//! Parameter and result types for the two tools.
//!
//! Agents send flat JSON objects with a `command` string and a handful of
//! optional fields. Those objects deserialize into [`EditorParams`] and
//! [`FileManagerParams`], whose JSON Schemas are what the agent sees. Each is
//! decoded exactly once into a command sum type ([`EditorCommand`],
//! [`FileManagerCommand`]) that the executors match on exhaustively.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the content-editing tool.
pub const EDITOR_TOOL: &str = "str_replace_editor";

/// Identifier of the file-management tool.
pub const FILE_MANAGER_TOOL: &str = "file_manager";

// ============================================================================
// str_replace_editor
// ============================================================================

/// Commands accepted by the editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditorCommandKind {
    /// Show a file (optionally a line range) or list a directory
    View,
    /// Write a whole file, creating parent directories
    Create,
    /// Replace exactly one occurrence of a string
    StrReplace,
    /// Insert a line after a given line number
    Insert,
    /// Revert the last edit (unsupported)
    UndoEdit,
}

/// Raw parameters of the `str_replace_editor` tool.
///
/// # Examples
///
/// ```
/// use uigen_tools::{EditorCommand, EditorParams};
///
/// let params: EditorParams = serde_json::from_value(serde_json::json!({
///     "command": "str_replace",
///     "path": "/App.jsx",
///     "old_str": "Hello",
/// }))
/// .unwrap();
///
/// let command = EditorCommand::from(params);
/// assert_eq!(
///     command,
///     EditorCommand::StrReplace {
///         path: "/App.jsx".to_string(),
///         old_str: "Hello".to_string(),
///         new_str: String::new(),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EditorParams {
    /// The command to run
    pub command: EditorCommandKind,

    /// Absolute path to the file or directory, e.g. `/App.jsx`
    pub path: String,

    /// Full file content for `create`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_text: Option<String>,

    /// Text to find for `str_replace`; must occur exactly once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_str: Option<String>,

    /// Replacement text for `str_replace`, or the line to add for `insert`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_str: Option<String>,

    /// Line after which `insert` places the new text (0 prepends)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_line: Option<usize>,

    /// Inclusive 1-based `[start, end]` for `view`; an end of -1 reads to the end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_range: Option<(i64, i64)>,
}

/// Line window for `view`, already clamped to sensible bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRange {
    /// First line shown, 1-based
    pub start: usize,
    /// Last line shown, inclusive; `None` reads to the end of the file
    pub end: Option<usize>,
}

impl ViewRange {
    /// Builds a range from the agent-supplied pair.
    ///
    /// A start below 1 becomes 1; any negative end means "to the end".
    #[must_use]
    pub fn from_pair(start: i64, end: i64) -> Self {
        let start = usize::try_from(start.max(1)).unwrap_or(1);
        let end = usize::try_from(end).ok();
        Self { start, end }
    }
}

/// A decoded editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Show a file or directory
    View {
        /// Target path
        path: String,
        /// Optional line window
        range: Option<ViewRange>,
    },
    /// Write a file
    Create {
        /// Target path
        path: String,
        /// Content to write; empty when omitted
        file_text: String,
    },
    /// Replace one occurrence
    StrReplace {
        /// Target path
        path: String,
        /// Text to find
        old_str: String,
        /// Replacement
        new_str: String,
    },
    /// Insert a line
    Insert {
        /// Target path
        path: String,
        /// Line after which to insert
        insert_line: usize,
        /// Text to insert
        new_str: String,
    },
    /// Unsupported undo
    UndoEdit {
        /// Target path
        path: String,
    },
}

impl From<EditorParams> for EditorCommand {
    fn from(params: EditorParams) -> Self {
        let EditorParams {
            command,
            path,
            file_text,
            old_str,
            new_str,
            insert_line,
            view_range,
        } = params;

        match command {
            EditorCommandKind::View => Self::View {
                path,
                range: view_range.map(|(start, end)| ViewRange::from_pair(start, end)),
            },
            EditorCommandKind::Create => Self::Create {
                path,
                file_text: file_text.unwrap_or_default(),
            },
            EditorCommandKind::StrReplace => Self::StrReplace {
                path,
                old_str: old_str.unwrap_or_default(),
                new_str: new_str.unwrap_or_default(),
            },
            EditorCommandKind::Insert => Self::Insert {
                path,
                insert_line: insert_line.unwrap_or(0),
                new_str: new_str.unwrap_or_default(),
            },
            EditorCommandKind::UndoEdit => Self::UndoEdit { path },
        }
    }
}

// ============================================================================
// file_manager
// ============================================================================

/// Commands accepted by the file manager tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileManagerCommandKind {
    /// Move a file or directory
    Rename,
    /// Remove a file or directory recursively
    Delete,
}

/// Raw parameters of the `file_manager` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileManagerParams {
    /// The command to run
    pub command: FileManagerCommandKind,

    /// Path of the file or directory to rename or delete
    pub path: String,

    /// Destination path, required for `rename`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
}

/// A decoded file manager command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileManagerCommand {
    /// Move `path` to `new_path`
    Rename {
        /// Source
        path: String,
        /// Destination
        new_path: String,
    },
    /// Delete `path`
    Delete {
        /// Target
        path: String,
    },
}

impl TryFrom<FileManagerParams> for FileManagerCommand {
    type Error = ToolInputError;

    fn try_from(params: FileManagerParams) -> Result<Self, Self::Error> {
        match params.command {
            FileManagerCommandKind::Rename => {
                let new_path = params.new_path.ok_or(ToolInputError::MissingArgument {
                    argument: "new_path",
                    command: "rename",
                })?;
                Ok(Self::Rename {
                    path: params.path,
                    new_path,
                })
            }
            FileManagerCommandKind::Delete => Ok(Self::Delete { path: params.path }),
        }
    }
}

/// Validation failures detected while decoding tool parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolInputError {
    /// A command-specific argument was omitted
    #[error("{argument} is required for {command} command")]
    MissingArgument {
        /// Missing field name
        argument: &'static str,
        /// Command that needs it
        command: &'static str,
    },
}

impl ToolInputError {
    /// Returns `true` if a required argument was missing.
    #[must_use]
    pub const fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }
}

/// Uniform result of the file manager tool.
///
/// Serializes to `{"success": true, "message": ...}` or
/// `{"success": false, "error": ...}`.
///
/// # Examples
///
/// ```
/// use uigen_tools::ToolResult;
///
/// let result = ToolResult::failure("Failed to delete: File not found: /x");
/// assert_eq!(
///     serde_json::to_value(&result).unwrap(),
///     serde_json::json!({"success": false, "error": "Failed to delete: File not found: /x"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolResult {
    /// Whether the operation applied
    pub success: bool,

    /// Confirmation text on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Reason on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    /// Successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failed result.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    /// The message or the error, whichever is set.
    #[must_use]
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}
