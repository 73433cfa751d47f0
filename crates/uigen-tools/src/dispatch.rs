//! Routing of raw tool calls by tool name.

use crate::activity::describe_tool_call;
use crate::editor::{ERROR_PREFIX, StrReplaceEditor};
use crate::file_manager::FileManager;
use crate::types::{EDITOR_TOOL, EditorParams, FILE_MANAGER_TOOL, FileManagerParams, ToolResult};
use serde_json::Value;
use thiserror::Error;
use uigen_vfs::VirtualFileSystem;

/// What a tool returned.
///
/// The editor answers with bare text while the file manager answers with a
/// [`ToolResult`]; both shapes are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// Reply of `str_replace_editor`
    Text(String),
    /// Reply of `file_manager`
    Result(ToolResult),
}

impl ToolOutput {
    /// Human-readable text of the reply.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Result(result) => result.text(),
        }
    }

    /// Returns `true` if the tool reported a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        match self {
            Self::Text(text) => text.starts_with(ERROR_PREFIX),
            Self::Result(result) => !result.success,
        }
    }

    /// JSON form: a string for the editor, an object for the file manager.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Result(result) => serde_json::to_value(result).unwrap_or(Value::Null),
        }
    }
}

/// Failures to route a tool call at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No tool has this name
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Requested tool name
        name: String,
    },

    /// Arguments do not match the tool's schema
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments {
        /// Tool name
        tool: &'static str,
        /// Decoder message
        message: String,
    },
}

impl DispatchError {
    /// Returns `true` if the tool name was not recognised.
    #[must_use]
    pub const fn is_unknown_tool(&self) -> bool {
        matches!(self, Self::UnknownTool { .. })
    }
}

/// Decodes `args` for the named tool and runs it against `fs`.
///
/// # Errors
///
/// Returns `DispatchError` when the tool is unknown or `args` does not
/// decode. Failures of the tool itself are part of the `ToolOutput`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use uigen_tools::{ToolOutput, dispatch};
/// use uigen_vfs::VirtualFileSystem;
///
/// let mut fs = VirtualFileSystem::new();
/// let output = dispatch(
///     &mut fs,
///     "str_replace_editor",
///     json!({"command": "create", "path": "/App.jsx", "file_text": "x"}),
/// )?;
///
/// assert_eq!(output, ToolOutput::Text("File created: /App.jsx".to_string()));
/// # Ok::<(), uigen_tools::DispatchError>(())
/// ```
pub fn dispatch(
    fs: &mut VirtualFileSystem,
    tool: &str,
    args: Value,
) -> Result<ToolOutput, DispatchError> {
    tracing::info!("{}", describe_tool_call(tool, &args));

    let output = match tool {
        EDITOR_TOOL => {
            let params: EditorParams = decode(EDITOR_TOOL, args)?;
            ToolOutput::Text(StrReplaceEditor::new(fs).execute(params))
        }
        FILE_MANAGER_TOOL => {
            let params: FileManagerParams = decode(FILE_MANAGER_TOOL, args)?;
            ToolOutput::Result(FileManager::new(fs).execute(params))
        }
        other => {
            return Err(DispatchError::UnknownTool {
                name: other.to_string(),
            });
        }
    };

    if output.is_error() {
        tracing::debug!("{} reported: {}", tool, output.text());
    }
    Ok(output)
}

fn decode<T: serde::de::DeserializeOwned>(
    tool: &'static str,
    args: Value,
) -> Result<T, DispatchError> {
    serde_json::from_value(args).map_err(|e| DispatchError::InvalidArguments {
        tool,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_file_manager() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "").unwrap();
        let output = dispatch(
            &mut fs,
            "file_manager",
            json!({"command": "delete", "path": "/a.js"}),
        )
        .unwrap();
        assert!(!output.is_error());
        assert_eq!(
            output.to_json(),
            json!({"success": true, "message": "Successfully deleted /a.js"})
        );
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let mut fs = VirtualFileSystem::new();
        let error = dispatch(&mut fs, "shell", json!({})).unwrap_err();
        assert!(error.is_unknown_tool());
        assert_eq!(error.to_string(), "Unknown tool: shell");
    }

    #[test]
    fn test_dispatch_bad_arguments() {
        let mut fs = VirtualFileSystem::new();
        let error = dispatch(&mut fs, "str_replace_editor", json!({"command": "view"})).unwrap_err();
        assert!(matches!(error, DispatchError::InvalidArguments { tool: "str_replace_editor", .. }));
    }

    #[test]
    fn test_editor_error_is_flagged() {
        let mut fs = VirtualFileSystem::new();
        let output = dispatch(
            &mut fs,
            "str_replace_editor",
            json!({"command": "undo_edit", "path": "/a"}),
        )
        .unwrap();
        assert!(output.is_error());
        assert!(output.to_json().is_string());
    }
}
