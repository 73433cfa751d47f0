//! Short labels describing a tool call, as shown next to a chat message.

use crate::types::{EDITOR_TOOL, FILE_MANAGER_TOOL};
use serde_json::Value;

/// Describes a tool call in a few words.
///
/// `args` is the raw argument object the agent sent. Missing paths read as
/// `file`; unknown tools or commands fall back to the tool name.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use uigen_tools::describe_tool_call;
///
/// assert_eq!(
///     describe_tool_call("str_replace_editor", &json!({"command": "create", "path": "/App.jsx"})),
///     "Creating /App.jsx"
/// );
/// assert_eq!(
///     describe_tool_call("file_manager", &json!({"command": "rename", "path": "/a.tsx", "new_path": "/b.tsx"})),
///     "Moving /a.tsx → /b.tsx"
/// );
/// assert_eq!(describe_tool_call("web_search", &json!({})), "web_search");
/// ```
#[must_use]
pub fn describe_tool_call(tool_name: &str, args: &Value) -> String {
    let field = |name: &str| args.get(name).and_then(Value::as_str);
    let path = field("path").unwrap_or("file");

    let label = match (tool_name, field("command")) {
        (EDITOR_TOOL, Some("create")) => Some(format!("Creating {path}")),
        (EDITOR_TOOL, Some("str_replace")) => Some(format!("Editing {path}")),
        (EDITOR_TOOL, Some("insert")) => Some(format!("Inserting into {path}")),
        (EDITOR_TOOL, Some("view")) => Some(format!("Viewing {path}")),
        (EDITOR_TOOL, Some("undo_edit")) => Some(format!("Undoing edit to {path}")),
        (FILE_MANAGER_TOOL, Some("rename")) => Some(match field("new_path") {
            Some(new_path) if !new_path.is_empty() => format!("Moving {path} → {new_path}"),
            _ => format!("Moving {path}"),
        }),
        (FILE_MANAGER_TOOL, Some("delete")) => Some(format!("Deleting {path}")),
        _ => None,
    };

    label.unwrap_or_else(|| tool_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_editor_labels() {
        let cases = [
            ("str_replace", "/components/Header.tsx", "Editing /components/Header.tsx"),
            ("view", "/utils.ts", "Viewing /utils.ts"),
            ("insert", "/index.tsx", "Inserting into /index.tsx"),
            ("undo_edit", "/App.jsx", "Undoing edit to /App.jsx"),
        ];
        for (command, path, expected) in cases {
            let args = json!({"command": command, "path": path});
            assert_eq!(describe_tool_call("str_replace_editor", &args), expected);
        }
    }

    #[test]
    fn test_file_manager_labels() {
        assert_eq!(
            describe_tool_call("file_manager", &json!({"command": "delete", "path": "/temp.tsx"})),
            "Deleting /temp.tsx"
        );
        assert_eq!(
            describe_tool_call("file_manager", &json!({"command": "rename", "path": "/a.tsx"})),
            "Moving /a.tsx"
        );
    }

    #[test]
    fn test_missing_path_and_args() {
        assert_eq!(
            describe_tool_call("str_replace_editor", &json!({"command": "create"})),
            "Creating file"
        );
        assert_eq!(
            describe_tool_call("str_replace_editor", &Value::Null),
            "str_replace_editor"
        );
        assert_eq!(
            describe_tool_call("file_manager", &json!({"command": "chmod", "path": "/a"})),
            "file_manager"
        );
    }
}
