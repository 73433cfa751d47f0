//! MCP service exposing the project tools.
//!
//! The `UigenService` provides three tools:
//! 1. `str_replace_editor` - view, create and edit files
//! 2. `file_manager` - rename and delete files or folders
//! 3. `preview_status` - report the state of the live preview

use crate::session::ProjectSession;
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};
use std::sync::Arc;
use tokio::sync::Mutex;
use uigen_tools::{
    EDITOR_TOOL, EditorParams, FILE_MANAGER_TOOL, FileManagerParams, GENERATION_PROMPT,
    ToolOutput, describe_tool_call,
};

/// MCP server over one project session.
///
/// Tool calls are serialized through the session mutex, so the filesystem
/// sees one mutation at a time.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
/// use tokio::sync::Mutex;
/// use uigen_preview::PreviewConfig;
/// use uigen_server::service::UigenService;
/// use uigen_server::session::ProjectSession;
///
/// # async fn example() -> anyhow::Result<()> {
/// let session = Arc::new(Mutex::new(ProjectSession::new(PreviewConfig::default())?));
/// let service = UigenService::new(session).serve(stdio()).await?;
/// service.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UigenService {
    /// Project being edited
    session: Arc<Mutex<ProjectSession>>,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl UigenService {
    /// Creates a service over `session`.
    #[must_use]
    pub fn new(session: Arc<Mutex<ProjectSession>>) -> Self {
        Self {
            session,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl UigenService {
    /// View, create and edit files in the project.
    #[tool(
        description = "View, create and edit files in the virtual file system. `view` shows a file with line numbers (optionally a `view_range`) or lists a directory. `create` writes `file_text` to `path`, creating parent directories. `str_replace` replaces the single occurrence of `old_str` with `new_str`. `insert` adds `new_str` as a new line after `insert_line` (0 prepends)."
    )]
    async fn str_replace_editor(
        &self,
        Parameters(params): Parameters<EditorParams>,
    ) -> Result<CallToolResult, McpError> {
        let label = activity_label(EDITOR_TOOL, &params);
        tracing::info!("{}", label);

        let reply = self.session.lock().await.execute_editor(params);
        Ok(tool_result(&ToolOutput::Text(reply)))
    }

    /// Rename or delete files and folders.
    #[tool(
        description = "Rename or delete files or folders in the file system. Rename can be used to \"move\" a file. Rename will recursively create folders as required."
    )]
    async fn file_manager(
        &self,
        Parameters(params): Parameters<FileManagerParams>,
    ) -> Result<CallToolResult, McpError> {
        let label = activity_label(FILE_MANAGER_TOOL, &params);
        tracing::info!("{}", label);

        let result = self.session.lock().await.execute_file_manager(params);
        Ok(tool_result(&ToolOutput::Result(result)))
    }

    /// Report the live preview state.
    #[tool(
        description = "Report the live preview state (welcome, no-entry, compiled, compile-error), the entry file, per-file compile errors and the project version."
    )]
    async fn preview_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.session.lock().await.status();
        tracing::debug!("Preview status: {} at version {}", status.state, status.version);

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&status).map_err(|e| {
                McpError::internal_error(format!("Failed to serialize status: {e}"), None)
            })?,
        )]))
    }
}

#[tool_handler]
impl ServerHandler for UigenService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(GENERATION_PROMPT.to_string()),
        }
    }
}

/// Activity label for typed parameters.
fn activity_label<T: serde::Serialize>(tool: &str, params: &T) -> String {
    let args = serde_json::to_value(params).unwrap_or_default();
    describe_tool_call(tool, &args)
}

/// Wraps a tool reply, flagging failures as tool errors.
fn tool_result(output: &ToolOutput) -> CallToolResult {
    let text = match output {
        ToolOutput::Text(text) => text.clone(),
        ToolOutput::Result(_) => output.to_json().to_string(),
    };
    if output.is_error() {
        CallToolResult::error(vec![Content::text(text)])
    } else {
        CallToolResult::success(vec![Content::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use uigen_preview::PreviewConfig;

    fn service() -> UigenService {
        let session = ProjectSession::new(PreviewConfig::default()).unwrap();
        UigenService::new(Arc::new(Mutex::new(session)))
    }

    fn text(result: &CallToolResult) -> String {
        result.content[0].as_text().unwrap().text.clone()
    }

    fn editor(args: Value) -> Parameters<EditorParams> {
        Parameters(serde_json::from_value(args).unwrap())
    }

    fn file_manager(args: Value) -> Parameters<FileManagerParams> {
        Parameters(serde_json::from_value(args).unwrap())
    }

    #[tokio::test]
    async fn test_editor_create_and_view() {
        let service = service();

        let created = service
            .str_replace_editor(editor(
                json!({"command": "create", "path": "/App.jsx", "file_text": "line one\nline two"}),
            ))
            .await
            .unwrap();
        assert_eq!(text(&created), "File created: /App.jsx");
        assert_eq!(created.is_error, Some(false));

        let viewed = service
            .str_replace_editor(editor(json!({"command": "view", "path": "/App.jsx"})))
            .await
            .unwrap();
        assert_eq!(text(&viewed), "1\tline one\n2\tline two");
    }

    #[tokio::test]
    async fn test_editor_error_flagged() {
        let service = service();
        let result = service
            .str_replace_editor(editor(json!({"command": "undo_edit", "path": "/App.jsx"})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("undo_edit command is not supported"));
    }

    #[tokio::test]
    async fn test_file_manager_reply_is_json() {
        let service = service();
        service
            .str_replace_editor(editor(
                json!({"command": "create", "path": "/a.jsx", "file_text": "x"}),
            ))
            .await
            .unwrap();

        let renamed = service
            .file_manager(file_manager(
                json!({"command": "rename", "path": "/a.jsx", "new_path": "/components/a.jsx"}),
            ))
            .await
            .unwrap();
        let reply: Value = serde_json::from_str(&text(&renamed)).unwrap();
        assert_eq!(
            reply,
            json!({"success": true, "message": "Successfully renamed /a.jsx to /components/a.jsx"})
        );

        let missing = service
            .file_manager(file_manager(json!({"command": "rename", "path": "/a.jsx"})))
            .await
            .unwrap();
        assert_eq!(missing.is_error, Some(true));
        assert!(text(&missing).contains("new_path is required for rename command"));
    }

    #[tokio::test]
    async fn test_preview_status() {
        let service = service();
        let status: Value =
            serde_json::from_str(&text(&service.preview_status().await.unwrap())).unwrap();
        assert_eq!(status["state"], "welcome");

        service
            .str_replace_editor(editor(json!({
                "command": "create",
                "path": "/App.jsx",
                "file_text": "export default function App() { return <p>Hi</p>; }",
            })))
            .await
            .unwrap();

        let status: Value =
            serde_json::from_str(&text(&service.preview_status().await.unwrap())).unwrap();
        assert_eq!(status["state"], "compiled");
        assert_eq!(status["entry"], "/App.jsx");
        assert_eq!(status["errors"], json!([]));
    }

    #[test]
    fn test_server_info() {
        let info = service().get_info();
        assert_eq!(info.protocol_version, ProtocolVersion::V_2024_11_05);
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("/App.jsx"));
    }

    #[test]
    fn test_tool_list() {
        let names: Vec<String> = service()
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert!(names.contains(&"str_replace_editor".to_string()));
        assert!(names.contains(&"file_manager".to_string()));
        assert!(names.contains(&"preview_status".to_string()));
    }

    #[test]
    fn test_tool_descriptions() {
        let tools = service().tool_router.list_all();
        let description = |name: &str| {
            tools
                .iter()
                .find(|tool| tool.name == name)
                .and_then(|tool| tool.description.as_deref())
                .unwrap_or_default()
                .to_string()
        };
        assert!(description("str_replace_editor").contains("`view` shows a file with line numbers"));
        assert!(description("file_manager").starts_with("Rename or delete files or folders"));
    }
}
