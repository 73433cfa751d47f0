//! One editing session: a project filesystem plus its live preview.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use uigen_preview::{
    CachedPreview, LivePreview, PreviewCompiler, PreviewConfig, PreviewError, PreviewState,
};
use uigen_tools::{
    DispatchError, EditorParams, FileManager, FileManagerParams, StrReplaceEditor, ToolOutput,
    ToolResult, dispatch,
};
use uigen_vfs::VirtualFileSystem;

/// Summary of the current preview, as reported to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewStatus {
    /// Preview state
    pub state: PreviewState,
    /// Entry module, if one was found
    pub entry: Option<String>,
    /// Non-fatal per-file errors
    pub errors: Vec<String>,
    /// Filesystem version the status describes
    pub version: u64,
    /// Number of files in the project
    pub file_count: usize,
}

/// Owns the filesystem of one project and keeps its preview current.
///
/// All mutations go through the tool methods, one call at a time.
///
/// # Examples
///
/// ```
/// use uigen_preview::{PreviewConfig, PreviewState};
/// use uigen_server::session::ProjectSession;
///
/// let mut session = ProjectSession::new(PreviewConfig::default())?;
/// assert_eq!(session.status().state, PreviewState::Welcome);
///
/// let reply = session.execute(
///     "str_replace_editor",
///     serde_json::json!({"command": "create", "path": "/App.jsx", "file_text": "export default () => null;"}),
/// )?;
/// assert_eq!(reply.text(), "File created: /App.jsx");
/// assert_eq!(session.status().state, PreviewState::Compiled);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct ProjectSession {
    fs: VirtualFileSystem,
    preview: LivePreview,
}

impl ProjectSession {
    /// Creates an empty project.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError` if the preview settings are rejected.
    pub fn new(config: PreviewConfig) -> Result<Self, PreviewError> {
        Ok(Self::with_filesystem(
            PreviewCompiler::new(config)?,
            VirtualFileSystem::new(),
        ))
    }

    /// Creates a session over an existing filesystem.
    #[must_use]
    pub const fn with_filesystem(compiler: PreviewCompiler, fs: VirtualFileSystem) -> Self {
        Self {
            fs,
            preview: LivePreview::new(compiler),
        }
    }

    /// The project filesystem.
    #[must_use]
    pub const fn fs(&self) -> &VirtualFileSystem {
        &self.fs
    }

    /// Returns a receiver that observes every filesystem version.
    ///
    /// Replaces any previous subscription. The channel starts at the current
    /// version.
    pub fn subscribe(&mut self) -> watch::Receiver<u64> {
        let (sender, receiver) = watch::channel(self.fs.version());
        self.fs.set_on_change(move |version| {
            sender.send_replace(version);
        });
        receiver
    }

    /// Runs a raw tool call by name.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the tool is unknown or `args` does not
    /// decode.
    pub fn execute(&mut self, tool: &str, args: Value) -> Result<ToolOutput, DispatchError> {
        dispatch(&mut self.fs, tool, args)
    }

    /// Runs `str_replace_editor`.
    pub fn execute_editor(&mut self, params: EditorParams) -> String {
        StrReplaceEditor::new(&mut self.fs).execute(params)
    }

    /// Runs `file_manager`.
    pub fn execute_file_manager(&mut self, params: FileManagerParams) -> ToolResult {
        FileManager::new(&mut self.fs).execute(params)
    }

    /// Preview for the current filesystem version.
    pub fn preview(&mut self) -> &CachedPreview {
        self.preview.refresh(&self.fs)
    }

    /// Status of the preview for the current filesystem version.
    pub fn status(&mut self) -> PreviewStatus {
        let file_count = self.fs.file_count();
        let preview = self.preview.refresh(&self.fs);
        PreviewStatus {
            state: preview.outcome.state,
            entry: preview.outcome.entry().map(str::to_string),
            errors: preview.outcome.errors().to_vec(),
            version: preview.version,
            file_count,
        }
    }
}
