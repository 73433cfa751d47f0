//! Agent-facing tools over the UIGen virtual filesystem.
//!
//! Two tools are exposed:
//! - `str_replace_editor` ([`StrReplaceEditor`]): view, create, replace,
//!   insert and a deliberately unsupported undo. Replies are plain strings.
//! - `file_manager` ([`FileManager`]): rename and delete. Replies are
//!   [`ToolResult`] objects.
//!
//! Neither tool returns `Err` for expected failures such as a missing file or
//! a missing argument; those are part of the reply.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uigen_tools::dispatch;
//! use uigen_vfs::VirtualFileSystem;
//!
//! let mut fs = VirtualFileSystem::new();
//! dispatch(&mut fs, "str_replace_editor", json!({
//!     "command": "create",
//!     "path": "/App.jsx",
//!     "file_text": "export default function App() { return <h1>Hi</h1>; }",
//! }))?;
//!
//! let reply = dispatch(&mut fs, "file_manager", json!({
//!     "command": "rename",
//!     "path": "/App.jsx",
//!     "new_path": "/src/App.jsx",
//! }))?;
//! assert!(!reply.is_error());
//! # Ok::<(), uigen_tools::DispatchError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod activity;
pub mod dispatch;
pub mod editor;
pub mod file_manager;
pub mod prompt;
pub mod types;

pub use activity::describe_tool_call;
pub use dispatch::{DispatchError, ToolOutput, dispatch};
pub use editor::{ERROR_PREFIX, StrReplaceEditor};
pub use file_manager::FileManager;
pub use prompt::GENERATION_PROMPT;
pub use types::{
    EDITOR_TOOL, EditorCommand, EditorCommandKind, EditorParams, FILE_MANAGER_TOOL,
    FileManagerCommand, FileManagerCommandKind, FileManagerParams, ToolInputError, ToolResult,
    ViewRange,
};
