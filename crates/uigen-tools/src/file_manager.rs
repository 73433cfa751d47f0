//! The `file_manager` tool: rename and delete.

use crate::types::{FileManagerCommand, FileManagerParams, ToolResult};
use uigen_vfs::{VfsError, VirtualFileSystem};

/// File-management tool bound to one filesystem.
///
/// Validation happens before the filesystem is touched, and each command
/// either applies fully or not at all.
///
/// # Examples
///
/// ```
/// use uigen_tools::{FileManager, FileManagerCommand, ToolResult};
/// use uigen_vfs::VirtualFileSystem;
///
/// let mut fs = VirtualFileSystem::new();
/// fs.create_file("/old.jsx", "x").unwrap();
///
/// let result = FileManager::new(&mut fs).run(FileManagerCommand::Rename {
///     path: "/old.jsx".to_string(),
///     new_path: "/components/New.jsx".to_string(),
/// });
///
/// assert_eq!(result, ToolResult::success("Successfully renamed /old.jsx to /components/New.jsx"));
/// assert!(fs.exists("/components/New.jsx"));
/// ```
#[derive(Debug)]
pub struct FileManager<'a> {
    fs: &'a mut VirtualFileSystem,
}

impl<'a> FileManager<'a> {
    /// Binds the tool to `fs`.
    pub const fn new(fs: &'a mut VirtualFileSystem) -> Self {
        Self { fs }
    }

    /// Validates `params` and runs the command.
    pub fn execute(&mut self, params: FileManagerParams) -> ToolResult {
        match FileManagerCommand::try_from(params) {
            Ok(command) => self.run(command),
            Err(e) => ToolResult::failure(e.to_string()),
        }
    }

    /// Runs an already validated command.
    pub fn run(&mut self, command: FileManagerCommand) -> ToolResult {
        match command {
            FileManagerCommand::Rename { path, new_path } => {
                match self.fs.rename_node(&path, &new_path) {
                    Ok(()) => ToolResult::success(format!("Successfully renamed {path} to {new_path}")),
                    Err(e) => ToolResult::failure(format!("Failed to rename: {e}")),
                }
            }
            FileManagerCommand::Delete { path } => {
                if self.fs.delete_node(&path) {
                    ToolResult::success(format!("Successfully deleted {path}"))
                } else {
                    let reason = VfsError::NotFound { path };
                    ToolResult::failure(format!("Failed to delete: {reason}"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileManagerCommandKind;

    #[test]
    fn test_missing_new_path_leaves_fs_untouched() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/old.txt", "content").unwrap();
        let version = fs.version();

        let result = FileManager::new(&mut fs).execute(FileManagerParams {
            command: FileManagerCommandKind::Rename,
            path: "/old.txt".to_string(),
            new_path: None,
        });

        assert_eq!(result, ToolResult::failure("new_path is required for rename command"));
        assert_eq!(fs.version(), version);
    }

    #[test]
    fn test_rename_missing_source() {
        let mut fs = VirtualFileSystem::new();
        let result = FileManager::new(&mut fs).run(FileManagerCommand::Rename {
            path: "/nope.txt".to_string(),
            new_path: "/new.txt".to_string(),
        });
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Failed to rename: File not found: /nope.txt")
        );
    }

    #[test]
    fn test_rename_same_path_succeeds() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.txt", "same").unwrap();
        let result = FileManager::new(&mut fs).run(FileManagerCommand::Rename {
            path: "/a.txt".to_string(),
            new_path: "/a.txt".to_string(),
        });
        assert!(result.success);
        assert_eq!(fs.read_file("/a.txt").unwrap(), "same");
    }

    #[test]
    fn test_delete_missing() {
        let mut fs = VirtualFileSystem::new();
        let result = FileManager::new(&mut fs).run(FileManagerCommand::Delete {
            path: "/ghost.txt".to_string(),
        });
        assert_eq!(
            result,
            ToolResult::failure("Failed to delete: File not found: /ghost.txt")
        );
    }

    #[test]
    fn test_delete_directory() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/lib/a.js", "").unwrap();
        fs.create_file("/lib/b/c.js", "").unwrap();
        let result = FileManager::new(&mut fs).run(FileManagerCommand::Delete {
            path: "/lib".to_string(),
        });
        assert!(result.success);
        assert_eq!(fs.file_count(), 0);
    }
}
