//! Core types for the virtual filesystem.
//!
//! The tree is an ownership hierarchy: every [`FileSystemNode`] is owned by
//! its parent's child map and nothing else. Each node also stores its own
//! absolute [`VfsPath`], which is derived from its position and rewritten
//! whenever a subtree moves.
//!
//! # Examples
//!
//! ```
//! use uigen_vfs::{FileSystemNode, NodeKind, VfsPath};
//!
//! let node = FileSystemNode::file(VfsPath::new("/App.jsx"), "export default () => null;");
//! assert_eq!(node.kind(), NodeKind::File);
//! assert_eq!(node.path().as_str(), "/App.jsx");
//! ```

use crate::path::VfsPath;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during VFS operations.
///
/// All error variants include contextual information and implement
/// `is_xxx()` methods for classification.
///
/// # Examples
///
/// ```
/// use uigen_vfs::VfsError;
///
/// let error = VfsError::NotFound {
///     path: "/missing.jsx".to_string(),
/// };
///
/// assert!(error.is_not_found());
/// assert_eq!(error.to_string(), "File not found: /missing.jsx");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// Nothing exists at the requested path
    #[error("File not found: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// A file sits where a directory is required
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory
        path: String,
    },

    /// A directory sits where a file is required
    #[error("Not a file: {path}")]
    NotAFile {
        /// The path that is not a file
        path: String,
    },

    /// The root directory cannot be the subject of this operation
    #[error("Cannot {operation} the root directory")]
    RootOperation {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// A directory cannot be moved underneath itself
    #[error("Cannot move {from} into its own subtree at {to}")]
    InvalidMove {
        /// Source path
        from: String,
        /// Destination path
        to: String,
    },
}

impl VfsError {
    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if a node of the wrong kind was encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::VfsError;
    ///
    /// let error = VfsError::NotADirectory {
    ///     path: "/App.jsx".to_string(),
    /// };
    ///
    /// assert!(error.is_kind_mismatch());
    /// assert!(!error.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::NotADirectory { .. } | Self::NotAFile { .. })
    }

    /// Returns `true` if the operation targeted the root.
    #[must_use]
    pub const fn is_root_operation(&self) -> bool {
        matches!(self, Self::RootOperation { .. })
    }

    /// Returns `true` if a move would have created a cycle.
    #[must_use]
    pub const fn is_invalid_move(&self) -> bool {
        matches!(self, Self::InvalidMove { .. })
    }
}

/// Type alias for VFS operation results.
pub type Result<T> = std::result::Result<T, VfsError>;

/// Flattened view of every file: absolute path to content.
///
/// Ordered lexicographically by path.
pub type FileMap = BTreeMap<String, String>;

/// Discriminates files from directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A regular file with text content
    File,
    /// A directory containing named children
    Directory,
}

/// A file leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub(crate) path: VfsPath,
    pub(crate) content: String,
    pub(crate) last_modified: DateTime<Utc>,
}

impl FileNode {
    /// Absolute path of this file.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        &self.path
    }

    /// Text content of this file.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Time of the last write.
    #[must_use]
    pub const fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
        self.last_modified = Utc::now();
    }
}

/// A directory with uniquely named children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub(crate) path: VfsPath,
    pub(crate) children: BTreeMap<String, FileSystemNode>,
}

impl DirectoryNode {
    /// Absolute path of this directory.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        &self.path
    }

    /// Children keyed by their segment name, in lexicographic order.
    #[must_use]
    pub const fn children(&self) -> &BTreeMap<String, FileSystemNode> {
        &self.children
    }

    /// Looks up a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&FileSystemNode> {
        self.children.get(name)
    }

    /// Returns `true` if this directory has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemNode {
    /// File leaf
    File(FileNode),
    /// Directory
    Directory(DirectoryNode),
}

impl FileSystemNode {
    /// Creates a file node stamped with the current time.
    #[must_use]
    pub fn file(path: VfsPath, content: impl Into<String>) -> Self {
        Self::File(FileNode {
            path,
            content: content.into(),
            last_modified: Utc::now(),
        })
    }

    /// Creates an empty directory node.
    #[must_use]
    pub const fn directory(path: VfsPath) -> Self {
        Self::Directory(DirectoryNode {
            path,
            children: BTreeMap::new(),
        })
    }

    /// Absolute path of this node.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        match self {
            Self::File(file) => &file.path,
            Self::Directory(dir) => &dir.path,
        }
    }

    /// Kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Directory(_) => NodeKind::Directory,
        }
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// File content, or `None` for directories.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File(file) => Some(&file.content),
            Self::Directory(_) => None,
        }
    }

    /// Borrows the node as a file.
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    /// Borrows the node as a directory.
    #[must_use]
    pub const fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    /// Rewrites this node's path and the paths of all descendants.
    pub(crate) fn rebase(&mut self, new_path: VfsPath) {
        match self {
            Self::File(file) => file.path = new_path,
            Self::Directory(dir) => {
                for (name, child) in &mut dir.children {
                    child.rebase(new_path.join_segment(name));
                }
                dir.path = new_path;
            }
        }
    }

    /// Appends every file under this node to `out`.
    pub(crate) fn collect_files(&self, out: &mut FileMap) {
        match self {
            Self::File(file) => {
                out.insert(file.path.as_str().to_string(), file.content.clone());
            }
            Self::Directory(dir) => {
                for child in dir.children.values() {
                    child.collect_files(out);
                }
            }
        }
    }

    /// Visits this node and every descendant, parents before children.
    pub(crate) fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        if let Self::Directory(dir) = self {
            for child in dir.children.values() {
                child.walk(visit);
            }
        }
    }
}
