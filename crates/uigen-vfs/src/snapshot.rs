//! Flat, serializable snapshots of the tree.
//!
//! A snapshot maps every absolute path, the root included, to a
//! [`SerializedNode`]. Its JSON form is what a persistence layer stores:
//!
//! ```json
//! { "/": { "type": "directory" }, "/App.jsx": { "type": "file", "content": "..." } }
//! ```

use crate::types::{FileSystemNode, Result};
use crate::vfs::VirtualFileSystem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SerializedNode {
    /// A file and its content
    File {
        /// Full text content
        content: String,
    },
    /// A directory; children appear as their own entries
    Directory,
}

/// Snapshot keyed by absolute path.
pub type Snapshot = BTreeMap<String, SerializedNode>;

impl VirtualFileSystem {
    /// Captures every node as a flat path-keyed map.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::{SerializedNode, VirtualFileSystem};
    ///
    /// let mut fs = VirtualFileSystem::new();
    /// fs.create_file("/App.jsx", "code")?;
    ///
    /// let snapshot = fs.serialize();
    /// assert_eq!(snapshot["/"], SerializedNode::Directory);
    /// assert_eq!(
    ///     snapshot["/App.jsx"],
    ///     SerializedNode::File { content: "code".to_string() }
    /// );
    /// # Ok::<(), uigen_vfs::VfsError>(())
    /// ```
    #[must_use]
    pub fn serialize(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        self.root().walk(&mut |node| {
            let entry = match node {
                FileSystemNode::File(file) => SerializedNode::File {
                    content: file.content().to_string(),
                },
                FileSystemNode::Directory(_) => SerializedNode::Directory,
            };
            snapshot.insert(node.path().to_string(), entry);
        });
        snapshot
    }

    /// Replaces the whole tree with the contents of `snapshot`.
    ///
    /// Keys are normalized. Missing parent directories are implied. The new
    /// tree is staged separately, so on error the current tree is kept. On
    /// success the version is bumped exactly once.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotADirectory` or `VfsError::NotAFile` when the
    /// snapshot places a file and a directory at conflicting paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::{SerializedNode, Snapshot, VirtualFileSystem};
    ///
    /// let mut snapshot = Snapshot::new();
    /// snapshot.insert(
    ///     "/components/Card.jsx".to_string(),
    ///     SerializedNode::File { content: "card".to_string() },
    /// );
    ///
    /// let mut fs = VirtualFileSystem::new();
    /// fs.create_file("/stale.js", "old")?;
    /// fs.deserialize_from(&snapshot)?;
    ///
    /// assert!(!fs.exists("/stale.js"));
    /// assert!(fs.get_node("/components").unwrap().is_directory());
    /// assert_eq!(fs.read_file("/components/Card.jsx")?, "card");
    /// # Ok::<(), uigen_vfs::VfsError>(())
    /// ```
    pub fn deserialize_from(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut staging = Self::new();
        for (path, node) in snapshot {
            match node {
                SerializedNode::Directory => staging.create_directory(path)?,
                SerializedNode::File { content } => staging.create_file(path, content.as_str())?,
            }
        }
        tracing::debug!("Restored snapshot with {} files", staging.file_count());
        self.replace_root(staging.into_root());
        Ok(())
    }
}
