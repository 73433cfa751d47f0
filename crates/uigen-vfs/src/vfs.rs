//! Virtual filesystem implementation.
//!
//! [`VirtualFileSystem`] owns an in-memory tree rooted at `/`. It is the only
//! mutator of that tree. Every successful mutation bumps a monotonic version
//! counter and fires the registered change listener with the new version.
//!
//! # Examples
//!
//! ```
//! use uigen_vfs::VirtualFileSystem;
//!
//! let mut fs = VirtualFileSystem::new();
//! fs.create_file("/components/Button.jsx", "export default () => null;")?;
//!
//! assert!(fs.exists("/components"));
//! assert_eq!(fs.read_file("/components/Button.jsx")?, "export default () => null;");
//! assert_eq!(fs.version(), 1);
//! # Ok::<(), uigen_vfs::VfsError>(())
//! ```

use crate::path::VfsPath;
use crate::types::{DirectoryNode, FileMap, FileSystemNode, Result, VfsError};
use std::fmt;

/// Callback invoked with the new version after every mutation.
pub type ChangeListener = Box<dyn Fn(u64) + Send + Sync>;

/// In-memory hierarchical filesystem with change notification.
///
/// Paths passed to any method are normalized through [`VfsPath`], so
/// `"App.jsx"`, `"/App.jsx"` and `"/src/../App.jsx"` address the same node.
pub struct VirtualFileSystem {
    root: FileSystemNode,
    version: u64,
    listener: Option<ChangeListener>,
}

impl VirtualFileSystem {
    /// Creates an empty filesystem containing only the root directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: FileSystemNode::directory(VfsPath::root()),
            version: 0,
            listener: None,
        }
    }

    /// Current version. Starts at zero and increases by one per mutation.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Registers the change listener, replacing any previous one.
    ///
    /// The listener runs synchronously inside the mutating call.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use uigen_vfs::VirtualFileSystem;
    ///
    /// let seen = Arc::new(AtomicU64::new(0));
    /// let sink = Arc::clone(&seen);
    ///
    /// let mut fs = VirtualFileSystem::new();
    /// fs.set_on_change(move |version| sink.store(version, Ordering::SeqCst));
    /// fs.create_file("/a.js", "")?;
    /// fs.create_file("/b.js", "")?;
    ///
    /// assert_eq!(seen.load(Ordering::SeqCst), 2);
    /// # Ok::<(), uigen_vfs::VfsError>(())
    /// ```
    pub fn set_on_change<F>(&mut self, listener: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Removes the change listener.
    pub fn clear_on_change(&mut self) {
        self.listener = None;
    }

    /// The root directory node.
    #[must_use]
    pub const fn root(&self) -> &FileSystemNode {
        &self.root
    }

    /// Returns `true` when the tree holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.as_directory().is_none_or(DirectoryNode::is_empty)
    }

    /// Returns `true` when anything besides the root exists.
    #[must_use]
    pub fn has_user_content(&self) -> bool {
        !self.is_empty()
    }

    /// Writes a file, creating any missing parent directories.
    ///
    /// An existing file at `path` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotADirectory` if an ancestor of `path` is a file,
    /// and `VfsError::NotAFile` if `path` itself is a directory (including
    /// the root). No change is made in either case.
    pub fn create_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = VfsPath::new(path);
        let (parent, name) = split(&path).ok_or_else(|| VfsError::NotAFile {
            path: path.to_string(),
        })?;

        if self.get_node(&path).is_some_and(FileSystemNode::is_directory) {
            return Err(VfsError::NotAFile {
                path: path.to_string(),
            });
        }

        let dir = self.ensure_directory(&parent)?;
        match dir.children.get_mut(name) {
            Some(FileSystemNode::File(file)) => file.set_content(content.into()),
            _ => {
                dir.children
                    .insert(name.to_string(), FileSystemNode::file(path.clone(), content));
            }
        }

        tracing::debug!("Wrote file: {}", path);
        self.touch();
        Ok(())
    }

    /// Creates a directory and all missing ancestors.
    ///
    /// Creating a directory that already exists is a no-op and does not bump
    /// the version.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotADirectory` if `path` or one of its ancestors is
    /// a file.
    pub fn create_directory(&mut self, path: impl AsRef<str>) -> Result<()> {
        let path = VfsPath::new(path);
        if self.get_node(&path).is_some_and(FileSystemNode::is_directory) {
            return Ok(());
        }
        self.ensure_directory(&path)?;
        tracing::debug!("Created directory: {}", path);
        self.touch();
        Ok(())
    }

    /// Removes a node and everything beneath it.
    ///
    /// Deleting `/` removes all children but keeps the root. Returns `false`
    /// when nothing exists at `path`.
    pub fn delete_node(&mut self, path: impl AsRef<str>) -> bool {
        let path = VfsPath::new(path);

        let removed = match split(&path) {
            None => {
                if let FileSystemNode::Directory(root) = &mut self.root {
                    root.children.clear();
                }
                true
            }
            Some((parent, name)) => self
                .find_directory_mut(&parent)
                .and_then(|dir| dir.children.remove(name))
                .is_some(),
        };

        if removed {
            tracing::debug!("Deleted: {}", path);
            self.touch();
        }
        removed
    }

    /// Moves the node at `from` (and its subtree) to `to`.
    ///
    /// Missing parents of `to` are created and an existing node at `to` is
    /// replaced. Moving a node onto its own path succeeds without any change.
    ///
    /// # Errors
    ///
    /// - `VfsError::NotFound` if nothing exists at `from`
    /// - `VfsError::RootOperation` if either side is `/`
    /// - `VfsError::InvalidMove` if `to` lies inside `from`
    /// - `VfsError::NotADirectory` if an ancestor of `to` is a file
    ///
    /// The tree is left untouched on every error.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::VirtualFileSystem;
    ///
    /// let mut fs = VirtualFileSystem::new();
    /// fs.create_file("/old/Button.jsx", "button")?;
    /// fs.rename_node("/old", "/components/ui")?;
    ///
    /// assert!(!fs.exists("/old"));
    /// assert_eq!(fs.read_file("/components/ui/Button.jsx")?, "button");
    /// let node = fs.get_node("/components/ui/Button.jsx").unwrap();
    /// assert_eq!(node.path().as_str(), "/components/ui/Button.jsx");
    /// # Ok::<(), uigen_vfs::VfsError>(())
    /// ```
    pub fn rename_node(&mut self, from: impl AsRef<str>, to: impl AsRef<str>) -> Result<()> {
        let from = VfsPath::new(from);
        let to = VfsPath::new(to);

        let (from_parent, from_name) =
            split(&from).ok_or(VfsError::RootOperation { operation: "rename" })?;
        if !self.exists(&from) {
            return Err(VfsError::NotFound {
                path: from.to_string(),
            });
        }
        if from == to {
            return Ok(());
        }
        let (to_parent, to_name) =
            split(&to).ok_or(VfsError::RootOperation { operation: "replace" })?;
        if to.starts_with(&from) {
            return Err(VfsError::InvalidMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.check_directory_path(&to_parent)?;

        let mut node = self
            .find_directory_mut(&from_parent)
            .and_then(|dir| dir.children.remove(from_name))
            .ok_or_else(|| VfsError::NotFound {
                path: from.to_string(),
            })?;
        node.rebase(to.clone());

        let dir = self.ensure_directory(&to_parent)?;
        dir.children.insert(to_name.to_string(), node);

        tracing::debug!("Renamed {} to {}", from, to);
        self.touch();
        Ok(())
    }

    /// Looks up a node by exact, case-sensitive path.
    #[must_use]
    pub fn get_node(&self, path: impl AsRef<str>) -> Option<&FileSystemNode> {
        let path = VfsPath::new(path);
        let mut current = &self.root;
        for segment in path.segments() {
            current = match current {
                FileSystemNode::Directory(dir) => dir.children.get(segment)?,
                FileSystemNode::File(_) => return None,
            };
        }
        Some(current)
    }

    /// Returns `true` if any node exists at `path`.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        self.get_node(path).is_some()
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if nothing exists at `path`, or
    /// `VfsError::NotAFile` if it is a directory.
    pub fn read_file(&self, path: impl AsRef<str>) -> Result<&str> {
        let path = VfsPath::new(path);
        match self.get_node(&path) {
            Some(FileSystemNode::File(file)) => Ok(file.content()),
            Some(FileSystemNode::Directory(_)) => Err(VfsError::NotAFile {
                path: path.to_string(),
            }),
            None => Err(VfsError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Borrows a directory node.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` if nothing exists at `path`, or
    /// `VfsError::NotADirectory` if it is a file.
    pub fn read_directory(&self, path: impl AsRef<str>) -> Result<&DirectoryNode> {
        let path = VfsPath::new(path);
        match self.get_node(&path) {
            Some(FileSystemNode::Directory(dir)) => Ok(dir),
            Some(FileSystemNode::File(_)) => Err(VfsError::NotADirectory {
                path: path.to_string(),
            }),
            None => Err(VfsError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Replaces the content of an existing file.
    ///
    /// # Errors
    ///
    /// Returns `VfsError::NotFound` or `VfsError::NotAFile` when `path` does
    /// not name an existing file.
    pub fn update_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = VfsPath::new(path);
        let (parent, name) = split(&path).ok_or_else(|| VfsError::NotAFile {
            path: path.to_string(),
        })?;

        match self
            .find_directory_mut(&parent)
            .and_then(|dir| dir.children.get_mut(name))
        {
            Some(FileSystemNode::File(file)) => file.set_content(content.into()),
            Some(FileSystemNode::Directory(_)) => {
                return Err(VfsError::NotAFile {
                    path: path.to_string(),
                });
            }
            None => {
                return Err(VfsError::NotFound {
                    path: path.to_string(),
                });
            }
        }

        tracing::debug!("Updated file: {}", path);
        self.touch();
        Ok(())
    }

    /// Flattens the tree into absolute path to content for every file.
    #[must_use]
    pub fn get_all_files(&self) -> FileMap {
        let mut files = FileMap::new();
        self.root.collect_files(&mut files);
        files
    }

    /// Number of files in the tree.
    #[must_use]
    pub fn file_count(&self) -> usize {
        let mut count = 0;
        self.root.walk(&mut |node| {
            if node.is_file() {
                count += 1;
            }
        });
        count
    }

    /// Removes every node except the root.
    pub fn clear(&mut self) {
        self.delete_node("/");
    }

    /// Swaps in a fully built tree and notifies once.
    pub(crate) fn replace_root(&mut self, root: FileSystemNode) {
        self.root = root;
        self.touch();
    }

    pub(crate) const fn from_root(root: FileSystemNode) -> Self {
        Self {
            root,
            version: 0,
            listener: None,
        }
    }

    pub(crate) fn into_root(self) -> FileSystemNode {
        self.root
    }

    fn touch(&mut self) {
        self.version += 1;
        if let Some(listener) = &self.listener {
            listener(self.version);
        }
    }

    fn find_directory_mut(&mut self, path: &VfsPath) -> Option<&mut DirectoryNode> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = match current {
                FileSystemNode::Directory(dir) => dir.children.get_mut(segment)?,
                FileSystemNode::File(_) => return None,
            };
        }
        match current {
            FileSystemNode::Directory(dir) => Some(dir),
            FileSystemNode::File(_) => None,
        }
    }

    /// Fails if materializing `path` as a directory would hit a file.
    fn check_directory_path(&self, path: &VfsPath) -> Result<()> {
        let mut current = &self.root;
        for segment in path.segments() {
            let FileSystemNode::Directory(dir) = current else {
                break;
            };
            match dir.children.get(segment) {
                Some(FileSystemNode::File(file)) => {
                    return Err(VfsError::NotADirectory {
                        path: file.path().to_string(),
                    });
                }
                Some(child) => current = child,
                None => return Ok(()),
            }
        }
        Ok(())
    }

    fn ensure_directory(&mut self, path: &VfsPath) -> Result<&mut DirectoryNode> {
        self.check_directory_path(path)?;

        let mut current = &mut self.root;
        let mut current_path = VfsPath::root();
        for segment in path.segments() {
            current_path = current_path.join_segment(segment);
            let FileSystemNode::Directory(dir) = current else {
                return Err(VfsError::NotADirectory {
                    path: current_path.to_string(),
                });
            };
            current = dir
                .children
                .entry(segment.to_string())
                .or_insert_with(|| FileSystemNode::directory(current_path.clone()));
        }

        match current {
            FileSystemNode::Directory(dir) => Ok(dir),
            FileSystemNode::File(file) => Err(VfsError::NotADirectory {
                path: file.path().to_string(),
            }),
        }
    }
}

fn split(path: &VfsPath) -> Option<(VfsPath, &str)> {
    Some((path.parent()?, path.file_name()?))
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualFileSystem")
            .field("version", &self.version)
            .field("files", &self.file_count())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_fs() -> (VirtualFileSystem, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut fs = VirtualFileSystem::new();
        fs.set_on_change(move |version| sink.lock().unwrap().push(version));
        (fs, seen)
    }

    #[test]
    fn test_new_is_empty() {
        let fs = VirtualFileSystem::new();
        assert!(fs.is_empty());
        assert!(fs.exists("/"));
        assert_eq!(fs.version(), 0);
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn test_create_file_makes_parents() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a/b/c.js", "c").unwrap();
        assert!(fs.get_node("/a").unwrap().is_directory());
        assert!(fs.get_node("/a/b").unwrap().is_directory());
        assert_eq!(fs.read_file("/a/b/c.js").unwrap(), "c");
        assert_eq!(fs.get_node("/a/b").unwrap().path().as_str(), "/a/b");
    }

    #[test]
    fn test_create_file_overwrites() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "one").unwrap();
        fs.create_file("/a.js", "two").unwrap();
        assert_eq!(fs.read_file("/a.js").unwrap(), "two");
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_create_file_through_file_fails_without_change() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "x").unwrap();
        let version = fs.version();

        let err = fs.create_file("/a.js/b.js", "y").unwrap_err();
        assert!(err.is_kind_mismatch());
        assert_eq!(fs.version(), version);
        assert_eq!(fs.read_file("/a.js").unwrap(), "x");
    }

    #[test]
    fn test_create_file_on_directory_fails() {
        let mut fs = VirtualFileSystem::new();
        fs.create_directory("/lib").unwrap();
        assert!(fs.create_file("/lib", "x").unwrap_err().is_kind_mismatch());
        assert!(fs.create_file("/", "x").unwrap_err().is_kind_mismatch());
    }

    #[test]
    fn test_create_directory_idempotent() {
        let mut fs = VirtualFileSystem::new();
        fs.create_directory("/a/b").unwrap();
        fs.create_file("/a/b/x.js", "x").unwrap();
        let version = fs.version();
        fs.create_directory("/a/b").unwrap();
        assert_eq!(fs.version(), version);
        assert!(fs.exists("/a/b/x.js"));
    }

    #[test]
    fn test_delete_directory_removes_descendants() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a/b/c.js", "").unwrap();
        fs.create_file("/a/d.js", "").unwrap();
        assert!(fs.delete_node("/a"));
        assert!(!fs.exists("/a/b/c.js"));
        assert!(!fs.exists("/a/d.js"));
        assert!(!fs.exists("/a"));
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let (mut fs, seen) = recording_fs();
        assert!(!fs.delete_node("/nope.js"));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_delete_root_clears() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "").unwrap();
        fs.create_file("/b/c.js", "").unwrap();
        assert!(fs.delete_node("/"));
        assert!(fs.is_empty());
        assert!(fs.exists("/"));
    }

    #[test]
    fn test_rename_file() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "content").unwrap();
        fs.rename_node("/a.js", "/lib/b.js").unwrap();
        assert!(!fs.exists("/a.js"));
        assert_eq!(fs.read_file("/lib/b.js").unwrap(), "content");
    }

    #[test]
    fn test_rename_cascades_paths() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/src/ui/Button.jsx", "b").unwrap();
        fs.create_file("/src/App.jsx", "a").unwrap();
        fs.rename_node("/src", "/app").unwrap();

        let files = fs.get_all_files();
        assert_eq!(files.keys().collect::<Vec<_>>(), ["/app/App.jsx", "/app/ui/Button.jsx"]);
        assert_eq!(
            fs.get_node("/app/ui").unwrap().path().as_str(),
            "/app/ui"
        );
    }

    #[test]
    fn test_rename_missing_source() {
        let mut fs = VirtualFileSystem::new();
        let err = fs.rename_node("/nope", "/x").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fs.version(), 0);
    }

    #[test]
    fn test_rename_same_path_is_noop() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "keep").unwrap();
        let version = fs.version();
        fs.rename_node("/a.js", "/a.js").unwrap();
        assert_eq!(fs.version(), version);
        assert_eq!(fs.read_file("/a.js").unwrap(), "keep");
    }

    #[test]
    fn test_rename_overwrites_destination() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "a").unwrap();
        fs.create_file("/b.js", "b").unwrap();
        fs.rename_node("/a.js", "/b.js").unwrap();
        assert_eq!(fs.read_file("/b.js").unwrap(), "a");
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_rename_into_own_subtree_rejected() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a/x.js", "").unwrap();
        let err = fs.rename_node("/a", "/a/b").unwrap_err();
        assert!(err.is_invalid_move());
        assert!(fs.exists("/a/x.js"));
    }

    #[test]
    fn test_rename_root_rejected() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "").unwrap();
        assert!(fs.rename_node("/", "/x").unwrap_err().is_root_operation());
        assert!(fs.rename_node("/a.js", "/").unwrap_err().is_root_operation());
        assert!(fs.exists("/a.js"));
    }

    #[test]
    fn test_rename_under_file_has_no_partial_effect() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/a.js", "a").unwrap();
        fs.create_file("/b.js", "b").unwrap();
        let err = fs.rename_node("/a.js", "/b.js/c/a.js").unwrap_err();
        assert!(err.is_kind_mismatch());
        assert_eq!(fs.read_file("/a.js").unwrap(), "a");
        assert!(!fs.exists("/b.js/c"));
    }

    #[test]
    fn test_read_directory_and_file_errors() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("/lib/a.js", "").unwrap();
        assert!(fs.read_file("/lib").unwrap_err().is_kind_mismatch());
        assert!(fs.read_directory("/lib/a.js").unwrap_err().is_kind_mismatch());
        assert!(fs.read_file("/missing").unwrap_err().is_not_found());
        assert_eq!(fs.read_directory("/lib").unwrap().children().len(), 1);
    }

    #[test]
    fn test_update_file() {
        let mut fs = VirtualFileSystem::new();
        assert!(fs.update_file("/a.js", "x").unwrap_err().is_not_found());
        fs.create_file("/a.js", "x").unwrap();
        fs.update_file("/a.js", "y").unwrap();
        assert_eq!(fs.read_file("/a.js").unwrap(), "y");
    }

    #[test]
    fn test_listener_sees_every_mutation() {
        let (mut fs, seen) = recording_fs();
        fs.create_file("/a.js", "").unwrap();
        fs.create_directory("/lib").unwrap();
        fs.rename_node("/a.js", "/lib/a.js").unwrap();
        fs.delete_node("/lib");
        assert_eq!(*seen.lock().unwrap(), [1, 2, 3, 4]);

        fs.clear_on_change();
        fs.create_file("/b.js", "").unwrap();
        assert_eq!(seen.lock().unwrap().len(), 4);
        assert_eq!(fs.version(), 5);
    }

    #[test]
    fn test_paths_are_normalized() {
        let mut fs = VirtualFileSystem::new();
        fs.create_file("src/./App.jsx", "x").unwrap();
        assert!(fs.exists("/src/App.jsx"));
        assert!(fs.exists("/lib/../src/App.jsx"));
        assert!(!fs.exists("/src/app.jsx"));
    }

    #[test]
    fn test_debug_output() {
        let fs = VirtualFileSystem::new();
        let debug = format!("{fs:?}");
        assert!(debug.contains("VirtualFileSystem"));
        assert!(debug.contains("version"));
    }

    #[test]
    fn test_vfs_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<VirtualFileSystem>();
        assert_sync::<VirtualFileSystem>();
    }
}
