//! Builder pattern for constructing virtual filesystems.
//!
//! Useful for seeding a project or a test fixture in one expression.
//!
//! # Examples
//!
//! ```
//! use uigen_vfs::VfsBuilder;
//!
//! let fs = VfsBuilder::new()
//!     .add_file("/App.jsx", "export default function App() { return null; }")
//!     .add_file("/components/Button.jsx", "export const Button = () => null;")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.file_count(), 2);
//! ```

use crate::types::{FileMap, Result, VfsError};
use crate::vfs::VirtualFileSystem;

/// Fluent builder for a [`VirtualFileSystem`].
///
/// Errors are collected and the first one is reported by [`build`].
/// The built filesystem starts at version zero with no listener.
///
/// [`build`]: VfsBuilder::build
#[derive(Debug, Default)]
pub struct VfsBuilder {
    fs: VirtualFileSystem,
    errors: Vec<VfsError>,
}

impl VfsBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the builder from a flat path-to-content map.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_vfs::{FileMap, VfsBuilder};
    ///
    /// let mut files = FileMap::new();
    /// files.insert("/App.jsx".to_string(), "app".to_string());
    ///
    /// let fs = VfsBuilder::from_files(&files).build().unwrap();
    /// assert_eq!(fs.get_all_files(), files);
    /// ```
    #[must_use]
    pub fn from_files(files: &FileMap) -> Self {
        files
            .iter()
            .fold(Self::new(), |builder, (path, content)| {
                builder.add_file(path, content.as_str())
            })
    }

    /// Adds a file, creating parent directories.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<str>, content: impl Into<String>) -> Self {
        if let Err(e) = self.fs.create_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds an empty directory.
    #[must_use]
    pub fn add_directory(mut self, path: impl AsRef<str>) -> Self {
        if let Err(e) = self.fs.create_directory(path) {
            self.errors.push(e);
        }
        self
    }

    /// Builds the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while adding nodes.
    pub fn build(self) -> Result<VirtualFileSystem> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        Ok(VirtualFileSystem::from_root(self.fs.into_root()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_empty() {
        let fs = VfsBuilder::new().build().unwrap();
        assert!(fs.is_empty());
        assert_eq!(fs.version(), 0);
    }

    #[test]
    fn test_builder_starts_at_version_zero() {
        let fs = VfsBuilder::new()
            .add_file("/a.js", "a")
            .add_directory("/empty")
            .build()
            .unwrap();
        assert_eq!(fs.version(), 0);
        assert!(fs.get_node("/empty").unwrap().is_directory());
        assert_eq!(fs.read_file("/a.js").unwrap(), "a");
    }

    #[test]
    fn test_builder_reports_first_error() {
        let result = VfsBuilder::new()
            .add_file("/a.js", "a")
            .add_file("/a.js/b.js", "b")
            .add_directory("/a.js")
            .build();
        assert!(result.unwrap_err().is_kind_mismatch());
    }
}
