//! In-memory virtual filesystem for generated UI projects.
//!
//! Provides a hierarchical tree of files and directories addressed by
//! normalized absolute paths, with a version counter and a change listener
//! so a preview can be recomputed whenever the project changes.
//!
//! # Examples
//!
//! ```
//! use uigen_vfs::{VfsBuilder, VirtualFileSystem};
//!
//! let mut fs: VirtualFileSystem = VfsBuilder::new()
//!     .add_file("/App.jsx", "export default function App() {}")
//!     .build()?;
//!
//! fs.rename_node("/App.jsx", "/src/App.jsx")?;
//! assert!(fs.exists("/src/App.jsx"));
//! assert_eq!(fs.get_all_files().len(), 1);
//! # Ok::<(), uigen_vfs::VfsError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod path;
pub mod snapshot;
pub mod types;
pub mod vfs;

pub use builder::VfsBuilder;
pub use path::{DEFAULT_ALIAS_PREFIX, INFERRED_EXTENSIONS, PathResolver, VfsPath, infer_extension};
pub use snapshot::{SerializedNode, Snapshot};
pub use types::{DirectoryNode, FileMap, FileNode, FileSystemNode, NodeKind, Result, VfsError};
pub use vfs::{ChangeListener, VirtualFileSystem};
