//! Bundler-free live preview for React projects held in a virtual filesystem.
//!
//! The compiler turns a flat file map into one HTML document:
//!
//! 1. find the entry module ([`find_entry`])
//! 2. transform every `.js`/`.jsx`/`.ts`/`.tsx` file with oxc
//! 3. rewrite imports so local modules load through an import map of
//!    `data:` URLs and allow-listed libraries load from their CDN builds
//! 4. concatenate `.css` files and render the document template
//!
//! Per-file failures never abort a compile; they are listed in the
//! document and surfaced through [`PreviewOutcome::errors`].
//!
//! # Examples
//!
//! ```
//! use uigen_preview::{PreviewCompiler, PreviewConfig, PreviewState};
//! use uigen_vfs::FileMap;
//!
//! let compiler = PreviewCompiler::new(PreviewConfig::default())?;
//! let mut files = FileMap::new();
//! files.insert(
//!     "/App.jsx".to_string(),
//!     "import Missing from './Missing';\nexport default () => <Missing />;".to_string(),
//! );
//!
//! let outcome = compiler.compile(&files);
//! assert_eq!(outcome.state, PreviewState::Compiled);
//! assert_eq!(outcome.errors(), ["Cannot resolve import './Missing' in /App.jsx"]);
//! # Ok::<(), uigen_preview::PreviewError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod compiler;
pub mod config;
pub mod entry;
pub mod error;
pub mod imports;
pub mod live;
pub mod resolver;
pub mod template_engine;
pub mod transform;

pub use compiler::{PreviewArtifact, PreviewCompiler, PreviewOutcome};
pub use config::{PreviewConfig, REQUIRED_LIBRARIES};
pub use entry::{ENTRY_CANDIDATES, PreviewState, find_entry};
pub use error::{PreviewError, Result};
pub use live::{CachedPreview, LivePreview};
pub use resolver::{LOCAL_MODULE_PREFIX, ModuleResolver, Resolution, local_specifier};
pub use template_engine::TemplateEngine;
