//! Version-keyed preview cache.

use crate::compiler::{PreviewCompiler, PreviewOutcome};
use crate::error::PreviewError;
use uigen_vfs::VirtualFileSystem;

/// The preview built for one filesystem version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPreview {
    /// Filesystem version the preview was compiled from
    pub version: u64,
    /// Compile result
    pub outcome: PreviewOutcome,
    /// Rendered document
    pub html: String,
}

/// Keeps the preview in step with a [`VirtualFileSystem`].
///
/// Only the latest version is kept. A refresh at an unchanged version
/// returns the cached preview; any other version recompiles from scratch.
///
/// # Examples
///
/// ```
/// use uigen_preview::{LivePreview, PreviewCompiler, PreviewConfig, PreviewState};
/// use uigen_vfs::VirtualFileSystem;
///
/// let mut live = LivePreview::new(PreviewCompiler::new(PreviewConfig::default())?);
/// let mut fs = VirtualFileSystem::new();
///
/// assert_eq!(live.refresh(&fs).outcome.state, PreviewState::Welcome);
///
/// fs.create_file("/App.jsx", "export default () => <p>Hi</p>;").unwrap();
/// let preview = live.refresh(&fs);
/// assert_eq!(preview.outcome.state, PreviewState::Compiled);
/// assert_eq!(preview.version, fs.version());
/// # Ok::<(), uigen_preview::PreviewError>(())
/// ```
#[derive(Debug)]
pub struct LivePreview {
    compiler: PreviewCompiler,
    cached: Option<CachedPreview>,
}

impl LivePreview {
    /// Creates an empty cache around `compiler`.
    #[must_use]
    pub const fn new(compiler: PreviewCompiler) -> Self {
        Self {
            compiler,
            cached: None,
        }
    }

    /// The compiler in use.
    #[must_use]
    pub const fn compiler(&self) -> &PreviewCompiler {
        &self.compiler
    }

    /// Last preview built, if any.
    #[must_use]
    pub const fn cached(&self) -> Option<&CachedPreview> {
        self.cached.as_ref()
    }

    /// Returns the preview for the current state of `fs`, recompiling if the
    /// version changed since the last call.
    pub fn refresh(&mut self, fs: &VirtualFileSystem) -> &CachedPreview {
        let version = fs.version();
        let cached = match self.cached.take() {
            Some(cached) if cached.version == version => cached,
            _ => self.build(fs, version),
        };
        self.cached.insert(cached)
    }

    fn build(&self, fs: &VirtualFileSystem, version: u64) -> CachedPreview {
        let outcome = self.compiler.compile(&fs.get_all_files());
        let html = self.compiler.render(&outcome).unwrap_or_else(|error| {
            tracing::warn!("Preview rendering failed at version {}: {}", version, error);
            fallback_document(&error)
        });
        tracing::debug!("Preview refreshed: version {}, state {}", version, outcome.state);

        CachedPreview {
            version,
            outcome,
            html,
        }
    }
}

fn fallback_document(error: &PreviewError) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\" /><title>Preview Error</title></head>\n<body><pre>{}</pre></body>\n</html>\n",
        handlebars::html_escape(&error.to_string())
    )
}
