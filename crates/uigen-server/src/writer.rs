//! Writes the rendered preview to disk whenever the project changes.
//!
//! The written file stands in for the browser frame that would host the
//! preview: open it in a browser to see the current state of the project.

use crate::config::PREVIEW_FILE_NAME;
use crate::session::ProjectSession;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

/// Writes `html` to `<dir>/preview.html`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub async fn write_preview(dir: &Path, html: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let path = dir.join(PREVIEW_FILE_NAME);
    tokio::fs::write(&path, html)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Spawns a task that rewrites the preview for every version seen on
/// `changes`.
///
/// The current preview is written immediately. Versions that arrive while a
/// write is in progress collapse into one rewrite. The task ends when the
/// sending side is dropped; write failures are logged and do not stop it.
pub fn spawn_preview_writer(
    session: Arc<Mutex<ProjectSession>>,
    mut changes: watch::Receiver<u64>,
    dir: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let (version, html) = {
                let mut session = session.lock().await;
                let preview = session.preview();
                (preview.version, preview.html.clone())
            };

            match write_preview(&dir, &html).await {
                Ok(path) => tracing::debug!("Wrote preview v{} to {}", version, path.display()),
                Err(e) => tracing::warn!("Preview write failed: {e:#}"),
            }

            if changes.changed().await.is_err() {
                tracing::debug!("Change channel closed, stopping preview writer");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_preview_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("nested");

        let path = write_preview(&nested, "<html></html>").await.unwrap();
        assert_eq!(path, nested.join("preview.html"));
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            "<html></html>"
        );
    }

    #[tokio::test]
    async fn test_write_preview_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_preview(dir.path(), "first").await.unwrap();
        let path = write_preview(dir.path(), "second").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "second");
    }
}
