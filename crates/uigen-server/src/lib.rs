//! Agent-facing surface for UIGen projects.
//!
//! An external agent drives one project through MCP tool calls. Every call
//! mutates the project's virtual filesystem, and the live preview is
//! recompiled and written to disk after each change.
//!
//! # Architecture
//!
//! - [`session::ProjectSession`]: the filesystem and its live preview
//! - [`service::UigenService`]: rmcp server exposing `str_replace_editor`,
//!   `file_manager` and `preview_status`
//! - [`writer`]: rewrites `preview.html` on every filesystem version
//! - [`replay`]: applies a JSON Lines transcript of tool calls
//! - [`config`]: TOML configuration
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//! use tokio::sync::Mutex;
//! use uigen_server::config::Config;
//! use uigen_server::service::UigenService;
//! use uigen_server::session::ProjectSession;
//! use uigen_server::writer::spawn_preview_writer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load(None)?;
//! let mut session = ProjectSession::new(config.preview)?;
//! let changes = session.subscribe();
//! let session = Arc::new(Mutex::new(session));
//!
//! let writer = spawn_preview_writer(Arc::clone(&session), changes, config.output.dir);
//! let service = UigenService::new(session).serve(stdio()).await?;
//! service.waiting().await?;
//! writer.abort();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod replay;
pub mod service;
pub mod session;
pub mod writer;

pub use config::Config;
pub use replay::{ReplayReport, replay};
pub use service::UigenService;
pub use session::{PreviewStatus, ProjectSession};
pub use writer::{spawn_preview_writer, write_preview};
