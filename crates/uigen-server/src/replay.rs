//! Transcript replay.
//!
//! A transcript is JSON Lines, one tool call per line:
//!
//! ```text
//! {"tool": "str_replace_editor", "input": {"command": "create", "path": "/App.jsx", "file_text": "..."}}
//! {"tool": "file_manager", "input": {"command": "rename", "path": "/App.jsx", "new_path": "/src/App.jsx"}}
//! ```
//!
//! Blank lines are skipped. Calls are applied in order; a line that cannot
//! be parsed or routed is reported and the replay continues.

use crate::session::ProjectSession;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use uigen_tools::describe_tool_call;

/// One recorded tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Tool name
    pub tool: String,
    /// Tool arguments
    #[serde(default)]
    pub input: Value,
}

/// A transcript line that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFailure {
    /// 1-based line number
    pub line: usize,
    /// What went wrong
    pub message: String,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Calls that reached a tool
    pub applied: usize,
    /// Calls whose tool reported a failure
    pub tool_errors: usize,
    /// Lines that could not be parsed or routed
    pub failures: Vec<ReplayFailure>,
}

impl ReplayReport {
    /// Returns `true` if every line was parsed and routed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies every call in `transcript` to `session`, writing one block per
/// call to `out`.
///
/// Tool failures are part of the normal output; only parse and routing
/// failures are collected in [`ReplayReport::failures`].
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
///
/// # Examples
///
/// ```
/// use uigen_preview::PreviewConfig;
/// use uigen_server::replay::replay;
/// use uigen_server::session::ProjectSession;
///
/// let mut session = ProjectSession::new(PreviewConfig::default())?;
/// let transcript = r#"{"tool": "str_replace_editor", "input": {"command": "create", "path": "/App.jsx", "file_text": "x"}}"#;
///
/// let mut out = Vec::new();
/// let report = replay(&mut session, transcript, &mut out)?;
///
/// assert!(report.is_clean());
/// assert_eq!(report.applied, 1);
/// assert!(String::from_utf8(out)?.contains("File created: /App.jsx"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn replay(
    session: &mut ProjectSession,
    transcript: &str,
    out: &mut impl Write,
) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, line) in transcript.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let entry: TranscriptEntry = match serde_json::from_str(line) {
            Ok(entry) => entry,
            Err(e) => {
                let message = format!("invalid transcript entry: {e}");
                writeln!(out, "[{line_number}] {message}")?;
                tracing::warn!("Line {}: {}", line_number, message);
                report.failures.push(ReplayFailure {
                    line: line_number,
                    message,
                });
                continue;
            }
        };

        let label = describe_tool_call(&entry.tool, &entry.input);
        match session.execute(&entry.tool, entry.input) {
            Ok(output) => {
                report.applied += 1;
                if output.is_error() {
                    report.tool_errors += 1;
                }
                writeln!(out, "[{line_number}] {label}\n{}", output.text())?;
            }
            Err(e) => {
                let message = e.to_string();
                writeln!(out, "[{line_number}] {label}\n{message}")?;
                tracing::warn!("Line {}: {}", line_number, message);
                report.failures.push(ReplayFailure {
                    line: line_number,
                    message,
                });
            }
        }
    }

    Ok(report)
}
