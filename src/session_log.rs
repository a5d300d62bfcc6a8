// src/session_log.rs
// Per-session JSON array persistence for tool events

use crate::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for the post-tool event log inside a session directory.
pub const LOG_FILE_NAME: &str = "post_tool_use.json";

/// Append one event to a session's log, creating the directory and file as
/// needed. Returns the log path.
///
/// The log is a pretty-printed JSON array holding every event received for
/// the session, in arrival order. A corrupt or unparseable existing log is
/// replaced with a fresh array rather than failing the hook. Not safe under
/// concurrent writers to the same session; in practice each session is
/// written by a single hook invocation at a time.
pub fn append_event(session_dir: &Path, event: &Value) -> Result<PathBuf> {
    fs::create_dir_all(session_dir)?;
    let log_path = session_dir.join(LOG_FILE_NAME);

    let mut events: Vec<Value> = match fs::read_to_string(&log_path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Resetting corrupt session log {}: {}", log_path.display(), e);
            Vec::new()
        }),
        Err(_) => Vec::new(),
    };

    events.push(event.clone());
    fs::write(&log_path, serde_json::to_string_pretty(&events)?)?;

    Ok(log_path)
}
