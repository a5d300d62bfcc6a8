// src/hooks/mod.rs
// Claude Code hook handlers

pub mod post_tool;

use anyhow::Result;
use std::io::Read;
use std::time::Instant;

/// Claude Code hook payloads are small; never read unbounded input.
const MAX_INPUT_BYTES: u64 = 1_048_576;

/// Performance threshold in milliseconds - warn if hook exceeds this.
const HOOK_PERF_THRESHOLD_MS: u128 = 100;

/// Session id used when the input omits one or carries unsafe characters.
pub const UNKNOWN_SESSION: &str = "unknown";

/// Read hook input from stdin (Claude Code passes JSON)
pub fn read_hook_input() -> Result<serde_json::Value> {
    let mut input = String::new();
    std::io::stdin()
        .take(MAX_INPUT_BYTES)
        .read_to_string(&mut input)?;
    let json: serde_json::Value = serde_json::from_str(&input)?;
    Ok(json)
}

/// Write hook output to stdout
pub fn write_hook_output(output: &serde_json::Value) {
    use std::io::Write;
    match serde_json::to_string(output) {
        Ok(s) => {
            let _ = writeln!(std::io::stdout(), "{}", s);
        }
        Err(e) => {
            eprintln!("Failed to serialize hook output: {}", e);
            let _ = writeln!(std::io::stdout(), "{{}}");
        }
    }
}

/// Session ids become directory names under the sessions dir; anything that
/// could escape it falls back to the shared unknown bucket.
pub fn safe_session_id(session_id: &str) -> &str {
    if !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        session_id
    } else {
        UNKNOWN_SESSION
    }
}

/// Timer guard for hook performance monitoring
/// Logs execution time to stderr on drop
pub struct HookTimer {
    hook_name: &'static str,
    start: Instant,
}

impl HookTimer {
    /// Start timing a hook
    pub fn start(hook_name: &'static str) -> Self {
        Self {
            hook_name,
            start: Instant::now(),
        }
    }
}

impl Drop for HookTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_millis();
        if elapsed > HOOK_PERF_THRESHOLD_MS {
            tracing::warn!(
                "[pulse] PERF: {} hook took {}ms (threshold: {}ms)",
                self.hook_name,
                elapsed,
                HOOK_PERF_THRESHOLD_MS
            );
        } else {
            tracing::debug!("[pulse] {} hook completed in {}ms", self.hook_name, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_session_id_accepts_typical_ids() {
        assert_eq!(safe_session_id("abc-123"), "abc-123");
        assert_eq!(safe_session_id("ABC_def-456"), "ABC_def-456");
    }

    #[test]
    fn safe_session_id_rejects_path_escapes() {
        assert_eq!(safe_session_id("../../etc"), UNKNOWN_SESSION);
        assert_eq!(safe_session_id("a/b"), UNKNOWN_SESSION);
        assert_eq!(safe_session_id(""), UNKNOWN_SESSION);
        assert_eq!(safe_session_id("with space"), UNKNOWN_SESSION);
    }
}
