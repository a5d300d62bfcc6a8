// src/hooks/post_tool.rs
// PostToolUse hook handler - logs the event and forwards a verdict

use crate::analytics::{self, ToolAnalytics};
use crate::analyzer::{self, ToolResult};
use crate::config::HookConfig;
use crate::hooks::{HookTimer, read_hook_input, safe_session_id, write_hook_output};
use crate::session_log;
use crate::utils::truncate;
use anyhow::{Context, Result};
use serde_json::Value;

/// PostToolUse hook input from Claude Code
#[derive(Debug)]
struct PostToolInput {
    session_id: String,
    tool_name: String,
    /// Raw tool result; `None` when the field is missing or JSON null.
    tool_result: Option<Value>,
    timestamp: Value,
}

impl PostToolInput {
    fn from_json(json: &Value) -> Self {
        Self {
            session_id: safe_session_id(
                json.get("session_id").and_then(|v| v.as_str()).unwrap_or(""),
            )
            .to_string(),
            tool_name: json
                .get("tool_name")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string(),
            tool_result: json.get("tool_result").filter(|v| !v.is_null()).cloned(),
            timestamp: json
                .get("timestamp")
                .cloned()
                .unwrap_or_else(|| Value::from(0)),
        }
    }
}

/// Run PostToolUse hook
///
/// Fires after each tool call. We:
/// 1. Append the raw event to the per-session log
/// 2. Classify the tool result (skipped when there is none)
/// 3. Forward the verdict to the analytics server, fire-and-forget
pub async fn run(config: &HookConfig) -> Result<()> {
    let _timer = HookTimer::start("PostToolUse");
    let input = read_hook_input().context("Failed to parse hook input from stdin")?;
    let post_input = PostToolInput::from_json(&input);

    tracing::debug!(
        "[pulse] PostToolUse hook triggered (tool: {})",
        post_input.tool_name
    );

    // Persist unconditionally; analytics failures below must not undo this
    let session_dir = config.session_dir(&post_input.session_id);
    if let Err(e) = session_log::append_event(&session_dir, &input) {
        tracing::warn!("Failed to persist tool event: {e}");
    }

    // No result, nothing to classify
    let Some(tool_result) = post_input.tool_result else {
        write_hook_output(&serde_json::json!({}));
        return Ok(());
    };

    let result = ToolResult::from_value(Some(&tool_result));
    let verdict = analyzer::analyze(&post_input.tool_name, &result);

    if !verdict.success {
        tracing::debug!(
            "[pulse] Tool '{}' failed: {}",
            post_input.tool_name,
            truncate(verdict.error_message.as_deref().unwrap_or("no message"), 300),
        );
    }

    let payload = ToolAnalytics {
        source_app: config.source_app.clone(),
        session_id: post_input.session_id,
        tool_name: post_input.tool_name,
        success: verdict.success,
        error_type: verdict.error_type,
        error_message: verdict.error_message,
        timestamp: post_input.timestamp,
    };
    analytics::send_tool_analytics(&config.server_url, &payload).await;

    write_hook_output(&serde_json::json!({}));
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
