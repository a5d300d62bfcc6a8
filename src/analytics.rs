// src/analytics.rs
// Fire-and-forget delivery of tool verdicts to the observability server

use crate::analyzer::ErrorType;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Request timeout for analytics delivery. The hook must never hold up the
/// host operation, so this stays short and failures are swallowed.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = "Claude-Code-Hook/1.0";

/// Analytics payload sent per classified tool event.
#[derive(Debug, Clone, Serialize)]
pub struct ToolAnalytics {
    pub source_app: String,
    pub session_id: String,
    pub tool_name: String,
    pub success: bool,
    pub error_type: Option<ErrorType>,
    pub error_message: Option<String>,
    /// Passed through from the hook input verbatim; 0 when absent.
    pub timestamp: Value,
}

/// POST an analytics payload to the observability server.
///
/// Returns whether the server acknowledged delivery (status 200 or 201).
/// Every failure mode (connect error, timeout, non-2xx) comes back as
/// `false` and is logged at debug level only; analytics must never block
/// hook execution.
pub async fn send_tool_analytics(server_url: &str, payload: &ToolAnalytics) -> bool {
    let client = match reqwest::Client::builder()
        .timeout(SEND_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!("Failed to build analytics client: {e}");
            return false;
        }
    };

    match client.post(server_url).json(payload).send().await {
        Ok(response) => {
            let status = response.status();
            let delivered =
                status == reqwest::StatusCode::OK || status == reqwest::StatusCode::CREATED;
            if !delivered {
                tracing::debug!("Analytics server returned {status}");
            }
            delivered
        }
        Err(e) => {
            tracing::debug!("Analytics delivery failed: {e}");
            false
        }
    }
}
