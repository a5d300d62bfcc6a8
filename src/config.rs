// src/config.rs
// Environment-based configuration - single source of truth for all env vars

use std::path::PathBuf;
use tracing::debug;

/// Default analytics endpoint (local observability server).
const DEFAULT_SERVER_URL: &str = "http://localhost:4000/api/analytics/tools";

/// Source app tag when none is configured.
const DEFAULT_SOURCE_APP: &str = "unknown";

/// Hook configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct HookConfig {
    /// Analytics endpoint (PULSE_SERVER_URL)
    pub server_url: String,
    /// Application tag attached to analytics events (SOURCE_APP)
    pub source_app: String,
    /// Base directory for per-session logs (PULSE_SESSIONS_DIR)
    pub sessions_dir: PathBuf,
}

impl HookConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or empty.
    pub fn from_env() -> Self {
        let server_url =
            read_var("PULSE_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let source_app =
            read_var("SOURCE_APP").unwrap_or_else(|| DEFAULT_SOURCE_APP.to_string());
        let sessions_dir = read_var("PULSE_SESSIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_sessions_dir);

        let config = Self {
            server_url,
            source_app,
            sessions_dir,
        };
        debug!(
            server_url = %config.server_url,
            source_app = %config.source_app,
            sessions_dir = %config.sessions_dir.display(),
            "Hook configuration loaded"
        );
        config
    }

    /// Directory holding the log files for one session.
    pub fn session_dir(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(session_id)
    }
}

/// Read a single environment variable, filtering empty values.
fn read_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Default sessions directory (~/.pulse/sessions).
fn default_sessions_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| {
        tracing::warn!(
            "HOME directory not set - using current directory for Pulse session logs"
        );
        PathBuf::from(".")
    });
    home.join(".pulse/sessions")
}
