// src/lib.rs
// Pulse - Tool observability hooks for Claude Code

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod analytics;
pub mod analyzer;
pub mod config;
pub mod cost;
pub mod error;
pub mod hooks;
pub mod session_log;
pub mod utils;

pub use error::{PulseError, Result};
