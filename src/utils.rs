//! src/utils.rs
//! Shared utility functions used across the codebase

/// Truncate a string to max length with ellipsis.
///
/// If the string is longer than `max_len` characters, it will be truncated
/// and "..." will be appended. Counts characters, not bytes, so multibyte
/// tool output never splits a code point.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len).collect();
        format!("{}...", head)
    }
}

/// Truncate a string to an exact character count, no ellipsis.
///
/// Used where the output length is part of a wire contract (error messages
/// in analytics payloads are capped at 500 characters exactly).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
