// src/analyzer.rs
// Heuristic classification of tool-execution outcomes
//
// Tool results arrive with no schema: some tools return plain text, some
// return mappings with ad-hoc field names, some return nothing. The
// heuristics here decide success/failure and assign an error category from
// whatever evidence the result carries. Absence of evidence of failure is
// treated as success.

use crate::utils::truncate_chars;
use serde::Serialize;
use serde_json::{Map, Value};

/// Error messages forwarded to analytics are capped at this many characters.
const MAX_ERROR_MESSAGE_CHARS: usize = 500;

/// Substrings that mark a plain-string result as a failure.
const FAILURE_INDICATORS: [&str; 4] = ["error", "failed", "exception", "traceback"];

/// Substrings that qualify text as an extractable error message. Narrower
/// than FAILURE_INDICATORS: a bare traceback marker fails the success check
/// but is not itself forwarded as a message.
const MESSAGE_INDICATORS: [&str; 3] = ["error", "failed", "exception"];

/// Fields checked, in order, when extracting an error message from a mapping.
const MESSAGE_FIELDS: [&str; 4] = ["error", "error_message", "stderr", "message"];

/// A tool result reduced to the shapes the heuristics care about.
///
/// Resolved once at entry so the checks below never re-type-check the raw
/// JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Absent,
    Text(String),
    Structured(Map<String, Value>),
}

impl ToolResult {
    /// Resolve a raw JSON value (possibly missing) into a tagged variant.
    ///
    /// A missing field and JSON `null` both resolve to `Absent`. Numbers,
    /// booleans, and arrays carry no error evidence and resolve to empty
    /// text, which the checks below treat as success with no message.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ToolResult::Absent,
            Some(Value::String(s)) => ToolResult::Text(s.clone()),
            Some(Value::Object(map)) => ToolResult::Structured(map.clone()),
            Some(_) => ToolResult::Text(String::new()),
        }
    }
}

/// Error category derived from message keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    PermissionError,
    NotFoundError,
    TimeoutError,
    SyntaxError,
    NetworkError,
    CommandNotFound,
    MemoryError,
    DiskError,
    InvalidArgument,
    UnknownError,
}

/// Keyword table checked in order; the first matching category wins.
/// Messages routinely match several categories ("network timeout"), so the
/// ordering is load-bearing.
const ERROR_CATEGORIES: [(ErrorType, &[&str]); 9] = [
    (
        ErrorType::PermissionError,
        &["permission denied", "access denied", "forbidden", "eacces"],
    ),
    (
        ErrorType::NotFoundError,
        &["not found", "no such file", "enoent", "does not exist"],
    ),
    (ErrorType::TimeoutError, &["timeout", "timed out", "time limit"]),
    (
        ErrorType::SyntaxError,
        &["syntax error", "syntaxerror", "invalid syntax"],
    ),
    (
        ErrorType::NetworkError,
        &["connection refused", "network", "unreachable", "connection reset"],
    ),
    (ErrorType::CommandNotFound, &["command not found", "not recognized"]),
    (
        ErrorType::MemoryError,
        &["out of memory", "memory error", "cannot allocate"],
    ),
    (
        ErrorType::DiskError,
        &["no space left", "disk full", "quota exceeded"],
    ),
    (
        ErrorType::InvalidArgument,
        &["invalid argument", "bad argument", "illegal option"],
    ),
];

/// The outcome judgment for one tool event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub success: bool,
    pub error_type: Option<ErrorType>,
    pub error_message: Option<String>,
}

/// Classify a raw tool result.
///
/// Pure and total: malformed shapes degrade to the optimistic default
/// rather than erroring, and the message falls back to `unknown_error`
/// when nothing extractable explains the failure.
pub fn analyze(_tool_name: &str, tool_result: &ToolResult) -> Verdict {
    if is_success(tool_result) {
        return Verdict {
            success: true,
            error_type: None,
            error_message: None,
        };
    }

    let error_message = extract_error_message(tool_result);
    let error_type = classify_error(error_message.as_deref());

    Verdict {
        success: false,
        error_type: Some(error_type),
        error_message,
    }
}

/// Decide whether a tool execution succeeded.
///
/// Precedence for mappings: an explicit `success` field is authoritative,
/// then non-empty `error`/`error_message` fields, then `exit_code`/`code`.
/// Plain strings fail on error-indicator substrings. Everything else is
/// optimistically a success.
pub fn is_success(result: &ToolResult) -> bool {
    match result {
        ToolResult::Absent => false,
        ToolResult::Structured(map) => {
            if let Some(value) = map.get("success") {
                return is_truthy(value);
            }
            if map.get("error").is_some_and(is_truthy) {
                return false;
            }
            if map.get("error_message").is_some_and(is_truthy) {
                return false;
            }
            if let Some(code) = map.get("exit_code") {
                return is_zero(code);
            }
            if let Some(code) = map.get("code") {
                return is_zero(code);
            }
            true
        }
        ToolResult::Text(text) => {
            let lower = text.to_lowercase();
            !FAILURE_INDICATORS.iter().any(|w| lower.contains(w))
        }
    }
}

/// Extract a human-readable error message from a failed result.
///
/// Mappings are scanned over known message fields in fixed order, falling
/// back to an `output` field when it looks like an error. Plain text is
/// returned only when it contains an error indicator. Always capped at 500
/// characters.
pub fn extract_error_message(result: &ToolResult) -> Option<String> {
    match result {
        ToolResult::Absent => None,
        ToolResult::Text(text) => {
            let lower = text.to_lowercase();
            if MESSAGE_INDICATORS.iter().any(|w| lower.contains(w)) {
                Some(truncate_chars(text, MAX_ERROR_MESSAGE_CHARS))
            } else {
                None
            }
        }
        ToolResult::Structured(map) => {
            for field in MESSAGE_FIELDS {
                if let Some(value) = map.get(field)
                    && is_truthy(value)
                {
                    return Some(truncate_chars(&render(value), MAX_ERROR_MESSAGE_CHARS));
                }
            }

            // No dedicated message field; the combined output stream may
            // still contain the error text
            if let Some(output) = map.get("output") {
                let text = render(output);
                let lower = text.to_lowercase();
                if MESSAGE_INDICATORS.iter().any(|w| lower.contains(w)) {
                    return Some(truncate_chars(&text, MAX_ERROR_MESSAGE_CHARS));
                }
            }

            None
        }
    }
}

/// Classify an error message into a category. `None` and empty messages are
/// `unknown_error`.
pub fn classify_error(message: Option<&str>) -> ErrorType {
    let Some(message) = message else {
        return ErrorType::UnknownError;
    };
    if message.is_empty() {
        return ErrorType::UnknownError;
    }

    let lower = message.to_lowercase();
    for (error_type, keywords) in ERROR_CATEGORIES {
        if keywords.iter().any(|w| lower.contains(w)) {
            return error_type;
        }
    }

    ErrorType::UnknownError
}

/// JSON truthiness, mirroring how loosely typed tool results use their
/// fields: empty strings, zero, null, and empty containers are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Exit codes count as success only when numerically zero. Non-numeric
/// codes never equal zero.
fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Render a field value as message text: strings as-is, anything else as
/// compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_of(value: Value) -> ToolResult {
        ToolResult::from_value(Some(&value))
    }

    #[test]
    fn absent_result_is_failure() {
        let verdict = analyze("Bash", &ToolResult::Absent);
        assert!(!verdict.success);
        assert_eq!(verdict.error_type, Some(ErrorType::UnknownError));
        assert_eq!(verdict.error_message, None);
    }

    #[test]
    fn null_resolves_to_absent() {
        assert_eq!(ToolResult::from_value(Some(&Value::Null)), ToolResult::Absent);
        assert_eq!(ToolResult::from_value(None), ToolResult::Absent);
    }

    #[test]
    fn explicit_success_field_is_authoritative() {
        // Even alongside error fields that would otherwise fail it
        let verdict = analyze(
            "Bash",
            &result_of(json!({"success": true, "error": "Connection refused", "exit_code": 1})),
        );
        assert!(verdict.success);
        assert_eq!(verdict.error_type, None);
        assert_eq!(verdict.error_message, None);
    }

    #[test]
    fn success_field_is_coerced_by_truthiness() {
        assert!(analyze("t", &result_of(json!({"success": 1}))).success);
        assert!(analyze("t", &result_of(json!({"success": "yes"}))).success);
        assert!(!analyze("t", &result_of(json!({"success": false}))).success);
        assert!(!analyze("t", &result_of(json!({"success": 0}))).success);
        assert!(!analyze("t", &result_of(json!({"success": ""}))).success);
        assert!(!analyze("t", &result_of(json!({"success": null}))).success);
    }

    #[test]
    fn error_field_fails_and_classifies() {
        let verdict = analyze("Bash", &result_of(json!({"error": "Connection refused by host"})));
        assert!(!verdict.success);
        assert_eq!(verdict.error_type, Some(ErrorType::NetworkError));
        assert_eq!(verdict.error_message.as_deref(), Some("Connection refused by host"));
    }

    #[test]
    fn empty_error_field_is_ignored() {
        assert!(analyze("t", &result_of(json!({"error": ""}))).success);
        assert!(analyze("t", &result_of(json!({"error": null}))).success);
    }

    #[test]
    fn error_message_field_fails() {
        let verdict = analyze("t", &result_of(json!({"error_message": "File does not exist"})));
        assert!(!verdict.success);
        assert_eq!(verdict.error_type, Some(ErrorType::NotFoundError));
    }

    #[test]
    fn exit_code_zero_is_success() {
        assert!(analyze("Bash", &result_of(json!({"exit_code": 0}))).success);
        assert!(analyze("Bash", &result_of(json!({"code": 0}))).success);
    }

    #[test]
    fn exit_code_nonzero_is_failure() {
        let verdict = analyze("Bash", &result_of(json!({"exit_code": 1})));
        assert!(!verdict.success);
        // No message anywhere in the mapping
        assert_eq!(verdict.error_type, Some(ErrorType::UnknownError));
        assert_eq!(verdict.error_message, None);
    }

    #[test]
    fn exit_code_failure_takes_message_from_stderr() {
        let verdict = analyze(
            "Bash",
            &result_of(json!({"exit_code": 1, "stderr": "bash: permission denied"})),
        );
        assert!(!verdict.success);
        assert_eq!(verdict.error_type, Some(ErrorType::PermissionError));
        assert_eq!(verdict.error_message.as_deref(), Some("bash: permission denied"));
    }

    #[test]
    fn non_numeric_exit_code_is_failure() {
        assert!(!analyze("Bash", &result_of(json!({"exit_code": "0"}))).success);
    }

    #[test]
    fn string_with_indicator_is_failure() {
        for text in [
            "Permission denied: cannot write",
            "PERMISSION DENIED: CANNOT WRITE",
            "command failed with error",
            "Traceback (most recent call last):",
        ] {
            assert!(!analyze("t", &result_of(json!(text))).success, "{text}");
        }
    }

    #[test]
    fn permission_denied_string_classifies() {
        let verdict = analyze("Write", &result_of(json!("Permission denied: cannot write")));
        assert!(!verdict.success);
        assert_eq!(verdict.error_type, Some(ErrorType::PermissionError));
        assert_eq!(
            verdict.error_message.as_deref(),
            Some("Permission denied: cannot write")
        );
    }

    #[test]
    fn clean_string_is_success() {
        for text in ["all good", "wrote 3 files", ""] {
            let verdict = analyze("t", &result_of(json!(text)));
            assert!(verdict.success, "{text:?}");
            assert_eq!(verdict.error_message, None);
        }
    }

    #[test]
    fn traceback_fails_but_extracts_no_message() {
        // "traceback" marks a failure but is not a message indicator
        let verdict = analyze("t", &result_of(json!("Traceback (most recent call last)")));
        assert!(!verdict.success);
        assert_eq!(verdict.error_message, None);
        assert_eq!(verdict.error_type, Some(ErrorType::UnknownError));
    }

    #[test]
    fn empty_mapping_is_success() {
        let verdict = analyze("t", &result_of(json!({})));
        assert!(verdict.success);
    }

    #[test]
    fn scalar_results_are_success() {
        assert!(analyze("t", &result_of(json!(42))).success);
        assert!(analyze("t", &result_of(json!(true))).success);
        assert!(analyze("t", &result_of(json!(["error in item"]))).success);
    }

    #[test]
    fn message_fields_respected_in_order() {
        let verdict = analyze(
            "t",
            &result_of(json!({
                "success": false,
                "stderr": "from stderr",
                "error": "error wins",
                "message": "from message"
            })),
        );
        assert_eq!(verdict.error_message.as_deref(), Some("error wins"));
    }

    #[test]
    fn output_field_is_message_fallback() {
        let verdict = analyze(
            "Bash",
            &result_of(json!({"exit_code": 2, "output": "make: *** error 2"})),
        );
        assert_eq!(verdict.error_message.as_deref(), Some("make: *** error 2"));
    }

    #[test]
    fn output_without_indicators_yields_no_message() {
        let verdict = analyze("Bash", &result_of(json!({"exit_code": 2, "output": "done"})));
        assert!(!verdict.success);
        assert_eq!(verdict.error_message, None);
        assert_eq!(verdict.error_type, Some(ErrorType::UnknownError));
    }

    #[test]
    fn non_string_message_fields_render_as_json() {
        let verdict = analyze("t", &result_of(json!({"error": {"kind": "timeout"}})));
        assert!(!verdict.success);
        assert_eq!(verdict.error_message.as_deref(), Some(r#"{"kind":"timeout"}"#));
        assert_eq!(verdict.error_type, Some(ErrorType::TimeoutError));
    }

    #[test]
    fn long_messages_truncate_to_exactly_500_chars() {
        let long = format!("error: {}", "x".repeat(600));
        let verdict = analyze("t", &result_of(json!(long)));
        let message = verdict.error_message.unwrap();
        assert_eq!(message.chars().count(), 500);

        let verdict = analyze("t", &result_of(json!({"error": format!("e{}", "y".repeat(600))})));
        assert_eq!(verdict.error_message.unwrap().chars().count(), 500);
    }

    #[test]
    fn classify_matches_every_category() {
        let cases = [
            ("EACCES: access denied", ErrorType::PermissionError),
            ("No such file or directory", ErrorType::NotFoundError),
            ("operation timed out after 30s", ErrorType::TimeoutError),
            ("SyntaxError: invalid syntax", ErrorType::SyntaxError),
            ("host unreachable", ErrorType::NetworkError),
            ("'foo' is not recognized as a command", ErrorType::CommandNotFound),
            ("cannot allocate 4GB", ErrorType::MemoryError),
            ("no space left on device", ErrorType::DiskError),
            ("illegal option -- z", ErrorType::InvalidArgument),
            ("something odd happened", ErrorType::UnknownError),
        ];
        for (message, expected) in cases {
            assert_eq!(classify_error(Some(message)), expected, "{message}");
        }
    }

    #[test]
    fn classify_order_first_match_wins() {
        // Matches both not_found_error ("not found") and command_not_found;
        // the earlier category wins
        assert_eq!(
            classify_error(Some("bash: foo: command not found")),
            ErrorType::NotFoundError
        );
        // Matches timeout and network; timeout is declared first
        assert_eq!(
            classify_error(Some("network timeout reached")),
            ErrorType::TimeoutError
        );
    }

    #[test]
    fn classify_handles_absent_and_empty() {
        assert_eq!(classify_error(None), ErrorType::UnknownError);
        assert_eq!(classify_error(Some("")), ErrorType::UnknownError);
    }

    #[test]
    fn error_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ErrorType::PermissionError).unwrap(),
            "\"permission_error\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorType::CommandNotFound).unwrap(),
            "\"command_not_found\""
        );
    }
}
