//! Centralized helpers for WebSocket and HTTP error responses.
//!
//! Use these helpers so that every error message has the same shape: a code, a message and an optional context.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::{json, Value};

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_DIRECTION").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. session_id, offending input).
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    json!({
        "action": "Error",
        "data": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(Value::Null),
        }
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context value.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<Value>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(Value::Null),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_message_escapes_input() {
        let text = ws_error_message(
            "INVALID_DIRECTION",
            "invalid direction \"up\\\"\"",
            Some(json!({ "input": "up\"" })),
        );
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["action"], "Error");
        assert_eq!(parsed["data"]["code"], "INVALID_DIRECTION");
        assert_eq!(parsed["data"]["context"]["input"], "up\"");
    }

    #[test]
    fn test_ws_error_message_without_context() {
        let parsed: Value = serde_json::from_str(&ws_error_message("X", "y", None)).unwrap();
        assert!(parsed["data"]["context"].is_null());
    }
}
