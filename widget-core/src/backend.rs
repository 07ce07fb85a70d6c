use crate::{Query, WeatherResult, WidgetError, error::UNKNOWN_SERVER_ERROR};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Debug;

pub mod http;

pub use http::HttpBackend;

/// Source of current weather for a query.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn current_weather(&self, query: &Query) -> Result<WeatherResult, WidgetError>;
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    error: Option<Value>,
}

/// Scalars that would read as a message; `0`, `false`, `null`, `""` and
/// nested structures do not.
fn message_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Message for a failure response: the body's `error` field when there is one,
/// otherwise `Error: <status> <status text>`.
///
/// The status text is the canonical reason for the code; a custom reason
/// phrase sent by the server is not available through the client.
pub fn server_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ServerErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .and_then(message_text)
        .unwrap_or_else(|| {
            format!(
                "Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or(UNKNOWN_SERVER_ERROR)
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_is_used_verbatim() {
        let msg = server_message(StatusCode::NOT_FOUND, r#"{"error":"City not found"}"#);
        assert_eq!(msg, "City not found");
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let msg = server_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(msg, "Error: 500 Internal Server Error");
    }

    #[test]
    fn missing_or_empty_error_field_falls_back_to_status() {
        let msg = server_message(StatusCode::BAD_GATEWAY, r#"{"detail":"upstream"}"#);
        assert_eq!(msg, "Error: 502 Bad Gateway");

        let msg = server_message(StatusCode::BAD_REQUEST, r#"{"error":""}"#);
        assert_eq!(msg, "Error: 400 Bad Request");

        let msg = server_message(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(msg, "Error: 503 Service Unavailable");
    }

    #[test]
    fn scalar_error_fields_are_stringified() {
        let msg = server_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":123}"#);
        assert_eq!(msg, "123");

        let msg = server_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":2.5}"#);
        assert_eq!(msg, "2.5");

        let msg = server_message(StatusCode::BAD_REQUEST, r#"{"error":true}"#);
        assert_eq!(msg, "true");
    }

    #[test]
    fn falsy_or_nested_error_fields_fall_back_to_status() {
        for body in [
            r#"{"error":0}"#,
            r#"{"error":false}"#,
            r#"{"error":null}"#,
            r#"{"error":{"code":7}}"#,
        ] {
            let msg = server_message(StatusCode::BAD_REQUEST, body);
            assert_eq!(msg, "Error: 400 Bad Request", "body {body}");
        }
    }

    #[test]
    fn unknown_status_uses_generic_text() {
        let status = StatusCode::from_u16(599).expect("valid status code");
        assert_eq!(server_message(status, "nope"), "Error: 599 Unknown server error");
    }
}
