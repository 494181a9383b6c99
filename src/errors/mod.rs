//! Error handling module for the hub client.
//!
//! Provides the client-side error type plus the message extraction used to
//! turn heterogeneous failures into a displayable string.

use serde::{Deserialize, Serialize};

/// Structured error body the server may return on a failed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Captured body of a non-2xx response.
#[derive(Debug, Clone)]
pub enum ErrorBody {
    /// Raw string body.
    Text(String),
    /// JSON object exposing optional `message`/`error` fields.
    Structured(StructuredError),
}

impl ErrorBody {
    /// Classify a response body: JSON objects become [`ErrorBody::Structured`],
    /// anything else non-blank is kept verbatim as [`ErrorBody::Text`].
    pub fn from_response_text(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) if value.is_object() => {
                let structured = StructuredError {
                    message: value
                        .get("message")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                    error: value
                        .get("error")
                        .and_then(|v| v.as_str())
                        .map(str::to_string),
                };
                Some(ErrorBody::Structured(structured))
            }
            _ => Some(ErrorBody::Text(text.to_string())),
        }
    }
}

/// Client-side API error.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-2xx response, with whatever body could be captured.
    Status { status: u16, body: Option<ErrorBody> },
    /// Transport-level failure (connect, timeout, protocol).
    Transport(String),
    /// Response arrived but did not deserialize into the expected shape.
    Decode(String),
    /// Plain string failure.
    Message(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status { status, .. } => write!(f, "server returned status {}", status),
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
            ApiError::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Transport error: {:?}", err);
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ApiError::Decode(format!("JSON error: {}", err))
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Resolve an [`ApiError`] to a displayable message.
///
/// Resolution order, first non-blank match wins: raw response body, the
/// body's `message` field, the body's `error` field, the error's own
/// message (a bare status yields "server returned status N"), and finally
/// `fallback`.
pub fn extract_api_error_message(error: &ApiError, fallback: &str) -> String {
    if let ApiError::Status { body, .. } = error {
        match body {
            Some(ErrorBody::Text(text)) => {
                if let Some(text) = non_blank(text) {
                    return text.to_string();
                }
            }
            Some(ErrorBody::Structured(structured)) => {
                if let Some(message) = structured.message.as_deref().and_then(non_blank) {
                    return message.to_string();
                }
                if let Some(message) = structured.error.as_deref().and_then(non_blank) {
                    return message.to_string();
                }
            }
            None => {}
        }
    }

    match error {
        ApiError::Transport(msg) | ApiError::Decode(msg) | ApiError::Message(msg) => {
            if let Some(msg) = non_blank(msg) {
                return msg.to_string();
            }
        }
        // Nothing usable in the body; the status line is still more telling
        // than a generic fallback.
        ApiError::Status { .. } => return error.to_string(),
    }

    fallback.to_string()
}
