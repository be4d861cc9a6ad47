//! Error types for the dashboard client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, request, protocol, storage and input validation errors.

use std::fmt;
use thiserror::Error;

/// Message used when a failed response carries no `detail` field.
pub const DEFAULT_ERROR_DETAIL: &str = "حدث خطأ في الطلب";

/// The unified error type for dashboard client operations.
///
/// Callers can match on the variant to tell a network failure apart from a
/// server that answered with an error status.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Request(#[from] RequestError),

    /// A success response whose body did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Credential storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (invalid URL, header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the request error if the server rejected the call.
    pub fn as_request(&self) -> Option<&RequestError> {
        match self {
            Error::Request(err) => Some(err),
            _ => None,
        }
    }

    /// True when the server rejected the call with 401 and no refresh rescued it.
    pub fn is_unauthorized(&self) -> bool {
        self.as_request().is_some_and(RequestError::is_unauthorized)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the API.
///
/// The display form is the server's `detail` message, falling back to
/// [`DEFAULT_ERROR_DETAIL`], so it can be shown to a user as-is.
#[derive(Debug)]
pub struct RequestError {
    /// HTTP status code.
    pub status: u16,
    /// The `detail` field of the error body, if present.
    pub detail: Option<String>,
    /// The full error body when it was valid JSON.
    pub body: Option<serde_json::Value>,
}

impl RequestError {
    /// Create a new request error.
    pub fn new(status: u16, detail: Option<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            status,
            detail,
            body,
        }
    }

    /// Build a request error from a status and a raw response body.
    pub fn from_body(status: u16, bytes: &[u8]) -> Self {
        let body = serde_json::from_slice::<serde_json::Value>(bytes).ok();
        let detail = body
            .as_ref()
            .and_then(|b| b.get("detail"))
            .and_then(|d| d.as_str())
            .map(str::to_string);
        Self::new(status, detail, body)
    }

    /// The human-readable message for this error.
    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(DEFAULT_ERROR_DETAIL)
    }

    /// Check if the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Field-level validation messages, as returned for 400 responses.
    ///
    /// Each entry is `(field, message)`; list values yield one entry per item.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Some(serde_json::Value::Object(map)) = &self.body else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        for (field, value) in map {
            if field == "detail" {
                continue;
            }
            match value {
                serde_json::Value::String(s) => errors.push((field.clone(), s.clone())),
                serde_json::Value::Array(items) => {
                    for item in items {
                        if let Some(s) = item.as_str() {
                            errors.push((field.clone(), s.to_string()));
                        }
                    }
                }
                _ => {}
            }
        }
        errors
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for RequestError {}

/// A success response that could not be decoded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body was not the expected JSON shape.
    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("I/O error: {message}")]
    Io { message: String },

    /// The backing store holds data that could not be parsed.
    #[error("corrupt credential store: {message}")]
    Corrupt { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_is_used_as_message() {
        let err = RequestError::from_body(403, br#"{"detail": "Permission denied"}"#);
        assert_eq!(err.to_string(), "Permission denied");
        assert_eq!(err.status, 403);
    }

    #[test]
    fn missing_detail_falls_back_to_default() {
        let err = RequestError::from_body(500, b"<html>oops</html>");
        assert_eq!(err.message(), DEFAULT_ERROR_DETAIL);
        assert!(err.body.is_none());
    }

    #[test]
    fn field_errors_are_flattened() {
        let err = RequestError::new(
            400,
            None,
            Some(json!({
                "email": ["Enter a valid email address."],
                "password_confirm": "mismatch"
            })),
        );
        let mut fields = err.field_errors();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("email".to_string(), "Enter a valid email address.".to_string()),
                ("password_confirm".to_string(), "mismatch".to_string()),
            ]
        );
    }

    #[test]
    fn unauthorized_is_detected_through_error() {
        let err = Error::from(RequestError::new(401, None, None));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), DEFAULT_ERROR_DETAIL);
    }
}
