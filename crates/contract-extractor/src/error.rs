//! Error types for the extraction service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Extraction service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No registered parser recognizes the file
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The matched parser could not decode the bytes
    #[error("Failed to parse file '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Connection or timeout failure talking to the AI service
    #[error("AI service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the AI service
    #[error("AI service returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report artifact could not be written
    #[error("Failed to write report: {0}")]
    Export(String),

    /// Unknown task identifier
    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    /// The task exists but is not in a state the request needs
    #[error("Task not ready: {0}")]
    TaskNotReady(String),

    /// Malformed inbound request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a remote-response error
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::UnsupportedFormat(name) => (
                StatusCode::BAD_REQUEST,
                "unsupported_format",
                format!("Unsupported file format: {}", name),
            ),
            Error::FileParse { filename, message } => (
                StatusCode::BAD_REQUEST,
                "parse_error",
                format!("Failed to parse '{}': {}", filename, message),
            ),
            Error::Transport(err) => (StatusCode::BAD_GATEWAY, "transport_error", err.to_string()),
            Error::Remote { status, body } => (
                StatusCode::BAD_GATEWAY,
                "remote_error",
                format!("AI service returned HTTP {}: {}", status, body),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Export(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "export_error", msg.clone()),
            Error::TaskNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Task not found: {}", id),
            ),
            Error::TaskNotReady(msg) => (StatusCode::BAD_REQUEST, "task_not_ready", msg.clone()),
            Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
