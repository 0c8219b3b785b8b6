//! Error types for the HTTP front end.
//!
//! [`ApiError`] carries a store error to the wire. All errors encode to JSON
//! as:
//!
//! ```json
//! {
//!   "code": "RevisionMismatch",
//!   "message": "revision mismatch: token 2 does not match current revision 3",
//!   "details": {"revision": 3}
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::ConfigError;

/// A store error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub revkv::Error);

impl ApiError {
    /// HTTP status for the wrapped error
    pub fn status(&self) -> StatusCode {
        use revkv::Error::*;
        match &self.0 {
            RevisionMismatch { .. } => StatusCode::PRECONDITION_FAILED,
            KeyNotFound(_) => StatusCode::NOT_FOUND,
            InvalidCasToken(_) | UnknownField(_) | MalformedPayload(_) | InvalidPage(_)
            | InvalidKey(_) => StatusCode::BAD_REQUEST,
            MaxCapacityReached { .. } | InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire body: `code`, `message`, `details`
    pub fn body(&self) -> Value {
        let details = match &self.0 {
            revkv::Error::RevisionMismatch { current, .. } => json!({ "revision": current }),
            revkv::Error::MaxCapacityReached { max_entries } => {
                json!({ "max_entries": max_entries })
            }
            revkv::Error::UnknownField(field) => json!({ "field": field }),
            revkv::Error::KeyNotFound(key) => json!({ "key": key }),
            _ => Value::Null,
        };
        json!({
            "code": self.0.code(),
            "message": self.0.to_string(),
            "details": details,
        })
    }
}

impl From<revkv::Error> for ApiError {
    fn from(err: revkv::Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            tracing::debug!(code = self.0.code(), error = %self.0, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

/// Errors that stop the server process.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The store rejected its configuration
    #[error("failed to open store: {0}")]
    Store(#[from] revkv::Error),
    /// Binding or serving failed
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Logging could not be installed
    #[error("failed to initialize logging: {0}")]
    Logging(String),
    /// The server task panicked or was cancelled
    #[error("server task failed: {0}")]
    Task(String),
}
