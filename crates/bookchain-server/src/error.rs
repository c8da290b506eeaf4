use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use bookchain_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("malformed request body: {0}")]
    Decode(String),

    #[error("invalid request path: {0}")]
    InvalidPath(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("no block at position {0}")]
    BlockNotFound(u64),

    #[error("append rejected: {0}")]
    Rejected(LedgerError),

    #[error("ledger error: {0}")]
    Ledger(LedgerError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BlockNotFound(_) => StatusCode::NOT_FOUND,
            Self::Rejected(_) => StatusCode::CONFLICT,
            Self::Ledger(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error kind for the response body.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Decode(_) | Self::InvalidPath(_) => "DecodeError",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::BlockNotFound(_) => "NotFound",
            Self::Rejected(err) | Self::Ledger(err) => err.reason(),
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => "Internal",
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(err: LedgerError) -> Self {
        if err.is_rejection() {
            Self::Rejected(err)
        } else {
            Self::Ledger(err)
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::Decode(rejection.body_text())
        }
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(reason = self.reason(), "{}", self);
        }
        let body = json!({
            "error": {
                "code": status.as_u16(),
                "reason": self.reason(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
