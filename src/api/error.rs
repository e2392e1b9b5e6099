use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error on its way to the client: a status code plus a readable message.
///
/// Client-correctable errors are logged at `warn`, server faults at `error`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(e: impl std::fmt::Display) -> Self {
        let message = e.to_string();
        tracing::warn!("Bad request: {}", message);
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(e: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, e.to_string())
    }

    pub fn conflict(e: impl std::fmt::Display) -> Self {
        let message = e.to_string();
        tracing::warn!("Conflict: {}", message);
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        let message = e.to_string();
        tracing::error!("Internal error: {}", message);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a failed lookup: missing and unreadable records are both "not found".
    pub fn lookup(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } | StoreError::Decode { .. } => Self::not_found(e),
            other => Self::internal(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, "invalid JSON")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn undecodable_records_look_missing() {
        let source = serde_yaml_ng::from_str::<crate::models::Model>("[").unwrap_err();
        let err = ApiError::lookup(StoreError::Decode {
            path: PathBuf::from("models/post.yaml"),
            source,
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.message().contains("models/post.yaml"));
    }

    #[test]
    fn io_failures_on_lookup_are_server_errors() {
        let err = ApiError::lookup(StoreError::Io {
            action: "read",
            path: PathBuf::from("models/post.yaml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
