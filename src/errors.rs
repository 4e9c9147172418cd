use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure of one upload authorization, tagged by the step that failed.
///
/// Every variant reaches the caller the same way: a 500 carrying the
/// description. The tag only shows up in logs and tests.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid request body: {0}")]
    Parse(String),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("failed to generate upload URL: {0}")]
    Authorization(String),

    #[error("failed to save upload record: {0}")]
    Persistence(String),

    #[error("failed to publish notification: {0}")]
    Notification(String),
}

impl UploadError {
    /// Short stage name used as a structured log field.
    pub fn stage(&self) -> &'static str {
        match self {
            UploadError::Parse(_) => "parse",
            UploadError::MissingConfig(_) => "config",
            UploadError::Authorization(_) => "authorization",
            UploadError::Persistence(_) => "persistence",
            UploadError::Notification(_) => "notification",
        }
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::Parse(err.to_string())
    }
}

impl From<BytesRejection> for UploadError {
    fn from(rejection: BytesRejection) -> Self {
        UploadError::Parse(rejection.body_text())
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        tracing::error!(stage = self.stage(), error = %self, "upload authorization failed");

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
