//! HTTP handlers for upload authorization.
//! The body is parsed by hand so that malformed input fails with the same
//! 500 response as every collaborator failure.

use crate::{
    errors::UploadError,
    models::upload::{UploadRequest, UploadResponse},
    services::upload_service::UploadService,
};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};

/// `POST /upload-url`: issue a 60 second pre-signed PUT URL.
pub async fn create_upload_url(
    State(service): State<UploadService>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    // Oversized or unreadable bodies get the same 500 as a bad payload.
    let body = body?;
    let request = UploadRequest::from_slice(&body)?;
    let upload_url = service.authorize_upload(&request).await?;

    Ok(Json(UploadResponse { upload_url }))
}

/// `OPTIONS /upload-url`: CORS preflight. Headers come from the router layer.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
