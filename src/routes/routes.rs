//! Defines the HTTP surface of the upload authorizer.
//!
//! ## Structure
//! - `POST    /upload-url` -> issue a pre-signed upload URL
//! - `OPTIONS /upload-url` -> CORS preflight
//! - `GET     /healthz`, `GET /readyz` -> probes
//!
//! Under Lambda every other path also reaches the upload handler, since a
//! function URL or API Gateway resource may invoke it on any path.
//!
//! Every response, errors and 404s included, carries the same permissive
//! CORS headers.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        upload_handlers::{create_upload_url, preflight},
    },
    services::upload_service::UploadService,
};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// Build the router with its shared `UploadService` state already attached.
///
/// With `lambda` set, unmatched paths fall back to the upload handler instead
/// of returning 404.
pub fn routes(service: UploadService, lambda: bool) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/upload-url", post(create_upload_url).options(preflight));

    if lambda {
        router = router.fallback(post(create_upload_url).options(preflight));
    }

    let mut router = router.with_state(service);

    for (name, value) in CORS_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    router.layer(TraceLayer::new_for_http())
}
