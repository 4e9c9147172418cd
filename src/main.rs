use anyhow::Result;
use axum::Router;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use config::AppConfig;
use services::upload_service::{UploadService, UploadSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Parse config ---
    let cfg = AppConfig::from_env_and_args()?;

    // --- Logging setup ---
    // Lambda ships stdout to CloudWatch, one JSON event per line.
    if cfg.lambda {
        tracing_subscriber::fmt()
            .json()
            .with_ansi(false)
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    tracing::info!("Starting upload-authorizer with config: {:?}", cfg);

    // --- Initialize AWS clients once per process ---
    let aws_config = cfg.load_aws_config().await;
    tracing::debug!(region = ?aws_config.region(), "loaded aws config");

    let settings = UploadSettings::from_config(&cfg);
    let missing = settings.missing();
    if !missing.is_empty() {
        tracing::warn!(?missing, "collaborator settings missing; affected requests will fail");
    }

    let service = UploadService::from_aws(&aws_config, settings);

    // --- Build router ---
    let app: Router = routes::routes::routes(service, cfg.lambda);

    if cfg.lambda {
        tracing::info!("Serving through the Lambda runtime");
        return lambda_http::run(app)
            .await
            .map_err(|err| anyhow::anyhow!(err));
    }

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
