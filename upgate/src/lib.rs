//! # upgate: Presigned Upload URL Gateway
//!
//! `upgate` is a small HTTP backend that lets browser and API clients upload files
//! directly to S3-compatible object storage without the file bytes ever passing
//! through the application. Clients ask the gateway for a presigned upload URL,
//! then `PUT` their file straight to the storage endpoint.
//!
//! ## Overview
//!
//! Applications that accept user uploads face a choice: proxy the file bytes
//! through their own backend (simple, but expensive in bandwidth and memory), or
//! let clients talk to object storage directly (cheap, but storage credentials
//! must never reach the client). Presigned URLs resolve this tension. The backend
//! holds the credentials, signs a short-lived URL that permits exactly one kind
//! of request to exactly one object key, and hands that URL to the client.
//!
//! This crate is that backend, reduced to its essence. It exposes one operation,
//! `POST /api/presigned-url`, which validates the requested bucket, object key,
//! and content type, and returns a URL that accepts a single `PUT` for the next
//! hour. A `GET /health` endpoint reports liveness for load balancers and
//! orchestration probes.
//!
//! ### What It Does
//!
//! Signing is a purely local computation over the configured credentials, so the
//! gateway makes no network calls to the storage backend and cannot verify that
//! the bucket exists or that the credentials are valid. A URL is produced for any
//! well-formed request; the storage backend is the arbiter of whether the upload
//! itself succeeds.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the
//! HTTP layer. Handlers ([`api`]) validate requests and delegate signing to the
//! [`signer::UploadSigner`] seam, implemented for production by
//! [`signer::S3Signer`] on top of the AWS SDK. Configuration ([`config`]) is
//! loaded once at startup from a YAML file with environment overrides, and
//! custom endpoints plus path-style addressing make the gateway work against
//! MinIO, Ceph, and other S3-compatible stores.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use upgate::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = upgate::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging)
//!     upgate::telemetry::init_telemetry()?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See [`config`] for the full configuration reference, including how to point
//! the gateway at an S3-compatible endpoint and how credentials are resolved
//! from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`.

pub mod api;
pub mod config;
pub mod errors;
mod openapi;
pub mod signer;
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use crate::signer::{S3Signer, UploadSigner};
use axum::http::{self, HeaderValue, Method};
use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// Contains the shared resources the API handlers need: the loaded
/// configuration and the signing client behind the [`UploadSigner`] seam.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .signer(signer)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub signer: Arc<dyn UploadSigner>,
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    // A wildcard cannot appear inside an origin list, so it switches the whole
    // layer to the permissive form. Config validation has already rejected
    // wildcard combined with credentials.
    let has_wildcard = cors_config.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard));

    let mut cors = if has_wildcard {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().parse::<HeaderValue>()?);
            }
        }

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([http::header::CONTENT_TYPE])
            .allow_credentials(cors_config.allow_credentials)
    };

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - The presigned upload URL endpoint
/// - The health check endpoint
/// - API documentation (Scalar)
/// - CORS configuration
/// - Tracing middleware
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let router = Router::new()
        .route("/health", get(api::handlers::health::health_check))
        .route("/api/presigned-url", post(api::handlers::uploads::create_presigned_upload_url))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let router = router.layer(cors_layer);

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns the router and configuration.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting upload gateway with configuration: {:#?}", config);

        // Build the signing client from the storage configuration
        let signer: Arc<dyn UploadSigner> = Arc::new(S3Signer::new(&config.storage).await);

        let state = AppState::builder().config(config.clone()).signer(signer).build();
        let router = build_router(state)?;

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Upload gateway listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );
        info!("Health check at http://localhost:{}/health", self.config.port);
        info!("Presigned URL endpoint at http://localhost:{}/api/presigned-url", self.config.port);
        info!("API docs at http://localhost:{}/docs", self.config.port);

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::Application;
    use crate::test_utils::create_test_config;

    async fn test_server() -> axum_test::TestServer {
        Application::new(create_test_config())
            .await
            .expect("Failed to create application")
            .into_test_server()
    }

    /// Integration test: the full stack from router construction through a real
    /// SigV4 signature, without touching the network.
    #[test_log::test(tokio::test)]
    async fn test_presigned_upload_url_end_to_end() {
        let server = test_server().await;

        let response = server
            .post("/api/presigned-url")
            .json(&json!({
                "fileName": "a.png",
                "destinationPath": "uploads/a.png",
                "contentType": "image/png",
                "bucket": "my-bucket"
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["bucket"], "my-bucket");
        assert_eq!(body["key"], "uploads/a.png");
        assert_eq!(body["expiresIn"], 3600);

        let url = body["presignedUrl"].as_str().expect("presignedUrl should be a string");
        assert!(
            url.starts_with("https://objectstore.example.net/my-bucket/uploads/a.png?"),
            "unexpected presigned url: {url}"
        );
        assert!(url.contains("X-Amz-Expires=3600"), "unexpected presigned url: {url}");
        assert!(url.contains("X-Amz-Signature="), "unexpected presigned url: {url}");
    }

    // The permissive CORS default applies to API responses
    #[test_log::test(tokio::test)]
    async fn test_cors_wildcard_header_present() {
        let server = test_server().await;

        let response = server.get("/health").add_header("origin", "https://app.example.com").await;

        response.assert_status(StatusCode::OK);
        let allow_origin = response.headers().get("access-control-allow-origin").cloned();
        assert_eq!(allow_origin.as_ref().and_then(|v| v.to_str().ok()), Some("*"));
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_route_returns_404() {
        let server = test_server().await;

        let response = server.get("/api/unknown").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    // API documentation is mounted at /docs
    #[test_log::test(tokio::test)]
    async fn test_docs_page_served() {
        let server = test_server().await;

        let response = server.get("/docs").await;

        response.assert_status(StatusCode::OK);
    }
}
