//! # agentgw: Upload-Grant & Agent-Relay Backend
//!
//! `agentgw` is a minimal backend for a chat frontend backed by a remote
//! conversational agent. It does exactly three things: issues short-lived,
//! scoped upload authorizations for a storage bucket, relays chat messages to
//! the agent runtime and returns the assembled reply text, and serves the
//! prebuilt frontend bundle.
//!
//! ## Overview
//!
//! Both API endpoints are thin request/response translators around cloud
//! services. `POST /api/presign` validates the declared upload, derives a
//! namespaced object key (`<prefix><user>/<millis>_<uuid><ext>`), and returns a
//! presigned PUT URL valid for 60 seconds and only for the declared content
//! type. `POST /api/chat` validates the message, resolves the session identity
//! (pinning the acting identity to a configured demo identity unless that
//! policy is disabled), submits the invocation, drains the agent's chunked
//! reply stream, and responds once with the concatenated text.
//!
//! No state is persisted here: upload objects live in the bucket, conversation
//! state lives in the agent runtime, and the only thing shared between
//! requests is the immutable [`Config`] loaded at startup.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer. External services sit behind two seams so handlers never
//! touch SDK types directly:
//!
//! - [`storage::UploadStore`], implemented by [`storage::S3UploadStore`]
//! - [`agent::AgentRuntime`], implemented by [`agent::BedrockAgentRuntime`]
//!
//! Handlers convert every failure into [`errors::Error`], which serializes as
//! the uniform `{ok: false, error, kind}` body.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use agentgw::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = agentgw::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize telemetry (structured logging)
//!     agentgw::telemetry::init_telemetry()?;
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod agent;
pub mod api;
pub mod config;
pub mod errors;
mod openapi;
mod static_assets;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use aws_config::Region;
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::agent::{AgentRuntime, BedrockAgentRuntime};
use crate::openapi::ApiDoc;
use crate::storage::{S3UploadStore, UploadStore};

pub use config::Config;

/// Application state shared across all request handlers.
///
/// Cheap to clone: configuration plus two reference-counted service seams.
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub uploads: Arc<dyn UploadStore>,
    pub agent: Arc<dyn AgentRuntime>,
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Upload grant and agent relay API routes under `/api`
/// - Static asset serving and SPA fallback
/// - API reference at `/docs`
/// - Tracing middleware
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit;

    // API routes
    let api_routes = Router::new()
        .route("/presign", post(api::handlers::presign::create_upload_grant))
        .route("/chat", post(api::handlers::chat::relay_chat))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    // Serve embedded static assets, falling back to SPA for unmatched routes
    let fallback = get(api::handlers::static_assets::serve_embedded_asset).fallback(get(api::handlers::static_assets::spa_fallback));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback_service(fallback);

    // Add tracing layer
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] builds the cloud service clients and router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts handling requests
/// 3. **Shutdown**: When the shutdown signal resolves, in-flight requests drain and serve returns
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting agent gateway with configuration: {:#?}", config);

        // One shared SDK config: both clients resolve credentials the same way
        let sdk_config = aws_config::from_env().region(Region::new(config.region.clone())).load().await;

        let uploads: Arc<dyn UploadStore> = Arc::new(S3UploadStore::new(&sdk_config, config.upload.bucket.clone()));
        let agent: Arc<dyn AgentRuntime> = Arc::new(BedrockAgentRuntime::new(&sdk_config));

        let state = AppState::builder().config(config.clone()).uploads(uploads).agent(agent).build();
        let router = build_router(state);

        Ok(Self { router, config })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Agent gateway listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router).with_graceful_shutdown(shutdown).await?;

        Ok(())
    }
}
