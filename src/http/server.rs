//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (trace, reference ID, recovery, transaction capture)
//! - Bind server to listener
//! - Stop on shutdown signal

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::client::OutboundClient;
use crate::config::validation::{validate_config, ValidationError};
use crate::config::{ConfigError, ServiceConfig};
use crate::http::handlers;
use crate::http::middleware::{capture_transaction, recover, ReferenceIdLayer};
use crate::observability::EventLogger;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub logger: EventLogger,
    pub client: OutboundClient,
    pub downstream_url: Url,
    pub downstream_timeout: Duration,
}

impl AppState {
    pub fn new(logger: EventLogger, downstream_url: Url, downstream_timeout: Duration) -> Self {
        Self {
            client: OutboundClient::new(logger.clone()),
            logger,
            downstream_url,
            downstream_timeout,
        }
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let logger = state.logger.clone();

    Router::new()
        .route("/person/{name}", post(handlers::create_person))
        .route("/api/v1", get(handlers::version))
        .route("/api/v1/silent", get(handlers::silent))
        // Only matched routes are captured; 404s are not logged as transactions.
        .route_layer(middleware::from_fn_with_state(
            logger.clone(),
            capture_transaction,
        ))
        .with_state(state)
        .layer(middleware::from_fn_with_state(logger, recover))
        .layer(ReferenceIdLayer)
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and event logger.
    pub fn new(config: ServiceConfig, logger: EventLogger) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let downstream_url = Url::parse(&config.downstream.url).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::DownstreamUrl(
                config.downstream.url.clone(),
            )])
        })?;

        let state = AppState::new(
            logger,
            downstream_url,
            Duration::from_secs(config.downstream.timeout_secs),
        );

        Ok(Self {
            router: build_router(state),
            config,
        })
    }

    /// Run the server until `shutdown` fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Wait for the shutdown broadcast or Ctrl+C.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = shutdown.recv() => {}
        _ = ctrl_c => {}
    }
    tracing::info!("Shutdown signal received");
}
