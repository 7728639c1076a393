//! Application startup and lifecycle management.
//!
//! Builds the provider from configuration, wires the router, and owns the
//! listener so tests can bind port 0 and read the assigned port back.

use crate::config::{ExplainerConfig, ProviderKind};
use crate::handlers;
use crate::services::providers::gemini::GeminiExplainer;
use crate::services::providers::rules::RuleBasedExplainer;
use crate::services::ExplanationProvider;
use agent_core::error::AppError;
use agent_core::middleware::tracing::request_id_middleware;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ExplainerConfig,
    pub explainer: Arc<dyn ExplanationProvider>,
}

/// Build the service router over the given state.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/a2a/explain", post(handlers::explain::explain))
        .route("/webhook", post(handlers::webhook::webhook))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ExplainerConfig) -> Result<Self, AppError> {
        let explainer: Arc<dyn ExplanationProvider> = match config.provider {
            ProviderKind::Gemini => {
                tracing::info!(
                    model = %config.gemini.model,
                    "Initialized Gemini explanation provider"
                );
                Arc::new(GeminiExplainer::new(config.gemini.clone()))
            }
            ProviderKind::Rules => {
                tracing::info!("Initialized rule-based explanation provider");
                Arc::new(RuleBasedExplainer::new())
            }
        };

        let state = AppState {
            config: config.clone(),
            explainer,
        };

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Explainer service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = api_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
