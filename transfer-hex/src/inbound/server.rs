//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{self, AppState};
use crate::{ApiDoc, TransferProvider, TransferService};

/// HTTP Server for the Transfer API.
pub struct HttpServer<P: TransferProvider> {
    state: Arc<AppState<P>>,
}

impl<P: TransferProvider> HttpServer<P> {
    /// Creates a new HTTP server.
    ///
    /// `callback_url` is the public URL registered with the provider for
    /// webhooks; inbound signatures are checked against it.
    pub fn new(service: TransferService<P>, callback_url: impl Into<String>) -> Self {
        Self {
            state: Arc::new(AppState {
                service,
                callback_url: callback_url.into(),
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api-docs/openapi.json",
                get(|| async { Json(ApiDoc::openapi()) }),
            )
            .route("/api/currencies", get(handlers::currencies::<P>))
            .route(
                "/api/senders",
                post(handlers::create_sender::<P>).get(handlers::list_senders::<P>),
            )
            .route("/api/senders/{id}", get(handlers::get_sender::<P>))
            .route(
                "/api/transactions",
                post(handlers::create_transaction::<P>).get(handlers::list_transactions::<P>),
            )
            .route(
                "/api/transactions/{id}",
                get(handlers::get_transaction::<P>),
            )
            .route(
                "/api/transactions/{id}/fund",
                post(handlers::fund_transaction::<P>),
            )
            .route(
                "/api/recipients/{id}",
                delete(handlers::cancel_recipient::<P>),
            )
            .route(
                "/api/account_validations",
                post(handlers::validate_account::<P>),
            )
            .route("/webhooks", post(handlers::receive_webhook::<P>))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
