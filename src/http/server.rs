//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with one route per operation
//! - Wire up middleware (timeout, request ID, tracing)
//! - Hold the application state (provisioner, signer)
//! - Run with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::chain::ParamsSource;
use crate::config::CustodianConfig;
use crate::http::handlers;
use crate::lifecycle::Shutdown;
use crate::provision::Provisioner;
use crate::signing::TransactionSigner;
use crate::store::SecretStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<Provisioner>,
    pub signer: Arc<TransactionSigner>,
}

/// HTTP server for the custody service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Assemble the server from config and the two external clients.
    pub fn new(
        config: &CustodianConfig,
        store: Arc<dyn SecretStore>,
        params: Arc<dyn ParamsSource>,
    ) -> Self {
        let state = AppState {
            provisioner: Arc::new(Provisioner::new(store.clone())),
            signer: Arc::new(TransactionSigner::new(store, params)),
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    fn build_router(config: &CustodianConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(handlers::health))
            .route("/v1/identities", post(handlers::provision_identity))
            .route(
                "/v1/identities/{key}/transactions/payment",
                post(handlers::sign_payment),
            )
            .route(
                "/v1/identities/{key}/transactions/asset-create",
                post(handlers::sign_asset_create),
            )
            .route(
                "/v1/identities/{key}/transactions/asset-transfer",
                post(handlers::sign_asset_transfer),
            )
            .route(
                "/v1/identities/{key}/transactions/asset-opt-in",
                post(handlers::sign_asset_opt_in),
            )
            .route(
                "/v1/identities/{key}/transactions/asset-opt-out",
                post(handlers::sign_asset_opt_out),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run until the shutdown coordinator fires.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut rx = shutdown.subscribe();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = rx.recv().await;
            })
            .await
    }
}
