//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

use custodian::chain::{ParamsSource, StaticParams, SuggestedParams};
use custodian::config::CustodianConfig;
use custodian::error::{CustodyError, CustodyResult};
use custodian::lifecycle::Shutdown;
use custodian::store::{MemoryStore, SecretStore};
use custodian::HttpServer;

/// Fixed parameter snapshot used across signing tests.
pub fn test_params() -> SuggestedParams {
    SuggestedParams {
        fee: 1000,
        first_valid: 41_000,
        last_valid: 42_000,
        genesis_id: "custody-test-v1".into(),
        genesis_hash: "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=".into(),
    }
}

/// Spawn the full HTTP service on an ephemeral port, backed by an
/// in-memory store and static chain parameters. Returns the base URL
/// and the store for direct inspection.
#[allow(dead_code)]
pub async fn spawn_service() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let params: Arc<dyn ParamsSource> = Arc::new(StaticParams(test_params()));
    let server = HttpServer::new(
        &CustodianConfig::default(),
        store.clone() as Arc<dyn SecretStore>,
        params,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    tokio::spawn(async move {
        server.run(listener, &shutdown).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

/// A store whose writes always fail, for no-partial-success tests.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl SecretStore for FailingStore {
    async fn get(&self, _path: &str) -> CustodyResult<Option<Zeroizing<String>>> {
        Ok(None)
    }

    async fn put(&self, _path: &str, _value: &str) -> CustodyResult<()> {
        Err(CustodyError::StoreWriteFailed("injected failure".into()))
    }
}

/// Wraps a store but forces the non-atomic check-then-put fallback,
/// imitating a backend with no conditional-write support.
#[allow(dead_code)]
pub struct CheckThenPutStore(pub Arc<MemoryStore>);

#[async_trait]
impl SecretStore for CheckThenPutStore {
    async fn get(&self, path: &str) -> CustodyResult<Option<Zeroizing<String>>> {
        self.0.get(path).await
    }

    async fn put(&self, path: &str, value: &str) -> CustodyResult<()> {
        self.0.put(path, value).await
    }

    // put_if_absent deliberately left at the trait default.
}

/// State behind the in-process Vault stub.
pub struct VaultStub {
    pub secrets: RwLock<HashMap<String, String>>,
    pub reject_writes: AtomicBool,
    pub expected_token: String,
}

async fn stub_get(
    State(stub): State<Arc<VaultStub>>,
    Path(path): Path<String>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    if headers.get("X-Vault-Token").map(|v| v.as_bytes()) != Some(stub.expected_token.as_bytes()) {
        return StatusCode::FORBIDDEN.into_response();
    }
    if path == "empty-envelope" {
        return Json(json!({ "data": {} })).into_response();
    }
    match stub.secrets.read().await.get(&path) {
        Some(value) => Json(json!({ "data": { "mnemonic": value } })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn stub_put(
    State(stub): State<Arc<VaultStub>>,
    Path(path): Path<String>,
    headers: axum::http::HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    if headers.get("X-Vault-Token").map(|v| v.as_bytes()) != Some(stub.expected_token.as_bytes()) {
        return StatusCode::FORBIDDEN.into_response();
    }
    if stub.reject_writes.load(std::sync::atomic::Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Some(value) = body.get("mnemonic").and_then(|v| v.as_str()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    stub.secrets
        .write()
        .await
        .insert(path, value.to_string());
    StatusCode::NO_CONTENT.into_response()
}

/// Spawn a minimal cubbyhole lookalike. Returns its base URL and the
/// shared stub state.
#[allow(dead_code)]
pub async fn spawn_vault_stub(token: &str) -> (String, Arc<VaultStub>) {
    let stub = Arc::new(VaultStub {
        secrets: RwLock::new(HashMap::new()),
        reject_writes: AtomicBool::new(false),
        expected_token: token.to_string(),
    });

    let router = Router::new()
        .route("/v1/cubbyhole/{path}", get(stub_get).post(stub_put))
        .with_state(stub.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}
