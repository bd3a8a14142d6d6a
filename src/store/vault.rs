//! Vault cubbyhole client.
//!
//! Speaks the per-path secret API: `GET`/`POST /v1/<mount>/<path>`
//! with the token in the `X-Vault-Token` header. The secret payload is
//! `{"data": {"mnemonic": "<phrase>"}}`.
//!
//! Cubbyhole has no compare-and-swap, so `put_if_absent` stays the
//! default check-then-put; the provisioning layer compensates with a
//! per-path lock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use zeroize::Zeroizing;

use crate::config::VaultConfig;
use crate::error::{CustodyError, CustodyResult};
use crate::store::{is_valid_path, SecretStore};

/// HTTP client for a Vault cubbyhole-style secret engine.
pub struct VaultClient {
    http: reqwest::Client,
    base: String,
    mount: String,
    token: String,
}

#[derive(Deserialize)]
struct SecretEnvelope {
    data: SecretData,
}

#[derive(Deserialize)]
struct SecretData {
    mnemonic: Option<String>,
}

impl VaultClient {
    /// Build a client from config plus the token loaded at startup.
    pub fn new(config: &VaultConfig, token: String) -> CustodyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CustodyError::StoreUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base: config.address.trim_end_matches('/').to_string(),
            mount: config.mount.clone(),
            token,
        })
    }

    fn secret_url(&self, path: &str) -> String {
        format!("{}/v1/{}/{}", self.base, self.mount, path)
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn get(&self, path: &str) -> CustodyResult<Option<Zeroizing<String>>> {
        if !is_valid_path(path) {
            return Ok(None);
        }

        let response = self
            .http
            .get(self.secret_url(path))
            .header("X-Vault-Token", &self.token)
            .send()
            .await
            .map_err(|e| CustodyError::StoreUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let envelope: SecretEnvelope = response
                    .json()
                    .await
                    .map_err(|_| CustodyError::CorruptSecret(path.to_string()))?;
                match envelope.data.mnemonic {
                    Some(secret) => Ok(Some(Zeroizing::new(secret))),
                    None => Err(CustodyError::CorruptSecret(path.to_string())),
                }
            }
            status => Err(CustodyError::StoreUnavailable(format!(
                "secret store returned status {}",
                status
            ))),
        }
    }

    async fn put(&self, path: &str, value: &str) -> CustodyResult<()> {
        if !is_valid_path(path) {
            return Err(CustodyError::StoreWriteFailed(format!(
                "refusing to write to invalid path '{}'",
                path
            )));
        }

        let response = self
            .http
            .post(self.secret_url(path))
            .header("X-Vault-Token", &self.token)
            .json(&json!({ "mnemonic": value }))
            .send()
            .await
            .map_err(|e| CustodyError::StoreUnavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CustodyError::StoreWriteFailed(format!(
                "secret store returned status {}",
                response.status()
            )))
        }
    }
}
