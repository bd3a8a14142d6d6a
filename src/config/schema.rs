//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! custody service. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the custody service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CustodianConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Secret store (Vault cubbyhole) settings.
    pub vault: VaultConfig,

    /// Chain node settings.
    pub node: NodeConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Secret store configuration.
///
/// The bearer token is NOT part of this struct; only the name of the
/// environment variable it is read from at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Base address of the Vault server (e.g., "http://127.0.0.1:8200").
    pub address: String,

    /// Mount point of the per-path secret engine.
    pub mount: String,

    /// Name of the environment variable carrying the Vault token.
    pub token_env: String,

    /// Timeout for each store request, in seconds.
    pub timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8200".to_string(),
            mount: "cubbyhole".to_string(),
            token_env: "VAULT_TOKEN".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Chain node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the chain node's REST API.
    pub url: String,

    /// Timeout for each node request, in seconds.
    pub timeout_secs: u64,

    /// Rounds a built transaction stays valid for.
    pub validity_window: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:4001".to_string(),
            timeout_secs: 5,
            validity_window: 1_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// End-to-end request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether to expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Address for the metrics exposition listener.
    pub metrics_address: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
            log_json: false,
        }
    }
}
