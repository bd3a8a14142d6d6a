//! Suggested transaction parameters.
//!
//! A read-only snapshot fetched per request from the chain node. No
//! caching: the node is cheap to query and staleness would shrink the
//! validity window.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;
use crate::error::{CustodyError, CustodyResult};

/// Network-supplied values needed to form a valid transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    /// Base64 of the genesis block hash, as the node reports it.
    pub genesis_hash: String,
}

/// Source of current transaction parameters.
#[async_trait]
pub trait ParamsSource: Send + Sync {
    async fn suggested_params(&self) -> CustodyResult<SuggestedParams>;
}

/// Wire shape of the node's parameters endpoint.
#[derive(Deserialize)]
struct NodeParamsResponse {
    #[serde(rename = "min-fee")]
    min_fee: u64,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
}

/// Parameters client talking to a chain node's REST API.
pub struct NodeParamsClient {
    http: reqwest::Client,
    base: String,
    validity_window: u64,
}

impl NodeParamsClient {
    pub fn new(config: &NodeConfig) -> CustodyResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CustodyError::ChainParameterUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base: config.url.trim_end_matches('/').to_string(),
            validity_window: config.validity_window,
        })
    }
}

#[async_trait]
impl ParamsSource for NodeParamsClient {
    async fn suggested_params(&self) -> CustodyResult<SuggestedParams> {
        let url = format!("{}/v2/transactions/params", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CustodyError::ChainParameterUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CustodyError::ChainParameterUnavailable(e.to_string()))?;

        let params: NodeParamsResponse = response
            .json()
            .await
            .map_err(|e| CustodyError::ChainParameterUnavailable(e.to_string()))?;

        if params.genesis_id.is_empty() || params.genesis_hash.is_empty() {
            return Err(CustodyError::ChainParameterUnavailable(
                "node returned empty genesis data".to_string(),
            ));
        }

        Ok(SuggestedParams {
            fee: params.min_fee,
            first_valid: params.last_round,
            last_valid: params.last_round + self.validity_window,
            genesis_id: params.genesis_id,
            genesis_hash: params.genesis_hash,
        })
    }
}

/// Fixed parameters for tests and offline development.
pub struct StaticParams(pub SuggestedParams);

#[async_trait]
impl ParamsSource for StaticParams {
    async fn suggested_params(&self) -> CustodyResult<SuggestedParams> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_response_field_names() {
        let params: NodeParamsResponse = serde_json::from_str(
            r#"{
                "min-fee": 1000,
                "last-round": 4200,
                "genesis-id": "testnet-v1.0",
                "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI="
            }"#,
        )
        .unwrap();
        assert_eq!(params.min_fee, 1000);
        assert_eq!(params.last_round, 4200);
        assert_eq!(params.genesis_id, "testnet-v1.0");
    }

    #[tokio::test]
    async fn test_static_params_snapshot() {
        let snapshot = SuggestedParams {
            fee: 1000,
            first_valid: 10,
            last_valid: 1010,
            genesis_id: "test".into(),
            genesis_hash: "aGFzaA==".into(),
        };
        let source = StaticParams(snapshot.clone());
        assert_eq!(source.suggested_params().await.unwrap(), snapshot);
    }
}
