//! Request handlers: one per provisioning and transaction operation.
//!
//! Handlers validate request shape (identity key charset, base64
//! payloads), translate DTOs into drafts, and hand off to the core.
//! The success payload for every signing route is the codec's
//! JSON-safe encoding; secrets never appear in any payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{CustodyError, CustodyResult};
use crate::http::server::AppState;
use crate::provision::ProvisionStatus;
use crate::signing::TransactionDraft;
use crate::store::is_valid_path;

#[derive(Debug, Deserialize)]
pub struct ProvisionRequest {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProvisionResponse {
    pub key: String,
    pub address: String,
    pub status: ProvisionStatus,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub receiver: String,
    pub amount: u64,
    #[serde(default)]
    pub close_to: Option<String>,
    /// Base64 note payload.
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetCreateRequest {
    pub total: u64,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub default_frozen: bool,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub asset_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Base64 of a 32-byte commitment.
    #[serde(default)]
    pub metadata_hash: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetTransferRequest {
    pub asset_id: u64,
    pub amount: u64,
    pub receiver: String,
    #[serde(default)]
    pub close_to: Option<String>,
    #[serde(default)]
    pub revoke_from: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetOptInRequest {
    pub asset_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct AssetOptOutRequest {
    pub asset_id: u64,
    pub close_to: String,
    #[serde(default)]
    pub note: Option<String>,
}

fn ensure_valid_key(key: &str) -> CustodyResult<()> {
    if is_valid_path(key) {
        Ok(())
    } else {
        Err(CustodyError::InvalidDraftField {
            field: "key",
            reason: "must be non-empty [A-Za-z0-9._-], at most 128 chars".into(),
        })
    }
}

fn decode_b64(field: &'static str, value: Option<String>) -> CustodyResult<Option<Vec<u8>>> {
    value
        .map(|v| {
            BASE64
                .decode(v.as_bytes())
                .map_err(|_| CustodyError::InvalidDraftField {
                    field,
                    reason: "not valid base64".into(),
                })
        })
        .transpose()
}

pub async fn provision_identity(
    State(state): State<AppState>,
    Json(request): Json<ProvisionRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    ensure_valid_key(&request.key)?;

    let identity = state.provisioner.provision(&request.key).await?;
    let status = match identity.status {
        ProvisionStatus::Created => StatusCode::CREATED,
        ProvisionStatus::Existing => StatusCode::OK,
    };
    Ok((
        status,
        Json(ProvisionResponse {
            key: request.key,
            address: identity.address.to_string(),
            status: identity.status,
        }),
    ))
}

async fn sign(
    state: &AppState,
    key: &str,
    draft: TransactionDraft,
) -> Result<Json<codec::EncodedSignedTransaction>, CustodyError> {
    ensure_valid_key(key)?;
    let signed = state.signer.build_and_sign(key, draft).await?;
    Ok(Json(codec::encode(&signed)?))
}

pub async fn sign_payment(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<PaymentRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    let draft = TransactionDraft::Payment {
        receiver: request.receiver,
        amount: request.amount,
        close_to: request.close_to,
        note: decode_b64("note", request.note)?,
    };
    sign(&state, &key, draft).await
}

pub async fn sign_asset_create(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<AssetCreateRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    let draft = TransactionDraft::AssetCreate {
        total: request.total,
        decimals: request.decimals,
        default_frozen: request.default_frozen,
        unit_name: request.unit_name,
        asset_name: request.asset_name,
        url: request.url,
        metadata_hash: decode_b64("metadata_hash", request.metadata_hash)?,
        note: decode_b64("note", request.note)?,
    };
    sign(&state, &key, draft).await
}

pub async fn sign_asset_transfer(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<AssetTransferRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    let draft = TransactionDraft::AssetTransfer {
        asset_id: request.asset_id,
        amount: request.amount,
        receiver: request.receiver,
        close_to: request.close_to,
        revoke_from: request.revoke_from,
        note: decode_b64("note", request.note)?,
    };
    sign(&state, &key, draft).await
}

pub async fn sign_asset_opt_in(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<AssetOptInRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    let draft = TransactionDraft::AssetOptIn {
        asset_id: request.asset_id,
    };
    sign(&state, &key, draft).await
}

pub async fn sign_asset_opt_out(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<AssetOptOutRequest>,
) -> Result<impl IntoResponse, CustodyError> {
    let draft = TransactionDraft::AssetOptOut {
        asset_id: request.asset_id,
        close_to: request.close_to,
        note: decode_b64("note", request.note)?,
    };
    sign(&state, &key, draft).await
}

pub async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(ensure_valid_key("alice").is_ok());
        assert!(ensure_valid_key("../sys").is_err());
        assert!(ensure_valid_key("").is_err());
    }

    #[test]
    fn test_b64_decoding() {
        assert_eq!(
            decode_b64("note", Some("aGVsbG8=".into())).unwrap(),
            Some(b"hello".to_vec())
        );
        assert_eq!(decode_b64("note", None).unwrap(), None);
        assert!(decode_b64("note", Some("***".into())).is_err());
    }
}
