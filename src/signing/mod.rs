//! Transaction building and signing.
//!
//! # Responsibilities
//! - Resolve the signing key from the secret store (never creates)
//! - Merge caller intent with suggested network parameters
//! - Validate kind-specific draft fields
//! - Sign and hand back the immutable result
//!
//! Key material exists only for the span of `build_and_sign`; the
//! derived `Account` is dropped (and zeroized) before returning.

use std::sync::Arc;

use crate::chain::transaction::{
    Transaction, TransactionBody, MAX_ASSET_NAME_LEN, MAX_ASSET_URL_LEN, MAX_DECIMALS,
    MAX_NOTE_LEN, MAX_UNIT_NAME_LEN, METADATA_HASH_LEN,
};
use crate::chain::{Account, Address, ParamsSource, SignedTransaction};
use crate::error::{CustodyError, CustodyResult};
use crate::observability::metrics;
use crate::store::SecretStore;

/// Caller intent for one transaction, before network parameters are
/// applied. Closed set: one variant per supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionDraft {
    Payment {
        receiver: String,
        amount: u64,
        close_to: Option<String>,
        note: Option<Vec<u8>>,
    },
    AssetCreate {
        total: u64,
        decimals: u32,
        default_frozen: bool,
        unit_name: Option<String>,
        asset_name: Option<String>,
        url: Option<String>,
        metadata_hash: Option<Vec<u8>>,
        note: Option<Vec<u8>>,
    },
    AssetTransfer {
        asset_id: u64,
        amount: u64,
        receiver: String,
        close_to: Option<String>,
        revoke_from: Option<String>,
        note: Option<Vec<u8>>,
    },
    AssetOptIn {
        asset_id: u64,
    },
    AssetOptOut {
        asset_id: u64,
        close_to: String,
        note: Option<Vec<u8>>,
    },
}

/// Builds and signs transactions on behalf of provisioned identities.
pub struct TransactionSigner {
    store: Arc<dyn SecretStore>,
    params: Arc<dyn ParamsSource>,
}

impl TransactionSigner {
    pub fn new(store: Arc<dyn SecretStore>, params: Arc<dyn ParamsSource>) -> Self {
        Self { store, params }
    }

    /// Resolve the identity at `path`, build the requested
    /// transaction, and sign it.
    pub async fn build_and_sign(
        &self,
        path: &str,
        draft: TransactionDraft,
    ) -> CustodyResult<SignedTransaction> {
        let phrase = self
            .store
            .get(path)
            .await?
            .ok_or_else(|| CustodyError::IdentityNotFound(path.to_string()))?;
        let account = Account::from_phrase(&phrase)
            .map_err(|_| CustodyError::CorruptSecret(path.to_string()))?;
        let sender = account.address();

        let params = self.params.suggested_params().await?;
        let (body, note) = build_body(sender, draft)?;

        let transaction = Transaction {
            sender,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id,
            genesis_hash: params.genesis_hash,
            note,
            body,
        };

        let signature = account.sign(&transaction.bytes_to_sign()?);
        let signed = SignedTransaction {
            transaction,
            signature,
        };

        tracing::debug!(
            identity = path,
            kind = signed.transaction.kind(),
            "transaction signed"
        );
        metrics::record_signed(signed.transaction.kind());
        Ok(signed)
    }
}

/// Validate a draft and produce the transaction body plus note.
fn build_body(
    sender: Address,
    draft: TransactionDraft,
) -> CustodyResult<(TransactionBody, Option<Vec<u8>>)> {
    match draft {
        TransactionDraft::Payment {
            receiver,
            amount,
            close_to,
            note,
        } => {
            let body = TransactionBody::Payment {
                receiver: parse_address("receiver", &receiver)?,
                amount,
                close_to: parse_opt_address("close_to", close_to)?,
            };
            Ok((body, check_note(note)?))
        }

        TransactionDraft::AssetCreate {
            total,
            decimals,
            default_frozen,
            unit_name,
            asset_name,
            url,
            metadata_hash,
            note,
        } => {
            if total == 0 {
                return Err(invalid("total", "total supply must be greater than zero"));
            }
            if decimals > MAX_DECIMALS {
                return Err(invalid("decimals", format!("must be at most {MAX_DECIMALS}")));
            }
            check_len("unit_name", unit_name.as_deref(), MAX_UNIT_NAME_LEN)?;
            check_len("asset_name", asset_name.as_deref(), MAX_ASSET_NAME_LEN)?;
            check_len("url", url.as_deref(), MAX_ASSET_URL_LEN)?;
            let metadata_hash = metadata_hash
                .map(|bytes| {
                    <[u8; METADATA_HASH_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
                        invalid(
                            "metadata_hash",
                            format!("must be exactly {METADATA_HASH_LEN} bytes"),
                        )
                    })
                })
                .transpose()?;

            // Baseline policy: the sender owns every asset role.
            let body = TransactionBody::AssetCreate {
                total,
                decimals,
                default_frozen,
                unit_name,
                asset_name,
                url,
                metadata_hash,
                manager: sender,
                reserve: sender,
                freeze: sender,
                clawback: sender,
            };
            Ok((body, check_note(note)?))
        }

        TransactionDraft::AssetTransfer {
            asset_id,
            amount,
            receiver,
            close_to,
            revoke_from,
            note,
        } => {
            // The asset id is not verified locally; the protocol
            // rejects transfers of nonexistent assets.
            let body = TransactionBody::AssetTransfer {
                asset_id,
                amount,
                receiver: parse_address("receiver", &receiver)?,
                close_to: parse_opt_address("close_to", close_to)?,
                revoke_from: parse_opt_address("revoke_from", revoke_from)?,
            };
            Ok((body, check_note(note)?))
        }

        TransactionDraft::AssetOptIn { asset_id } => {
            Ok((TransactionBody::AssetOptIn { asset_id }, None))
        }

        TransactionDraft::AssetOptOut {
            asset_id,
            close_to,
            note,
        } => {
            let body = TransactionBody::AssetOptOut {
                asset_id,
                close_to: parse_address("close_to", &close_to)?,
            };
            Ok((body, check_note(note)?))
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CustodyError {
    CustodyError::InvalidDraftField {
        field,
        reason: reason.into(),
    }
}

fn parse_address(field: &'static str, text: &str) -> CustodyResult<Address> {
    text.parse::<Address>()
        .map_err(|e| invalid(field, e.to_string()))
}

fn parse_opt_address(field: &'static str, text: Option<String>) -> CustodyResult<Option<Address>> {
    text.map(|t| parse_address(field, &t)).transpose()
}

fn check_len(field: &'static str, value: Option<&str>, max: usize) -> CustodyResult<()> {
    match value {
        Some(v) if v.len() > max => Err(invalid(field, format!("must be at most {max} bytes"))),
        _ => Ok(()),
    }
}

fn check_note(note: Option<Vec<u8>>) -> CustodyResult<Option<Vec<u8>>> {
    match note {
        Some(n) if n.len() > MAX_NOTE_LEN => Err(invalid(
            "note",
            format!("must be at most {MAX_NOTE_LEN} bytes"),
        )),
        other => Ok(other),
    }
}
