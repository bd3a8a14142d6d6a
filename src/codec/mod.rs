//! Response codec: signed transaction → JSON-safe value.
//!
//! # Contract
//! - Raw signature bytes come out as standard base64
//! - Every numeric field stays a u64/u32 JSON integer; nothing is
//!   routed through a float, so amounts beyond 2^53 survive intact
//! - Output is deterministic for a given signed transaction (fixed
//!   field order, no timestamps), which enables golden testing

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::chain::transaction::TransactionBody;
use crate::chain::SignedTransaction;
use crate::error::CustodyResult;

/// JSON-safe form of a signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSignedTransaction {
    pub txid: String,
    /// Base64 of the 64-byte signature.
    pub signature: String,
    pub transaction: EncodedTransaction,
}

/// JSON-safe form of the transaction body. Kind-specific fields are
/// optional and omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EncodedTransaction {
    pub sender: String,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64 note payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_frozen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64 of the 32-byte metadata hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clawback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoke_from: Option<String>,
}

/// Encode a signed transaction for the wire. Pure function: no I/O,
/// no state.
pub fn encode(signed: &SignedTransaction) -> CustodyResult<EncodedSignedTransaction> {
    let tx = &signed.transaction;
    let mut out = EncodedTransaction {
        sender: tx.sender.to_string(),
        fee: tx.fee,
        first_valid: tx.first_valid,
        last_valid: tx.last_valid,
        genesis_id: tx.genesis_id.clone(),
        genesis_hash: tx.genesis_hash.clone(),
        kind: tx.kind().to_string(),
        note: tx.note.as_ref().map(|n| BASE64.encode(n)),
        ..EncodedTransaction::default()
    };

    match &tx.body {
        TransactionBody::Payment {
            receiver,
            amount,
            close_to,
        } => {
            out.receiver = Some(receiver.to_string());
            out.amount = Some(*amount);
            out.close_to = close_to.map(|a| a.to_string());
        }
        TransactionBody::AssetCreate {
            total,
            decimals,
            default_frozen,
            unit_name,
            asset_name,
            url,
            metadata_hash,
            manager,
            reserve,
            freeze,
            clawback,
        } => {
            out.total = Some(*total);
            out.decimals = Some(*decimals);
            out.default_frozen = Some(*default_frozen);
            out.unit_name = unit_name.clone();
            out.asset_name = asset_name.clone();
            out.url = url.clone();
            out.metadata_hash = metadata_hash.as_ref().map(|h| BASE64.encode(h));
            out.manager = Some(manager.to_string());
            out.reserve = Some(reserve.to_string());
            out.freeze = Some(freeze.to_string());
            out.clawback = Some(clawback.to_string());
        }
        TransactionBody::AssetTransfer {
            asset_id,
            amount,
            receiver,
            close_to,
            revoke_from,
        } => {
            out.asset_id = Some(*asset_id);
            out.amount = Some(*amount);
            out.receiver = Some(receiver.to_string());
            out.close_to = close_to.map(|a| a.to_string());
            out.revoke_from = revoke_from.map(|a| a.to_string());
        }
        TransactionBody::AssetOptIn { asset_id } => {
            out.asset_id = Some(*asset_id);
            out.amount = Some(0);
        }
        TransactionBody::AssetOptOut { asset_id, close_to } => {
            out.asset_id = Some(*asset_id);
            out.amount = Some(0);
            out.close_to = Some(close_to.to_string());
        }
    }

    Ok(EncodedSignedTransaction {
        txid: signed.id()?,
        signature: BASE64.encode(signed.signature),
        transaction: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Account, Address, Transaction};

    fn signed_payment(amount: u64) -> SignedTransaction {
        let account = Account::generate();
        let transaction = Transaction {
            sender: account.address(),
            fee: 1000,
            first_valid: 1,
            last_valid: 1001,
            genesis_id: "test-v1".into(),
            genesis_hash: "aGFzaA==".into(),
            note: Some(b"hello".to_vec()),
            body: TransactionBody::Payment {
                receiver: Address::new([3u8; 32]),
                amount,
                close_to: None,
            },
        };
        let signature = account.sign(&transaction.bytes_to_sign().unwrap());
        SignedTransaction {
            transaction,
            signature,
        }
    }

    #[test]
    fn test_signature_is_base64_of_64_bytes() {
        let encoded = encode(&signed_payment(5)).unwrap();
        let raw = BASE64.decode(&encoded.signature).unwrap();
        assert_eq!(raw.len(), 64);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let signed = signed_payment(5);
        let a = serde_json::to_string(&encode(&signed).unwrap()).unwrap();
        let b = serde_json::to_string(&encode(&signed).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_amount_survives_json() {
        // 2^53: past the exact-integer range of an f64.
        let amount = 1u64 << 53;
        let encoded = encode(&signed_payment(amount)).unwrap();
        let value = serde_json::to_value(&encoded).unwrap();
        assert_eq!(
            value["transaction"]["amount"].as_u64().unwrap(),
            9_007_199_254_740_992
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let encoded = encode(&signed_payment(5)).unwrap();
        let value = serde_json::to_value(&encoded).unwrap();
        let tx = value["transaction"].as_object().unwrap();
        assert!(!tx.contains_key("asset_id"));
        assert!(!tx.contains_key("close_to"));
        assert_eq!(tx["type"], "payment");
        assert_eq!(tx["note"], BASE64.encode(b"hello"));
    }

    #[test]
    fn test_opt_out_encodes_close_to() {
        let account = Account::generate();
        let transaction = Transaction {
            sender: account.address(),
            fee: 1000,
            first_valid: 1,
            last_valid: 1001,
            genesis_id: "test-v1".into(),
            genesis_hash: "aGFzaA==".into(),
            note: None,
            body: TransactionBody::AssetOptOut {
                asset_id: 42,
                close_to: Address::new([8u8; 32]),
            },
        };
        let signature = account.sign(&transaction.bytes_to_sign().unwrap());
        let encoded = encode(&SignedTransaction {
            transaction,
            signature,
        })
        .unwrap();

        assert_eq!(encoded.transaction.kind, "asset-opt-out");
        assert_eq!(encoded.transaction.asset_id, Some(42));
        assert!(encoded.transaction.close_to.is_some());
    }
}
