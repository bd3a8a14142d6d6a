//! Transactions: the closed kind enum, canonical signing bytes, and
//! the signed result.
//!
//! # Design Decisions
//! - One tagged enum per transaction kind; dispatch is a `match`,
//!   never string-keyed
//! - The canonical encoding is bincode of the full transaction,
//!   domain-separated with a `"TX"` prefix; the txid is the
//!   SHA-512/256 of those bytes in Base58
//! - `SignedTransaction` is immutable and never stored by the service

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};

use crate::chain::address::Address;
use crate::error::{CustodyError, CustodyResult};

/// Domain separator prepended to the canonical encoding before signing.
pub const SIGN_PREFIX: &[u8] = b"TX";

/// Protocol length limits, enforced at draft validation.
pub const MAX_UNIT_NAME_LEN: usize = 8;
pub const MAX_ASSET_NAME_LEN: usize = 32;
pub const MAX_ASSET_URL_LEN: usize = 96;
pub const METADATA_HASH_LEN: usize = 32;
pub const MAX_NOTE_LEN: usize = 1024;
/// A u64 supply cannot be subdivided beyond 10^19.
pub const MAX_DECIMALS: u32 = 19;

/// Kind-specific transaction content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    Payment {
        receiver: Address,
        amount: u64,
        close_to: Option<Address>,
    },
    AssetCreate {
        total: u64,
        decimals: u32,
        default_frozen: bool,
        unit_name: Option<String>,
        asset_name: Option<String>,
        url: Option<String>,
        metadata_hash: Option<[u8; METADATA_HASH_LEN]>,
        manager: Address,
        reserve: Address,
        freeze: Address,
        clawback: Address,
    },
    AssetTransfer {
        asset_id: u64,
        amount: u64,
        receiver: Address,
        close_to: Option<Address>,
        revoke_from: Option<Address>,
    },
    AssetOptIn {
        asset_id: u64,
    },
    AssetOptOut {
        asset_id: u64,
        close_to: Address,
    },
}

/// An unsigned transaction: caller intent merged with network
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
    pub note: Option<Vec<u8>>,
    pub body: TransactionBody,
}

impl Transaction {
    /// Canonical bytes covered by the signature.
    pub fn bytes_to_sign(&self) -> CustodyResult<Vec<u8>> {
        let encoded =
            bincode::serialize(self).map_err(|e| CustodyError::Encoding(e.to_string()))?;
        let mut message = Vec::with_capacity(SIGN_PREFIX.len() + encoded.len());
        message.extend_from_slice(SIGN_PREFIX);
        message.extend_from_slice(&encoded);
        Ok(message)
    }

    /// Transaction id: Base58 of the SHA-512/256 of the signing bytes.
    pub fn id(&self) -> CustodyResult<String> {
        let digest = Sha512_256::digest(self.bytes_to_sign()?);
        Ok(bs58::encode(digest).into_string())
    }

    /// Stable kind tag, used in responses, logs, and metrics.
    pub fn kind(&self) -> &'static str {
        match self.body {
            TransactionBody::Payment { .. } => "payment",
            TransactionBody::AssetCreate { .. } => "asset-create",
            TransactionBody::AssetTransfer { .. } => "asset-transfer",
            TransactionBody::AssetOptIn { .. } => "asset-opt-in",
            TransactionBody::AssetOptOut { .. } => "asset-opt-out",
        }
    }
}

/// The immutable result of signing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: [u8; 64],
}

impl SignedTransaction {
    pub fn id(&self) -> CustodyResult<String> {
        self.transaction.id()
    }

    /// Check the signature against the sender's public key.
    pub fn verify(&self) -> bool {
        use ed25519_dalek::{Signature, VerifyingKey};

        let Ok(message) = self.transaction.bytes_to_sign() else {
            return false;
        };
        let Ok(key) = VerifyingKey::from_bytes(self.transaction.sender.public_key_bytes()) else {
            return false;
        };
        key.verify_strict(&message, &Signature::from_bytes(&self.signature))
            .is_ok()
    }
}
