//! Public addresses.
//!
//! An address is the 32-byte ed25519 public key plus a 4-byte
//! SHA-512/256 checksum, rendered in Base58. The checksum catches
//! transcription errors before a transaction is ever built.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use thiserror::Error;

/// Length of the public key component.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Length of the appended checksum.
pub const CHECKSUM_LEN: usize = 4;

/// Errors from parsing an address out of its text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address is not valid base58")]
    Encoding,
    #[error("address has wrong length")]
    Length,
    #[error("address checksum mismatch")]
    Checksum,
}

/// A checksummed public address. Safe to return to callers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    pub fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    /// The raw public key this address wraps.
    pub fn public_key_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    fn checksum(public_key: &[u8; PUBLIC_KEY_LEN]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(public_key);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest[..CHECKSUM_LEN]);
        checksum
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = [0u8; PUBLIC_KEY_LEN + CHECKSUM_LEN];
        bytes[..PUBLIC_KEY_LEN].copy_from_slice(&self.0);
        bytes[PUBLIC_KEY_LEN..].copy_from_slice(&Self::checksum(&self.0));
        write!(f, "{}", bs58::encode(bytes).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| AddressError::Encoding)?;
        if bytes.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(AddressError::Length);
        }

        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(&bytes[..PUBLIC_KEY_LEN]);
        if bytes[PUBLIC_KEY_LEN..] != Self::checksum(&public_key) {
            return Err(AddressError::Checksum);
        }

        Ok(Self(public_key))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
