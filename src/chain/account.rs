//! Keypairs and recovery phrases.
//!
//! # Security
//! - The signing key is zeroized on drop (`ed25519-dalek` `zeroize`)
//! - Seed and entropy buffers are `Zeroizing`, scrubbed on every exit
//!   path
//! - An `Account` is request-scoped: derived, used, dropped

use bip39::Mnemonic;
use ed25519_dalek::{Signer as _, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::chain::address::Address;

/// Seed length in bytes; encodes as a 24-word phrase.
pub const SEED_LEN: usize = 32;

/// Errors from decoding or encoding a recovery phrase.
///
/// Deliberately carries no detail from the phrase itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseError {
    #[error("not a valid recovery phrase")]
    Malformed,
    #[error("recovery phrase does not encode a {SEED_LEN}-byte seed")]
    SeedLength,
}

/// A request-scoped keypair.
#[derive(Debug, PartialEq)]
pub struct Account {
    key: SigningKey,
}

impl Account {
    /// Generate a fresh keypair from the OS random source.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        OsRng.fill_bytes(&mut *seed);
        Self {
            key: SigningKey::from_bytes(&seed),
        }
    }

    /// Reconstruct the keypair from its recovery phrase.
    pub fn from_phrase(phrase: &str) -> Result<Self, PhraseError> {
        let mnemonic =
            Mnemonic::parse_normalized(phrase.trim()).map_err(|_| PhraseError::Malformed)?;
        let entropy = Zeroizing::new(mnemonic.to_entropy());
        if entropy.len() != SEED_LEN {
            return Err(PhraseError::SeedLength);
        }

        let mut seed = Zeroizing::new([0u8; SEED_LEN]);
        seed.copy_from_slice(&entropy);
        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    /// Encode the keypair's seed as a recovery phrase.
    pub fn phrase(&self) -> Result<Zeroizing<String>, PhraseError> {
        let seed = Zeroizing::new(self.key.to_bytes());
        let mnemonic = Mnemonic::from_entropy(&*seed).map_err(|_| PhraseError::SeedLength)?;
        Ok(Zeroizing::new(mnemonic.to_string()))
    }

    /// The public address derived from this keypair.
    pub fn address(&self) -> Address {
        Address::new(self.key.verifying_key().to_bytes())
    }

    /// Sign a prepared message, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.key.sign(message).to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, VerifyingKey};

    #[test]
    fn test_phrase_round_trip_preserves_address() {
        let account = Account::generate();
        let phrase = account.phrase().unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);

        let restored = Account::from_phrase(&phrase).unwrap();
        assert_eq!(restored.address(), account.address());
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        assert_ne!(Account::generate().address(), Account::generate().address());
    }

    #[test]
    fn test_rejects_garbage_phrase() {
        assert_eq!(
            Account::from_phrase("definitely not a phrase"),
            Err(PhraseError::Malformed)
        );
    }

    #[test]
    fn test_rejects_short_phrase() {
        // A valid 12-word phrase carries only 16 bytes of entropy.
        let twelve = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";
        assert_eq!(Account::from_phrase(twelve), Err(PhraseError::SeedLength));
    }

    #[test]
    fn test_signature_verifies_against_address() {
        let account = Account::generate();
        let message = b"spend 5";
        let signature = account.sign(message);

        let key = VerifyingKey::from_bytes(account.address().public_key_bytes()).unwrap();
        assert!(key
            .verify_strict(message, &Signature::from_bytes(&signature))
            .is_ok());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let account = Account::generate();
        assert_eq!(account.sign(b"payload"), account.sign(b"payload"));
    }
}
