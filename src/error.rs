//! Service-wide error taxonomy.
//!
//! One closed enum covers every failure the service can surface.
//! Messages name the failing identity *path* when relevant, never the
//! secret stored there; stored phrases and key material must not leak
//! through an error.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type CustodyResult<T> = Result<T, CustodyError>;

/// Every failure the custody service can report.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// No identity is provisioned at the given path.
    #[error("no identity provisioned at '{0}'")]
    IdentityNotFound(String),

    /// A secret exists at the path but does not decode to a usable
    /// keypair. The stored value is preserved, never overwritten.
    #[error("secret at '{0}' is present but unusable")]
    CorruptSecret(String),

    /// The store rejected a write.
    #[error("secret store write failed: {0}")]
    StoreWriteFailed(String),

    /// The store could not be reached or answered abnormally.
    #[error("secret store unavailable: {0}")]
    StoreUnavailable(String),

    /// Current chain parameters could not be fetched.
    #[error("chain parameters unavailable: {0}")]
    ChainParameterUnavailable(String),

    /// A caller-supplied draft field failed validation.
    #[error("invalid field '{field}': {reason}")]
    InvalidDraftField { field: &'static str, reason: String },

    /// Canonical encoding failed.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl CustodyError {
    /// Stable machine-readable tag, used in response bodies and
    /// metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            CustodyError::IdentityNotFound(_) => "identity-not-found",
            CustodyError::CorruptSecret(_) => "corrupt-secret",
            CustodyError::StoreWriteFailed(_) => "store-write-failed",
            CustodyError::StoreUnavailable(_) => "store-unavailable",
            CustodyError::ChainParameterUnavailable(_) => "chain-params-unavailable",
            CustodyError::InvalidDraftField { .. } => "invalid-draft-field",
            CustodyError::Encoding(_) => "encoding",
        }
    }

    /// Whether the failure is the caller's fault (4xx) rather than the
    /// service's (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CustodyError::IdentityNotFound(_) | CustodyError::InvalidDraftField { .. }
        )
    }
}
