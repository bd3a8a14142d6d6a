//! Secret store boundary.
//!
//! # Data Flow
//! ```text
//! Provisioner / TransactionSigner
//!     → SecretStore trait (get / put / put_if_absent)
//!     → vault.rs (Vault cubbyhole HTTP API, bearer token, timeout)
//!     → memory.rs (in-process map for tests and local development)
//! ```
//!
//! # Security Constraints
//! - Secrets cross this boundary wrapped in `Zeroizing` buffers
//! - The bearer token is injected at construction, never read from
//!   ambient state inside request handling
//! - A path outside the safe character set reads as "not found"

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::error::CustodyResult;

pub mod memory;
pub mod vault;

pub use memory::MemoryStore;
pub use vault::VaultClient;

/// Longest identity path accepted by the service.
pub const MAX_PATH_LEN: usize = 128;

/// Whether `path` is a usable secret-store path: non-empty, bounded,
/// restricted to `[A-Za-z0-9._-]`.
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.len() <= MAX_PATH_LEN
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}

/// A cubbyhole-style store of one secret blob per path.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret at `path`, or `None` if nothing is stored there.
    async fn get(&self, path: &str) -> CustodyResult<Option<Zeroizing<String>>>;

    /// Store `value` at `path`, overwriting whatever is there.
    async fn put(&self, path: &str, value: &str) -> CustodyResult<()>;

    /// Store `value` at `path` only if the path is empty. Returns
    /// `true` if the write landed, `false` if another value already
    /// existed.
    ///
    /// The default implementation is check-then-put and therefore NOT
    /// atomic across processes; stores with a native conditional
    /// primitive override it. The `Provisioner` serializes same-path
    /// calls in process to narrow the window for stores that cannot.
    async fn put_if_absent(&self, path: &str, value: &str) -> CustodyResult<bool> {
        if self.get(path).await?.is_some() {
            return Ok(false);
        }
        self.put(path, value).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_charset() {
        assert!(is_valid_path("alice"));
        assert!(is_valid_path("team-7.bob_01"));
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("a/b"));
        assert!(!is_valid_path("spaced out"));
        assert!(!is_valid_path("../cubbyhole"));
    }

    #[test]
    fn test_path_length_bound() {
        assert!(is_valid_path(&"a".repeat(MAX_PATH_LEN)));
        assert!(!is_valid_path(&"a".repeat(MAX_PATH_LEN + 1)));
    }
}
