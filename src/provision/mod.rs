//! Identity provisioning: create-or-fetch keyed by caller path.
//!
//! # Invariants
//! - Fetch wins over create: an existing secret is never overwritten,
//!   even when it fails to parse
//! - No partial success: if the store write fails, the generated
//!   keypair is discarded and the caller sees an error
//!
//! # Concurrency
//! Provisioning is check-then-act against a shared external store.
//! Two mitigations narrow the race: the store's `put_if_absent`
//! (atomic where the backend supports it) and a per-path async mutex
//! table that serializes same-path calls within this process. Against
//! a store with no conditional write, concurrent provisioning from
//! *separate* processes can still orphan one generated keypair; the
//! losing writer here re-reads and returns the winner's address.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::chain::{Account, Address};
use crate::error::{CustodyError, CustodyResult};
use crate::observability::metrics;
use crate::store::SecretStore;

/// Whether `provision` found an identity or made one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvisionStatus {
    Existing,
    Created,
}

/// Result of a provisioning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedIdentity {
    pub address: Address,
    pub status: ProvisionStatus,
}

/// Create-or-fetch provisioner over a secret store.
pub struct Provisioner {
    store: Arc<dyn SecretStore>,
    // One entry per distinct path seen; entries are tiny and bounded
    // by the identity population, so they are never evicted.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Provisioner {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    fn path_lock(&self, path: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(path.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Return the address stored at `path`, creating and persisting a
    /// fresh identity if the path is empty.
    pub async fn provision(&self, path: &str) -> CustodyResult<ProvisionedIdentity> {
        let lock = self.path_lock(path);
        let _guard = lock.lock().await;

        if let Some(phrase) = self.store.get(path).await? {
            // A stored secret that fails to parse must never be
            // replaced; it may control funds.
            let account = Account::from_phrase(&phrase)
                .map_err(|_| CustodyError::CorruptSecret(path.to_string()))?;
            metrics::record_provision("existing");
            return Ok(ProvisionedIdentity {
                address: account.address(),
                status: ProvisionStatus::Existing,
            });
        }

        let account = Account::generate();
        let phrase = account
            .phrase()
            .map_err(|e| CustodyError::Encoding(e.to_string()))?;

        if !self.store.put_if_absent(path, &phrase).await? {
            // Lost a cross-process race; the winner's secret is
            // authoritative and ours is discarded.
            let phrase = self.store.get(path).await?.ok_or_else(|| {
                CustodyError::StoreWriteFailed(format!(
                    "conditional write to '{}' lost but no secret present",
                    path
                ))
            })?;
            let account = Account::from_phrase(&phrase)
                .map_err(|_| CustodyError::CorruptSecret(path.to_string()))?;
            metrics::record_provision("existing");
            return Ok(ProvisionedIdentity {
                address: account.address(),
                status: ProvisionStatus::Existing,
            });
        }

        let address = account.address();
        tracing::info!(identity = path, address = %address, "identity created");
        metrics::record_provision("created");
        Ok(ProvisionedIdentity {
            address,
            status: ProvisionStatus::Created,
        })
    }
}
