//! Vault cubbyhole client behavior against an in-process stub.

use std::sync::atomic::Ordering;

use custodian::config::VaultConfig;
use custodian::error::CustodyError;
use custodian::store::{SecretStore, VaultClient};

mod common;
use common::spawn_vault_stub;

const TOKEN: &str = "s.test-token";

fn client_for(address: &str) -> VaultClient {
    let config = VaultConfig {
        address: address.to_string(),
        timeout_secs: 2,
        ..VaultConfig::default()
    };
    VaultClient::new(&config, TOKEN.to_string()).unwrap()
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let (url, _stub) = spawn_vault_stub(TOKEN).await;
    let client = client_for(&url);
    assert!(client.get("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let (url, stub) = spawn_vault_stub(TOKEN).await;
    let client = client_for(&url);

    client.put("alice", "word one two").await.unwrap();
    let value = client.get("alice").await.unwrap().unwrap();
    assert_eq!(&*value, "word one two");
    assert_eq!(
        stub.secrets.read().await.get("alice").map(String::as_str),
        Some("word one two")
    );
}

#[tokio::test]
async fn test_rejected_write_is_store_write_failed() {
    let (url, stub) = spawn_vault_stub(TOKEN).await;
    stub.reject_writes.store(true, Ordering::SeqCst);

    let client = client_for(&url);
    let result = client.put("alice", "value").await;
    assert!(matches!(result, Err(CustodyError::StoreWriteFailed(_))));
    assert!(stub.secrets.read().await.is_empty());
}

#[tokio::test]
async fn test_unreachable_store_is_unavailable() {
    // Nothing listens on this port.
    let client = client_for("http://127.0.0.1:9");
    let result = client.get("alice").await;
    assert!(matches!(result, Err(CustodyError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_wrong_token_is_unavailable_not_missing() {
    let (url, stub) = spawn_vault_stub("s.other-token").await;
    stub.secrets
        .write()
        .await
        .insert("alice".into(), "secret words".into());

    let client = client_for(&url);
    // 403 must not read as "not found": that would trigger re-creation.
    let result = client.get("alice").await;
    assert!(matches!(result, Err(CustodyError::StoreUnavailable(_))));
}

#[tokio::test]
async fn test_missing_secret_field_is_corrupt() {
    let (url, _stub) = spawn_vault_stub(TOKEN).await;
    let client = client_for(&url);
    let result = client.get("empty-envelope").await;
    assert!(matches!(result, Err(CustodyError::CorruptSecret(_))));
}

#[tokio::test]
async fn test_invalid_path_reads_as_not_found_and_refuses_writes() {
    let (url, stub) = spawn_vault_stub(TOKEN).await;
    let client = client_for(&url);

    assert!(client.get("a/../b").await.unwrap().is_none());
    assert!(matches!(
        client.put("a/../b", "v").await,
        Err(CustodyError::StoreWriteFailed(_))
    ));
    assert!(stub.secrets.read().await.is_empty());
}
