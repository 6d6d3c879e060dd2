//! Integration tests for storefront token resolution.
//!
//! These tests run the credential manager against a mock token endpoint and
//! verify mint counts, option write-back, and failure handling.

use std::sync::Arc;

use bc_storefront::options::{MemoryOptionStore, OptionStore, AUTH_TOKEN};
use bc_storefront::{ClientId, ClientSecret, CredentialManager, HostUrl, StoreConfig, TokenMintError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/stores/abcd1234/v3/storefront/api-token";

/// Creates a configuration whose token endpoint points at the mock server.
fn create_config(server: &MockServer) -> StoreConfig {
    StoreConfig::builder()
        .store_url("https://api.bigcommerce.com/stores/abcd1234/v3/")
        .client_secret(ClientSecret::new("secret-token").unwrap())
        .client_id(ClientId::new("client-42").unwrap())
        .channel_id(1)
        .home_url(HostUrl::new("https://shop.example.com/").unwrap())
        .api_base_url(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// Mounts a token endpoint returning `token`, expected to be hit `calls` times.
async fn mount_token_endpoint(server: &MockServer, token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": token}})))
        .expect(calls)
        .mount(server)
        .await;
}

// === Caching ===

#[tokio::test]
async fn test_two_calls_mint_once() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "minted-once", 1).await;

    let manager =
        CredentialManager::new(create_config(&server), Arc::new(MemoryOptionStore::new()))
            .unwrap();

    let first = manager.get_token().await.unwrap();
    let second = manager.get_token().await.unwrap();

    assert_eq!(first.value(), "minted-once");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_stored_token_is_used_without_minting() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "unused", 0).await;

    let store = Arc::new(MemoryOptionStore::from_pairs([(AUTH_TOKEN, "stored-token")]));
    let manager = CredentialManager::connect(create_config(&server), store)
        .await
        .unwrap();

    let token = manager.get_token().await.unwrap();
    assert_eq!(token.value(), "stored-token");
    assert_eq!(token.expires_at(), None);
}

#[tokio::test]
async fn test_blank_stored_token_is_ignored() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "replacement", 1).await;

    let store = Arc::new(MemoryOptionStore::from_pairs([(AUTH_TOKEN, "   ")]));
    let manager = CredentialManager::new(create_config(&server), store.clone()).unwrap();

    assert_eq!(manager.get_token().await.unwrap().value(), "replacement");
    assert_eq!(
        store.get(AUTH_TOKEN).await.unwrap().as_deref(),
        Some("replacement")
    );
}

// === Minting ===

#[tokio::test]
async fn test_minted_token_is_written_to_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("x-auth-token", "secret-token"))
        .and(header("x-auth-client", "client-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "abc123"}})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryOptionStore::new());
    let manager = CredentialManager::new(create_config(&server), store.clone()).unwrap();

    let token = manager.get_token().await.unwrap();

    assert_eq!(token.value(), "abc123");
    assert_eq!(token.authorization_header(), "Bearer abc123");
    assert_eq!(store.get(AUTH_TOKEN).await.unwrap().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_mint_request_body_carries_channel_expiry_and_origin() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "t", 1).await;

    let manager =
        CredentialManager::new(create_config(&server), Arc::new(MemoryOptionStore::new()))
            .unwrap();
    let before = chrono::Utc::now().timestamp();
    manager.get_token().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["channel_id"], json!(1));
    assert_eq!(body["allowed_cors_origins"], json!(["https://shop.example.com"]));
    let expires_at = body["expires_at"].as_i64().unwrap();
    assert!(expires_at >= before + 100_000_000);
}

#[tokio::test]
async fn test_missing_token_in_response_leaves_options_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryOptionStore::new());
    let manager = CredentialManager::new(create_config(&server), store.clone()).unwrap();

    let result = manager.get_token().await;

    assert!(matches!(
        result,
        Err(TokenMintError::MalformedResponse { status: 200, .. })
    ));
    assert!(store.snapshot().is_empty());
    assert!(!manager.has_cached_token().await);
}

#[tokio::test]
async fn test_rejected_mint_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"title\":\"Forbidden\"}"))
        .mount(&server)
        .await;

    let manager =
        CredentialManager::new(create_config(&server), Arc::new(MemoryOptionStore::new()))
            .unwrap();

    match manager.get_token().await {
        Err(TokenMintError::Rejected { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("Forbidden"));
        }
        other => panic!("Expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_connect_surfaces_mint_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result =
        CredentialManager::connect(create_config(&server), Arc::new(MemoryOptionStore::new()))
            .await;

    let error = result.unwrap_err();
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_mint_timeout_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"token": "late"}}))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = StoreConfig::builder()
        .store_url("https://api.bigcommerce.com/stores/abcd1234/v3/")
        .client_secret(ClientSecret::new("secret-token").unwrap())
        .client_id(ClientId::new("client-42").unwrap())
        .channel_id(1)
        .api_base_url(HostUrl::new(server.uri()).unwrap())
        .request_timeout(std::time::Duration::from_millis(100))
        .build()
        .unwrap();
    let store = Arc::new(MemoryOptionStore::new());
    let manager = CredentialManager::new(config, store.clone()).unwrap();

    let error = manager.get_token().await.unwrap_err();

    assert!(matches!(error, TokenMintError::Http(_)));
    assert!(error.is_retryable());
    assert!(store.snapshot().is_empty());
}

// === Concurrency ===

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_mint_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"token": "shared"}}))
                .set_delay(std::time::Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manager = Arc::new(
        CredentialManager::new(create_config(&server), Arc::new(MemoryOptionStore::new()))
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.get_token().await })
        })
        .collect();

    for handle in handles {
        let token = handle.await.unwrap().unwrap();
        assert_eq!(token.value(), "shared");
    }
}

// === Endpoints ===

#[tokio::test]
async fn test_endpoint_derived_from_store_url() {
    let config = StoreConfig::builder()
        .store_url("https://api.example.com/stores/abcd1234/v2/")
        .client_secret(ClientSecret::new("s").unwrap())
        .client_id(ClientId::new("c").unwrap())
        .channel_id(1)
        .build()
        .unwrap();
    let manager = CredentialManager::new(config, Arc::new(MemoryOptionStore::new())).unwrap();

    assert_eq!(manager.store_hash().as_ref(), "abcd1234");
    assert_eq!(
        manager.token_endpoint(),
        "https://api.bigcommerce.com/stores/abcd1234/v3/storefront/api-token"
    );
}
