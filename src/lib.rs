//! # BigCommerce Storefront Library
//!
//! Obtains a BigCommerce storefront API token and queries the storefront
//! GraphQL API with it.
//!
//! ## Overview
//!
//! This library provides:
//! - Type-safe configuration via [`StoreConfig`] and [`StoreConfigBuilder`]
//! - Validated newtypes for API credentials and URLs
//! - Store hash extraction from the store API URL via [`StoreHash`]
//! - Named option persistence via [`options::OptionStore`]
//! - Storefront token minting, caching, and write-back via [`CredentialManager`]
//! - Authorized GraphQL queries against the storefront via [`CatalogClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bc_storefront::{ClientId, ClientSecret, StoreConfig};
//!
//! let config = StoreConfig::builder()
//!     .store_url("https://api.bigcommerce.com/stores/abcd1234/v3/")
//!     .client_secret(ClientSecret::new("your-access-token").unwrap())
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .channel_id(1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.store_hash().as_ref(), "abcd1234");
//! assert_eq!(
//!     config.token_endpoint(),
//!     "https://api.bigcommerce.com/stores/abcd1234/v3/storefront/api-token"
//! );
//! assert_eq!(
//!     config.graphql_endpoint(),
//!     "https://store-abcd1234-1.mybigcommerce.com/graphql"
//! );
//! ```
//!
//! ## Loading Configuration From Options
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bc_storefront::{CatalogClient, CredentialManager, StoreConfig};
//! use bc_storefront::options::JsonFileOptionStore;
//!
//! let store = Arc::new(JsonFileOptionStore::new("bigcommerce.json"));
//! let config = StoreConfig::from_options(&*store).await?;
//!
//! // Resolves the token from `auth_token` or mints and stores a new one
//! let credentials = Arc::new(CredentialManager::connect(config, store).await?);
//!
//! let catalog = CatalogClient::new(credentials);
//! println!("{}", catalog.render_catalog_page().await?);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and token state are instance-based
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod options;

// Re-export public types at crate root for convenience
pub use auth::{mint_token, BearerToken, CredentialManager, TokenMintError};
pub use catalog::{CatalogClient, QueryError};
pub use config::{ClientId, ClientSecret, HostUrl, StoreConfig, StoreConfigBuilder, StoreHash};
pub use error::ConfigError;
pub use options::{OptionStore, StoreError};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError,
};
