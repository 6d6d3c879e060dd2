//! Storefront token lifecycle.
//!
//! [`CredentialManager`] owns the store configuration and the current
//! storefront token. Token resolution order:
//!
//! 1. The token held in memory, unless it was minted here and has expired
//! 2. The `auth_token` option, if non-empty
//! 3. A newly minted token, written to `auth_token` before it is returned
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bc_storefront::{CredentialManager, StoreConfig};
//! use bc_storefront::options::JsonFileOptionStore;
//!
//! let store = Arc::new(JsonFileOptionStore::new("bigcommerce.json"));
//! let config = StoreConfig::from_options(&*store).await?;
//! let credentials = CredentialManager::connect(config, store).await?;
//!
//! let token = credentials.get_token().await?;
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::mint::mint_token;
use crate::auth::{BearerToken, TokenMintError};
use crate::clients::HttpClient;
use crate::config::{StoreConfig, StoreHash};
use crate::options::{OptionStore, AUTH_TOKEN};

#[derive(Debug)]
enum TokenState {
    NoToken,
    Cached(BearerToken),
}

/// Produces storefront tokens on demand while minimizing mint calls.
///
/// # Concurrency
///
/// The token state is guarded by an async mutex that is held across the
/// option store lookup and the mint request. Callers that arrive while a
/// mint is in flight wait for it and receive its token, so a burst of
/// concurrent first requests results in one mint.
///
/// `CredentialManager` is `Send + Sync`; share it with an `Arc`.
pub struct CredentialManager {
    config: StoreConfig,
    store: Arc<dyn OptionStore>,
    http_client: HttpClient,
    state: Mutex<TokenState>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CredentialManager>();
};

impl std::fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialManager")
            .field("config", &self.config)
            .field("http_client", &self.http_client)
            .finish_non_exhaustive()
    }
}

impl CredentialManager {
    /// Creates a manager with no token resolved yet.
    ///
    /// # Errors
    ///
    /// Returns [`TokenMintError::Http`] if the HTTP client cannot be built.
    pub fn new(config: StoreConfig, store: Arc<dyn OptionStore>) -> Result<Self, TokenMintError> {
        let http_client = HttpClient::new(&config)?;
        Ok(Self::with_http_client(config, store, http_client))
    }

    /// Creates a manager that sends its requests through `http_client`.
    #[must_use]
    pub fn with_http_client(
        config: StoreConfig,
        store: Arc<dyn OptionStore>,
        http_client: HttpClient,
    ) -> Self {
        tracing::debug!(
            store_hash = %config.store_hash(),
            channel_id = config.channel_id(),
            "Credential manager created"
        );
        Self {
            config,
            store,
            http_client,
            state: Mutex::new(TokenState::NoToken),
        }
    }

    /// Creates a manager and resolves a token immediately.
    ///
    /// # Errors
    ///
    /// Returns any error from [`new`](Self::new) or [`get_token`](Self::get_token).
    pub async fn connect(
        config: StoreConfig,
        store: Arc<dyn OptionStore>,
    ) -> Result<Self, TokenMintError> {
        let manager = Self::new(config, store)?;
        manager.get_token().await?;
        Ok(manager)
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the store hash derived from the configured store URL.
    #[must_use]
    pub const fn store_hash(&self) -> &StoreHash {
        self.config.store_hash()
    }

    /// Returns the URL tokens are minted from.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        self.config.token_endpoint()
    }

    /// Returns the HTTP client shared with dependent clients.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns `true` if a token is currently held in memory.
    ///
    /// Intended for diagnostics such as health output. It does not read the
    /// option store, so `false` does not mean the next
    /// [`get_token`](Self::get_token) will mint.
    pub async fn has_cached_token(&self) -> bool {
        matches!(*self.state.lock().await, TokenState::Cached(_))
    }

    /// Returns the current storefront token, minting one if necessary.
    ///
    /// Once a token is held in memory, calls do no I/O until it expires or
    /// is dropped with [`invalidate`](Self::invalidate) or [`clear`](Self::clear).
    ///
    /// # Errors
    ///
    /// - [`TokenMintError::Store`] if the option store cannot be read or written
    /// - Any mint error; the option store is not modified in that case
    pub async fn get_token(&self) -> Result<BearerToken, TokenMintError> {
        let mut state = self.state.lock().await;

        if let TokenState::Cached(token) = &*state {
            if !token.expired() {
                return Ok(token.clone());
            }
            tracing::info!("Storefront token expired; minting a replacement");
        } else if let Some(value) = self.store.get_non_empty(AUTH_TOKEN).await? {
            tracing::debug!("Using storefront token from option store");
            let token = BearerToken::new(value, None);
            *state = TokenState::Cached(token.clone());
            return Ok(token);
        }

        let token = mint_token(&self.http_client, &self.config).await?;
        self.store.set(AUTH_TOKEN, token.value()).await?;
        *state = TokenState::Cached(token.clone());
        Ok(token)
    }

    /// Drops the in-memory token. The next [`get_token`](Self::get_token)
    /// reads the `auth_token` option again.
    pub async fn invalidate(&self) {
        *self.state.lock().await = TokenState::NoToken;
        tracing::debug!("Storefront token invalidated");
    }

    /// Drops the in-memory token and blanks the `auth_token` option, so the
    /// next [`get_token`](Self::get_token) mints a new token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenMintError::Store`] if the option cannot be written; the
    /// in-memory token is kept in that case.
    pub async fn clear(&self) -> Result<(), TokenMintError> {
        let mut state = self.state.lock().await;
        self.store.set(AUTH_TOKEN, "").await?;
        *state = TokenState::NoToken;
        tracing::info!("Storefront token cleared");
        Ok(())
    }
}
