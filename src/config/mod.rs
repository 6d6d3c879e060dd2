//! Store configuration.
//!
//! # Overview
//!
//! - [`StoreConfig`]: immutable settings for one BigCommerce store and channel
//! - [`StoreConfigBuilder`]: builder with required-field validation
//! - [`StoreHash`]: the store identifier derived from the store URL
//! - [`ClientId`], [`ClientSecret`], [`HostUrl`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use bc_storefront::{StoreConfig, ClientId, ClientSecret};
//!
//! let config = StoreConfig::builder()
//!     .store_url("https://api.bigcommerce.com/stores/abcd1234/v3/")
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .client_id(ClientId::new("client").unwrap())
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

mod newtypes;
mod store_hash;

pub use newtypes::{ClientId, ClientSecret, HostUrl};
pub use store_hash::StoreHash;

use std::time::Duration;

use crate::error::ConfigError;
use crate::options::{self, OptionStore};

/// Default base URL of the management API that issues storefront tokens.
pub const DEFAULT_API_BASE_URL: &str = "https://api.bigcommerce.com";

/// Default lifetime requested for minted storefront tokens (about 3.17 years).
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(100_000_000);

/// Default timeout applied to every outbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a single BigCommerce store channel.
///
/// The store hash is derived from `store_url` once, at build time. A URL
/// without a `stores/<hash>/` segment produces an empty hash; this is logged
/// but not rejected, and requests built from it will target a malformed URL.
///
/// `StoreConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    store_url: String,
    store_hash: StoreHash,
    client_secret: ClientSecret,
    client_id: ClientId,
    channel_id: u64,
    channel_name: Option<String>,
    home_url: Option<HostUrl>,
    api_base_url: Option<HostUrl>,
    storefront_base_url: Option<HostUrl>,
    token_lifetime: Duration,
    request_timeout: Duration,
    user_agent_prefix: Option<String>,
}

impl StoreConfig {
    /// Creates a new builder for constructing a `StoreConfig`.
    #[must_use]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Loads a configuration from the option store.
    ///
    /// # Errors
    ///
    /// See [`StoreConfigBuilder::from_options`] and [`StoreConfigBuilder::build`].
    pub async fn from_options(store: &dyn OptionStore) -> Result<Self, ConfigError> {
        StoreConfigBuilder::from_options(store).await?.build()
    }

    /// Returns the configured store URL.
    #[must_use]
    pub fn store_url(&self) -> &str {
        &self.store_url
    }

    /// Returns the store hash derived from the store URL (possibly empty).
    #[must_use]
    pub const fn store_hash(&self) -> &StoreHash {
        &self.store_hash
    }

    /// Returns the API account access token.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the API account client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the storefront channel ID.
    #[must_use]
    pub const fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// Returns the channel display name, if configured.
    #[must_use]
    pub fn channel_name(&self) -> Option<&str> {
        self.channel_name.as_deref()
    }

    /// Returns the site origin allowed to use minted tokens, if configured.
    #[must_use]
    pub const fn home_url(&self) -> Option<&HostUrl> {
        self.home_url.as_ref()
    }

    /// Returns the lifetime requested for minted tokens.
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Returns the timeout applied to outbound requests.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the storefront token issuance URL.
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        let base = self
            .api_base_url
            .as_ref()
            .map_or(DEFAULT_API_BASE_URL, HostUrl::without_trailing_slash);
        format!("{base}/stores/{}/v3/storefront/api-token", self.store_hash)
    }

    /// Returns the storefront GraphQL URL for this store and channel.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        self.storefront_base_url.as_ref().map_or_else(
            || {
                format!(
                    "https://store-{}-{}.mybigcommerce.com/graphql",
                    self.store_hash, self.channel_id
                )
            },
            |base| format!("{}/graphql", base.without_trailing_slash()),
        )
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StoreConfig>();
};

/// Builder for [`StoreConfig`].
///
/// Required: `store_url`, `client_secret`, `client_id`, `channel_id`.
///
/// # Defaults
///
/// - `token_lifetime`: [`DEFAULT_TOKEN_LIFETIME`]
/// - `request_timeout`: [`DEFAULT_REQUEST_TIMEOUT`]
/// - `api_base_url`: [`DEFAULT_API_BASE_URL`]
/// - `storefront_base_url`: `https://store-{hash}-{channel}.mybigcommerce.com`
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    store_url: Option<String>,
    client_secret: Option<ClientSecret>,
    client_id: Option<ClientId>,
    channel_id: Option<u64>,
    channel_name: Option<String>,
    home_url: Option<HostUrl>,
    api_base_url: Option<HostUrl>,
    storefront_base_url: Option<HostUrl>,
    token_lifetime: Option<Duration>,
    request_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl StoreConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder populated from the option store.
    ///
    /// A missing `store_url` is tolerated (the store hash will be empty);
    /// `access_token`, `client_id` and `channel_id` are required.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingOption`] if a required option is absent or empty
    /// - [`ConfigError::InvalidChannelId`] if `channel_id` is not numeric
    /// - [`ConfigError::InvalidHostUrl`] if `home_url` is set but invalid
    /// - [`ConfigError::Store`] if the store cannot be read
    pub async fn from_options(store: &dyn OptionStore) -> Result<Self, ConfigError> {
        let store_url = store.get_non_empty(options::STORE_URL).await?;
        if store_url.is_none() {
            tracing::warn!("Option '{}' is not set; store hash will be empty", options::STORE_URL);
        }

        let client_secret = store
            .get_non_empty(options::ACCESS_TOKEN)
            .await?
            .ok_or(ConfigError::MissingOption {
                key: options::ACCESS_TOKEN,
            })?;
        let client_id = store
            .get_non_empty(options::CLIENT_ID)
            .await?
            .ok_or(ConfigError::MissingOption {
                key: options::CLIENT_ID,
            })?;
        let channel_id = store
            .get_non_empty(options::CHANNEL_ID)
            .await?
            .ok_or(ConfigError::MissingOption {
                key: options::CHANNEL_ID,
            })?;
        let channel_id = parse_channel_id(&channel_id)?;

        let mut builder = Self::new()
            .store_url(store_url.unwrap_or_default())
            .client_secret(ClientSecret::new(client_secret)?)
            .client_id(ClientId::new(client_id)?)
            .channel_id(channel_id);

        if let Some(name) = store.get_non_empty(options::CHANNEL_NAME).await? {
            builder = builder.channel_name(name);
        }
        if let Some(home) = store.get_non_empty(options::HOME_URL).await? {
            builder = builder.home_url(HostUrl::new(home)?);
        }

        Ok(builder)
    }

    /// Sets the store API URL (required). The store hash is derived from it.
    #[must_use]
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = Some(url.into());
        self
    }

    /// Sets the API account access token (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the API account client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the storefront channel ID (required).
    #[must_use]
    pub const fn channel_id(mut self, id: u64) -> Self {
        self.channel_id = Some(id);
        self
    }

    /// Sets the channel display name.
    #[must_use]
    pub fn channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = Some(name.into());
        self
    }

    /// Sets the site whose origin is sent as the allowed CORS origin.
    #[must_use]
    pub fn home_url(mut self, url: HostUrl) -> Self {
        self.home_url = Some(url);
        self
    }

    /// Overrides the token issuance API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: HostUrl) -> Self {
        self.api_base_url = Some(url);
        self
    }

    /// Overrides the storefront base URL that `/graphql` is appended to.
    #[must_use]
    pub fn storefront_base_url(mut self, url: HostUrl) -> Self {
        self.storefront_base_url = Some(url);
        self
    }

    /// Sets the lifetime requested for minted tokens.
    #[must_use]
    pub const fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    /// Sets the timeout applied to outbound requests.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`StoreConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `store_url`,
    /// `client_secret`, `client_id` or `channel_id` are not set.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let store_url = self
            .store_url
            .ok_or(ConfigError::MissingRequiredField { field: "store_url" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let channel_id = self
            .channel_id
            .ok_or(ConfigError::MissingRequiredField {
                field: "channel_id",
            })?;

        let store_hash = StoreHash::from_store_url(&store_url);
        if store_hash.is_empty() {
            tracing::warn!(
                store_url = %store_url,
                "Store URL has no 'stores/<hash>/' segment; requests will use an empty store hash"
            );
        }

        Ok(StoreConfig {
            store_url,
            store_hash,
            client_secret,
            client_id,
            channel_id,
            channel_name: self.channel_name,
            home_url: self.home_url,
            api_base_url: self.api_base_url,
            storefront_base_url: self.storefront_base_url,
            token_lifetime: self.token_lifetime.unwrap_or(DEFAULT_TOKEN_LIFETIME),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn parse_channel_id(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidChannelId {
            value: value.to_string(),
        })
}
