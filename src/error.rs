//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! credentials are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use bc_storefront::{ClientSecret, ConfigError};
//!
//! let result = ClientSecret::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientSecret)));
//! ```

use crate::options::StoreError;
use thiserror::Error;

/// Errors that can occur while building or loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The client secret (the platform-issued access token) is empty.
    #[error("Client secret cannot be empty. Please provide the API account access token.")]
    EmptyClientSecret,

    /// The client ID is empty.
    #[error("Client ID cannot be empty. Please provide the API account client ID.")]
    EmptyClientId,

    /// A required option is absent or empty in the option store.
    #[error("Missing required option '{key}'. Set it in the option store before connecting.")]
    MissingOption {
        /// The option key that was not found.
        key: &'static str,
    },

    /// The channel ID is not a non-negative integer.
    #[error("Invalid channel ID '{value}'. Expected a numeric channel ID (e.g., '1').")]
    InvalidChannelId {
        /// The value that failed to parse.
        value: String,
    },

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A URL is invalid.
    #[error("Invalid URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The option store could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
};
