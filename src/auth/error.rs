//! Token issuance error types.
//!
//! # Example
//!
//! ```rust
//! use bc_storefront::auth::TokenMintError;
//!
//! let error = TokenMintError::Rejected {
//!     status: 403,
//!     message: "You don't have a required scope".to_string(),
//! };
//! assert!(error.to_string().contains("403"));
//! assert!(!error.is_retryable());
//! ```

use crate::clients::HttpError;
use crate::options::StoreError;
use thiserror::Error;

/// Errors that can occur while obtaining a storefront token.
///
/// When any of these is returned from a mint, the option store has not been
/// modified.
#[derive(Debug, Error)]
pub enum TokenMintError {
    /// The token endpoint answered with a non-2xx status.
    #[error("Storefront token request failed with status {status}: {message}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        message: String,
    },

    /// The token endpoint answered 2xx but the body has no usable `data.token`.
    #[error("Malformed storefront token response (status {status}): {reason}")]
    MalformedResponse {
        /// The HTTP status code returned.
        status: u16,
        /// What was wrong with the body.
        reason: String,
    },

    /// The token request body could not be encoded.
    #[error("Failed to encode storefront token request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The request could not be sent or no response was received.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The cached token could not be read from or written to the option store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TokenMintError {
    /// Returns `true` for failures that may succeed if attempted again:
    /// timeouts, rate limiting, and server errors.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Http(e) => e.is_timeout(),
            Self::MalformedResponse { .. } | Self::Encode(_) | Self::Store(_) => false,
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenMintError>();
};
