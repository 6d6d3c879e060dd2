//! Storefront token management.
//!
//! # Overview
//!
//! - [`CredentialManager`]: resolves, caches, and persists the storefront token
//! - [`BearerToken`]: a storefront token with its expiry, if known
//! - [`mint_token`]: one request to the token issuance endpoint
//! - [`TokenMintError`]: failures while obtaining a token

mod error;
mod manager;
mod mint;
mod token;

pub use error::TokenMintError;
pub use manager::CredentialManager;
pub use mint::{mint_token, AUTH_CLIENT_HEADER, AUTH_TOKEN_HEADER};
pub use token::BearerToken;
