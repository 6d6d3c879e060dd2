//! Named option storage.
//!
//! The hosting application keeps the store configuration and the cached
//! storefront token as named string options. This module defines the
//! [`OptionStore`] seam and two implementations:
//!
//! - [`MemoryOptionStore`]: options held in process memory
//! - [`JsonFileOptionStore`]: options persisted as a JSON object on disk
//!
//! # Keys
//!
//! | Key            | Meaning                                        |
//! |----------------|------------------------------------------------|
//! | `store_url`    | API path of the store, containing the hash     |
//! | `access_token` | API account access token (the client secret)   |
//! | `client_id`    | API account client ID                          |
//! | `channel_id`   | Numeric storefront channel ID                  |
//! | `channel_name` | Display name of the channel                    |
//! | `home_url`     | Site origin allowed to use the storefront token|
//! | `auth_token`   | Cached storefront bearer token (written back)  |

mod file;
mod memory;

pub use file::JsonFileOptionStore;
pub use memory::MemoryOptionStore;

use async_trait::async_trait;
use thiserror::Error;

/// Option key for the store API URL.
pub const STORE_URL: &str = "store_url";
/// Option key for the API account access token.
pub const ACCESS_TOKEN: &str = "access_token";
/// Option key for the API account client ID.
pub const CLIENT_ID: &str = "client_id";
/// Option key for the storefront channel ID.
pub const CHANNEL_ID: &str = "channel_id";
/// Option key for the storefront channel name.
pub const CHANNEL_NAME: &str = "channel_name";
/// Option key for the site origin sent as the allowed CORS origin.
pub const HOME_URL: &str = "home_url";
/// Option key under which the storefront bearer token is cached.
pub const AUTH_TOKEN: &str = "auth_token";

/// Errors raised by an [`OptionStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Option store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data could not be encoded or decoded.
    #[error("Option store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value persistence for named configuration options.
///
/// `get` returns `None` for keys that were never set. Callers treat an empty
/// string the same as a missing value.
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Returns the value under `key` if it is present and non-empty.
    async fn get_non_empty(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key).await?.filter(|value| !value.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_non_empty_filters_blank_values() {
        let store = MemoryOptionStore::new();
        store.set(AUTH_TOKEN, "").await.unwrap();
        store.set(CLIENT_ID, "  ").await.unwrap();
        store.set(STORE_URL, "https://h/stores/x/").await.unwrap();

        assert_eq!(store.get_non_empty(AUTH_TOKEN).await.unwrap(), None);
        assert_eq!(store.get_non_empty(CLIENT_ID).await.unwrap(), None);
        assert_eq!(store.get_non_empty(CHANNEL_ID).await.unwrap(), None);
        assert_eq!(
            store.get_non_empty(STORE_URL).await.unwrap().as_deref(),
            Some("https://h/stores/x/")
        );
    }

    #[test]
    fn test_store_error_io_message() {
        let error = StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(error.to_string().contains("denied"));
    }
}
