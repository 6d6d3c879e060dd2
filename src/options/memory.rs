//! In-memory option store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{OptionStore, StoreError};

/// An [`OptionStore`] backed by a `HashMap` in process memory.
///
/// Values do not survive a restart, so a token minted through this store is
/// minted again by the next process.
///
/// # Example
///
/// ```rust
/// use bc_storefront::options::{MemoryOptionStore, OptionStore, CLIENT_ID};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = MemoryOptionStore::from_pairs([(CLIENT_ID, "cid")]);
/// assert_eq!(store.get(CLIENT_ID).await.unwrap().as_deref(), Some("cid"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryOptionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given options.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }

    /// Returns a copy of every stored option.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
