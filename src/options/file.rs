//! JSON file option store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{OptionStore, StoreError};

/// An [`OptionStore`] persisted as a flat JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set` through a
/// temporary sibling file and a rename. A missing file reads as an empty
/// store. Writes from this instance are serialized; concurrent writers from
/// other processes are not coordinated.
///
/// ```json
/// {
///   "store_url": "https://api.bigcommerce.com/stores/abcd1234/v3/",
///   "access_token": "...",
///   "client_id": "...",
///   "channel_id": "1",
///   "auth_token": "..."
/// }
/// ```
#[derive(Debug)]
pub struct JsonFileOptionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileOptionStore {
    /// Creates a store backed by the file at `path`. The file is not touched
    /// until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&contents)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect())
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values)?;
        let tmp_path = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OptionStore for JsonFileOptionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await?;
        tracing::debug!(path = %self.path.display(), key, "Option written");
        Ok(())
    }
}
