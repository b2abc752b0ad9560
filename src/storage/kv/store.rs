//! High-level `KvStore` wrapper over backend implementations.

use super::backend::KvBackend;
use super::memory::MemoryBackend;
use super::redb::RedbBackend;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Slot store shared by the local content adapter and the auth gate.
///
/// `KvStore` is `Clone`; clones share the same backend.
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn KvBackend>,
}

impl KvStore {
    /// Creates a store backed by a redb file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a store backed by memory. All data is lost on exit.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    /// Creates a store over any [`KvBackend`].
    pub fn custom<B: KvBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Retrieves raw bytes by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.backend.get(key).await
    }

    /// Stores raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.backend.set(key, value.to_vec()).await
    }

    /// Retrieves a UTF-8 string slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails or the stored bytes are
    /// not valid UTF-8.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        match self.backend.get(key).await? {
            Some(bytes) => {
                let value = String::from_utf8(bytes)
                    .with_context(|| format!("Value for key '{key}' is not valid UTF-8"))?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Stores a UTF-8 string slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn set_str(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set(key, value.as_bytes().to_vec()).await
    }
}
