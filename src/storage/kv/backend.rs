//! Backend trait for the slot store.

use anyhow::Result;
use async_trait::async_trait;

/// Raw byte slots keyed by name.
///
/// Implementations must be `Send + Sync`; the store is shared between the
/// content writer task and request handlers.
#[async_trait]
pub trait KvBackend: Send + Sync + 'static {
    /// Reads a slot. `Ok(None)` means it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
}
