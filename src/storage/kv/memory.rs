//! In-memory slot backend.

use super::backend::KvBackend;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Slots held in a `DashMap`. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    slots: DashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(key).map(|slot| slot.value().clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.slots.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unwritten_slot_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("portfolio_bio").await.unwrap(), None);
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let backend = MemoryBackend::new();

        backend.set("slot", b"first".to_vec()).await.unwrap();
        backend.set("slot", b"second".to_vec()).await.unwrap();

        assert_eq!(backend.get("slot").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(backend.len(), 1);
    }
}
