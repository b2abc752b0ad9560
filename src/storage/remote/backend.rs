//! [`ContentBackend`] over a [`DocumentStore`].

use super::DocumentStore;
use super::document::{DocumentKey, RemoteDocument};
use crate::content::SiteContent;
use crate::storage::{ContentBackend, Subscription};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Stores the aggregate as one remote document.
#[derive(Clone)]
pub struct RemoteBackend {
    documents: Arc<dyn DocumentStore>,
    key: DocumentKey,
}

impl RemoteBackend {
    pub fn new<S: DocumentStore>(documents: S, key: DocumentKey) -> Self {
        Self {
            documents: Arc::new(documents),
            key,
        }
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }
}

#[async_trait]
impl ContentBackend for RemoteBackend {
    async fn load(&self) -> Result<Option<SiteContent>> {
        let document = self
            .documents
            .get(&self.key)
            .await
            .with_context(|| format!("Failed to load document {}", self.key))?;
        Ok(document.map(RemoteDocument::into_content))
    }

    async fn save(&self, content: &SiteContent) -> Result<()> {
        let document = RemoteDocument::from_content(content, Utc::now());
        self.documents
            .set(&self.key, &document)
            .await
            .with_context(|| format!("Failed to save document {}", self.key))
    }

    fn subscribe(&self) -> Option<Subscription> {
        Some(self.documents.watch(&self.key))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryDocumentStore, SyncEvent};

    #[tokio::test]
    async fn test_load_absent_document() {
        let backend = RemoteBackend::new(MemoryDocumentStore::new(), DocumentKey::default());
        assert!(backend.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let backend = RemoteBackend::new(MemoryDocumentStore::new(), DocumentKey::default());
        let content = SiteContent {
            projects: vec![],
            bio: "x".to_string(),
            showreel_url: "y".to_string(),
        };

        backend.save(&content).await.unwrap();
        assert_eq!(backend.load().await.unwrap(), Some(content));
    }

    #[tokio::test]
    async fn test_save_stamps_updated_at() {
        let documents = MemoryDocumentStore::new();
        let backend = RemoteBackend::new(documents.clone(), DocumentKey::default());
        let before = Utc::now();

        backend.save(&SiteContent::default()).await.unwrap();

        let doc = documents
            .get(&DocumentKey::default())
            .await
            .unwrap()
            .unwrap();
        assert!(doc.updated_at.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_subscriber_sees_own_writes() {
        let backend = RemoteBackend::new(MemoryDocumentStore::new(), DocumentKey::default());
        let mut sub = backend.subscribe().unwrap();
        let content = SiteContent {
            bio: "self".to_string(),
            ..SiteContent::default()
        };

        backend.save(&content).await.unwrap();
        assert_eq!(sub.recv().await.unwrap(), SyncEvent::Changed(content));
    }
}
