//! In-process document hub.
//!
//! Holds documents in memory and fans every write out to all watchers of
//! that document over broadcast channels.

use super::document::{DocumentKey, RemoteDocument};
use super::DocumentStore;
use crate::storage::{Subscription, SyncEvent};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Buffered events per watched document before slow subscribers lag.
const WATCH_CAPACITY: usize = 64;

/// In-memory [`DocumentStore`].
///
/// Clones share the same documents and topics, so several
/// [`RemoteBackend`](super::RemoteBackend)s built on clones behave like
/// several clients of one remote service.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    documents: DashMap<DocumentKey, RemoteDocument>,
    topics: RwLock<HashMap<DocumentKey, broadcast::Sender<SyncEvent>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live watchers of `key`.
    pub fn watcher_count(&self, key: &DocumentKey) -> usize {
        self.inner
            .topics
            .read()
            .get(key)
            .map_or(0, broadcast::Sender::receiver_count)
    }

    fn publish(&self, key: &DocumentKey, event: SyncEvent) -> usize {
        let topics = self.inner.topics.read();
        topics
            .get(key)
            .map_or(0, |sender| sender.send(event).unwrap_or(0))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<RemoteDocument>> {
        Ok(self
            .inner
            .documents
            .get(key)
            .map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &DocumentKey, document: &RemoteDocument) -> Result<()> {
        self.inner.documents.insert(key.clone(), document.clone());
        self.publish(key, SyncEvent::Changed(document.clone().into_content()));
        Ok(())
    }

    fn watch(&self, key: &DocumentKey) -> Subscription {
        let mut topics = self.inner.topics.write();
        let sender = topics
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(WATCH_CAPACITY).0);
        Subscription::new(sender.subscribe())
    }
}
