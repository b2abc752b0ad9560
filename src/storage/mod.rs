//! Persistence adapters for [`SiteContent`].
//!
//! Two adapters implement [`ContentBackend`]:
//!
//! - [`LocalBackend`]: three string slots in a [`KvStore`] (memory or redb)
//! - [`RemoteBackend`]: one document in a [`DocumentStore`], with change
//!   notifications through [`ContentBackend::subscribe`]
//!
//! Adapters report failures as errors; deciding to log and carry on is the
//! [`ContentStore`](crate::content::ContentStore)'s job.

pub mod kv;
mod local;
pub mod remote;

pub use kv::KvStore;
pub use local::{BIO_KEY, LocalBackend, PROJECTS_KEY, SECRET_KEY, SHOWREEL_KEY};
pub use remote::{
    DocumentKey, DocumentStore, HttpDocumentStore, MemoryDocumentStore, RemoteBackend,
    RemoteDocument,
};

use crate::content::SiteContent;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Durable storage for the content aggregate.
#[async_trait]
pub trait ContentBackend: Send + Sync + 'static {
    /// Reads the stored aggregate.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet. Malformed data
    /// is replaced by defaults rather than reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read at all.
    async fn load(&self) -> Result<Option<SiteContent>>;

    /// Overwrites the stored aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if the write did not reach the storage.
    async fn save(&self, content: &SiteContent) -> Result<()>;

    /// Subscribes to changes made by any writer.
    ///
    /// Returns `None` for backends without change notification (local mode).
    fn subscribe(&self) -> Option<Subscription> {
        None
    }

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

/// Notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Full content after a change, including changes this process made.
    Changed(SiteContent),
    /// The watcher could not read the document.
    Failed(String),
}

/// Live subscription to a backend's change feed.
///
/// Dropping the subscription stops any background watcher feeding it.
pub struct Subscription {
    receiver: broadcast::Receiver<SyncEvent>,
    _watcher: Option<WatcherGuard>,
}

impl Subscription {
    /// Wraps a receiver fed by a shared publisher.
    pub fn new(receiver: broadcast::Receiver<SyncEvent>) -> Self {
        Self {
            receiver,
            _watcher: None,
        }
    }

    /// Wraps a receiver fed by a dedicated task that is aborted on drop.
    pub fn with_watcher(receiver: broadcast::Receiver<SyncEvent>, watcher: JoinHandle<()>) -> Self {
        Self {
            receiver,
            _watcher: Some(WatcherGuard(watcher)),
        }
    }

    /// Waits for the next event.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged` if events were dropped because this
    /// subscriber fell behind, and `RecvError::Closed` once the publisher
    /// is gone.
    pub async fn recv(&mut self) -> std::result::Result<SyncEvent, broadcast::error::RecvError> {
        self.receiver.recv().await
    }
}

struct WatcherGuard(JoinHandle<()>);

impl Drop for WatcherGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}
