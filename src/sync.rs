//! Remote sync listener.
//!
//! Follows a backend's change feed and overwrites the in-memory content
//! with each snapshot that arrives while no local save is pending, so edits
//! from one admin session show up in every running instance without a
//! reload. The listener lives as long as the application session and is
//! aborted when that session ends.

use crate::content::ContentStore;
use crate::storage::{Subscription, SyncEvent};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Running listener task. Dropping it stops the listener.
pub struct SyncListener {
    handle: Option<JoinHandle<()>>,
}

impl SyncListener {
    /// Starts listening if the store's backend supports subscriptions.
    pub fn attach(store: &ContentStore) -> Option<Self> {
        let subscription = store.backend().subscribe()?;
        Some(Self::spawn(store.clone(), subscription))
    }

    /// Starts a listener feeding `store` from `subscription`.
    pub fn spawn(store: ContentStore, subscription: Subscription) -> Self {
        let handle = tokio::spawn(listen(store, subscription));
        Self {
            handle: Some(handle),
        }
    }

    /// Returns true once the listener has stopped on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the listener and waits for it to wind down.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            debug!("Sync listener stopped");
        }
    }
}

impl Drop for SyncListener {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn listen(store: ContentStore, mut subscription: Subscription) {
    info!("Sync listener started");
    loop {
        match subscription.recv().await {
            Ok(SyncEvent::Changed(content)) => {
                let projects = content.projects.len();
                if store.apply_remote(content) {
                    debug!(projects, "Applied remote snapshot");
                } else {
                    debug!(
                        pending = store.pending_saves(),
                        "Skipped remote snapshot while local saves are pending"
                    );
                }
            },
            Ok(SyncEvent::Failed(reason)) => {
                warn!(%reason, "Remote subscription error, keeping current content");
                store.mark_ready();
            },
            Err(RecvError::Lagged(skipped)) => {
                // Snapshots are full documents, so the next one catches up
                warn!(skipped, "Sync listener lagged behind remote changes");
            },
            Err(RecvError::Closed) => {
                info!("Remote change feed closed");
                store.mark_ready();
                break;
            },
        }
    }
}
