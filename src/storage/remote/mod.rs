//! Remote-mode persistence: one shared document per site.
//!
//! Every save overwrites the whole document (last writer wins, no merge,
//! no version check). Two admin sessions editing at the same time can
//! silently drop each other's changes.
//!
//! - [`RemoteDocument`] - Wire schema with defaults for missing fields
//! - [`DocumentStore`] - Pluggable document service
//! - [`MemoryDocumentStore`] - In-process hub (tests, embedding)
//! - [`HttpDocumentStore`] - REST endpoint with a polling watcher
//! - [`RemoteBackend`] - [`ContentBackend`](super::ContentBackend) over a document store

mod backend;
mod document;
mod http;
mod memory;

pub use backend::RemoteBackend;
pub use document::{DocumentKey, RemoteDocument};
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

use super::Subscription;
use anyhow::Result;
use async_trait::async_trait;

/// Document service holding the remote content.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Reads a document. Returns `Ok(None)` if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or answers with
    /// something other than a document.
    async fn get(&self, key: &DocumentKey) -> Result<Option<RemoteDocument>>;

    /// Overwrites a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write was not accepted.
    async fn set(&self, key: &DocumentKey, document: &RemoteDocument) -> Result<()>;

    /// Watches a document. Every change is delivered as a full snapshot.
    fn watch(&self, key: &DocumentKey) -> Subscription;
}
