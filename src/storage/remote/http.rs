//! REST document store.
//!
//! Documents live at `{base_url}/{collection}/{id}`: `GET` returns the JSON
//! document (404 while it does not exist), `PUT` overwrites it. Watching is
//! done by polling; a snapshot is emitted whenever the fetched document
//! differs from the last one seen.

use super::DocumentStore;
use super::document::{DocumentKey, RemoteDocument};
use crate::error::Error;
use crate::storage::{Subscription, SyncEvent};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;

const WATCH_CAPACITY: usize = 16;

/// [`DocumentStore`] backed by an HTTP endpoint.
#[derive(Clone)]
pub struct HttpDocumentStore {
    client: reqwest::Client,
    base_url: Url,
    poll_interval: Duration,
}

impl HttpDocumentStore {
    /// Creates a store for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, poll_interval: Duration, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid remote URL: {base_url}"))?;
        // Keep the last path segment when joining document paths
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for remote documents")?;

        Ok(Self {
            client,
            base_url,
            poll_interval,
        })
    }

    /// Full URL of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not form a valid URL path.
    pub fn document_url(&self, key: &DocumentKey) -> Result<Url> {
        self.base_url
            .join(&format!("{}/{}", key.collection, key.id))
            .with_context(|| format!("Invalid document key: {key}"))
    }

    async fn fetch(client: &reqwest::Client, url: Url) -> Result<Option<RemoteDocument>> {
        let response = client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch remote document {url}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::RemoteStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }

        let document = response
            .json::<RemoteDocument>()
            .await
            .with_context(|| format!("Failed to decode remote document {url}"))?;
        Ok(Some(document))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, key: &DocumentKey) -> Result<Option<RemoteDocument>> {
        Self::fetch(&self.client, self.document_url(key)?).await
    }

    async fn set(&self, key: &DocumentKey, document: &RemoteDocument) -> Result<()> {
        let url = self.document_url(key)?;
        let response = self
            .client
            .put(url.clone())
            .json(document)
            .send()
            .await
            .with_context(|| format!("Failed to write remote document {url}"))?;

        if !response.status().is_success() {
            return Err(Error::RemoteStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }
        Ok(())
    }

    fn watch(&self, key: &DocumentKey) -> Subscription {
        let (sender, receiver) = broadcast::channel(WATCH_CAPACITY);
        let url = match self.document_url(key) {
            Ok(url) => url,
            Err(e) => {
                // Report once; the subscription closes immediately after
                let _ = sender.send(SyncEvent::Failed(format!("{e:#}")));
                return Subscription::new(receiver);
            },
        };

        let watcher = tokio::spawn(poll_document(
            self.client.clone(),
            url,
            self.poll_interval,
            sender,
        ));
        Subscription::with_watcher(receiver, watcher)
    }
}

/// Polls `url` until every subscriber is gone.
async fn poll_document(
    client: reqwest::Client,
    url: Url,
    poll_interval: Duration,
    sender: broadcast::Sender<SyncEvent>,
) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last_seen: Option<RemoteDocument> = None;
    let mut failing = false;

    info!(url = %url, interval = ?poll_interval, "Watching remote document");

    loop {
        interval.tick().await;
        if sender.receiver_count() == 0 {
            debug!(url = %url, "No subscribers left, stopping document watcher");
            break;
        }

        match HttpDocumentStore::fetch(&client, url.clone()).await {
            Ok(Some(document)) => {
                if failing {
                    info!(url = %url, "Remote document reachable again");
                    failing = false;
                }
                if last_seen.as_ref() != Some(&document) {
                    last_seen = Some(document.clone());
                    let _ = sender.send(SyncEvent::Changed(document.into_content()));
                }
            },
            Ok(None) => {
                failing = false;
            },
            Err(e) => {
                // Report the first failure of a streak, not every poll
                if !failing {
                    warn!(url = %url, error = %format!("{e:#}"), "Failed to poll remote document");
                    let _ = sender.send(SyncEvent::Failed(format!("{e:#}")));
                    failing = true;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> HttpDocumentStore {
        HttpDocumentStore::new(base, Duration::from_millis(50), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_document_url_without_trailing_slash() {
        let url = store("http://localhost:8080/documents")
            .document_url(&DocumentKey::default())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/documents/portfolio/content");
    }

    #[test]
    fn test_document_url_with_trailing_slash() {
        let url = store("http://localhost:8080/documents/")
            .document_url(&DocumentKey::new("site", "main"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/documents/site/main");
    }

    #[test]
    fn test_invalid_base_url() {
        let result =
            HttpDocumentStore::new("not a url", Duration::from_secs(1), Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let store = store("http://127.0.0.1:1/");
        assert!(store.get(&DocumentKey::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_watch_reports_unreachable_endpoint() {
        let store = store("http://127.0.0.1:1/");
        let mut sub = store.watch(&DocumentKey::default());

        let event = tokio::time::timeout(Duration::from_secs(5), sub.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(event, SyncEvent::Failed(_)));
    }
}
