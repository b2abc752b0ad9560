//! One application session: store, adapter, sync listener, auth and
//! generator wired together from a [`Config`].

use crate::auth::{AuthGate, SessionRegistry};
use crate::bio::{BioGenerator, GeminiBioGenerator};
use crate::config::{Config, SiteConfig, StorageMode};
use crate::content::ContentStore;
use crate::paths;
use crate::storage::{
    ContentBackend, DocumentKey, HttpDocumentStore, KvStore, LocalBackend, RemoteBackend,
};
use crate::sync::SyncListener;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Running application session.
///
/// Owns the sync listener, so dropping the session stops it. Prefer
/// [`shutdown`](Self::shutdown), which also waits for pending saves.
pub struct App {
    store: ContentStore,
    auth: AuthGate,
    sessions: Arc<SessionRegistry>,
    generator: Arc<dyn BioGenerator>,
    site: SiteConfig,
    listener: Option<SyncListener>,
}

impl App {
    /// Builds every component described by `config` and loads content.
    ///
    /// # Errors
    ///
    /// Returns an error if the local database cannot be opened or the
    /// remote endpoint is misconfigured.
    pub async fn start(config: &Config) -> Result<Self> {
        let kv = open_kv(config)?;
        let backend = build_backend(config, &kv)?;
        let generator = GeminiBioGenerator::from_env(
            &config.generator.api_key_env,
            config.generator.model.clone(),
            config.generator.base_url.clone(),
        );
        if !generator.has_api_key() {
            info!(
                env = %config.generator.api_key_env,
                "No generation API key set, bio generation will return fallback text"
            );
        }

        Ok(Self::assemble(
            kv,
            backend,
            Arc::new(generator),
            config.site.clone(),
        )
        .await)
    }

    /// Builds a session from ready-made parts.
    ///
    /// `kv` holds the admin secret; `backend` holds the content. They may
    /// share storage (local mode) or not (remote mode).
    pub async fn assemble(
        kv: KvStore,
        backend: Arc<dyn ContentBackend>,
        generator: Arc<dyn BioGenerator>,
        site: SiteConfig,
    ) -> Self {
        let backend_name = backend.name();
        let store = ContentStore::open(backend).await;
        let listener = SyncListener::attach(&store);
        info!(
            backend = backend_name,
            sync = listener.is_some(),
            "Application session started"
        );

        Self {
            store,
            auth: AuthGate::new(kv),
            sessions: Arc::new(SessionRegistry::new()),
            generator,
            site,
            listener,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn generator(&self) -> &Arc<dyn BioGenerator> {
        &self.generator
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// True while a remote change feed is being followed.
    pub fn is_syncing(&self) -> bool {
        self.listener.as_ref().is_some_and(|l| !l.is_finished())
    }

    /// Stops the listener and waits for queued saves.
    pub async fn shutdown(mut self) {
        if let Some(listener) = self.listener.take() {
            listener.shutdown().await;
        }
        self.store.flush().await;
        info!("Application session ended");
    }
}

fn open_kv(config: &Config) -> Result<KvStore> {
    if config.storage.in_memory {
        return Ok(KvStore::memory());
    }
    let path = match &config.storage.path {
        Some(path) => path.clone(),
        None => paths::get_content_db_path()?,
    };
    KvStore::file(&path)
        .with_context(|| format!("Failed to open local storage at {}", path.display()))
}

fn build_backend(config: &Config, kv: &KvStore) -> Result<Arc<dyn ContentBackend>> {
    match config.storage.mode {
        StorageMode::Local => Ok(Arc::new(LocalBackend::new(kv.clone()))),
        StorageMode::Remote => {
            let remote = config
                .remote
                .as_ref()
                .context("storage.mode is \"remote\" but no [remote] section is configured")?;
            let documents = HttpDocumentStore::new(
                &remote.url,
                Duration::from_millis(remote.poll_interval_ms),
                Duration::from_millis(remote.timeout_ms),
            )?;
            let key = DocumentKey::new(remote.collection.clone(), remote.document.clone());
            Ok(Arc::new(RemoteBackend::new(documents, key)))
        },
    }
}
