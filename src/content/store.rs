//! In-memory owner of [`SiteContent`].
//!
//! Every mutation updates memory synchronously, returns the new aggregate,
//! and queues exactly one save. Saves run on a background writer in the
//! order they were issued; failures are logged and dropped, so memory stays
//! the source of truth for the running session.
//!
//! Remote snapshots are dropped while any save is still queued or in flight.
//! Such a snapshot is at best an echo of an older save and would roll back
//! edits already made in memory.

use super::id::IdGenerator;
use super::model::{Project, SiteContent};
use crate::storage::ContentBackend;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

enum WriteCommand {
    Save(SiteContent),
    Flush(oneshot::Sender<()>),
}

struct StoreInner {
    content: RwLock<SiteContent>,
    loading: AtomicBool,
    ids: IdGenerator,
    /// Saves queued or running; incremented under the content write lock.
    pending: Arc<AtomicUsize>,
    writes: mpsc::UnboundedSender<WriteCommand>,
    backend: Arc<dyn ContentBackend>,
}

/// Shared handle to the site content.
///
/// Cheap to clone; clones see the same state. Must be created inside a
/// tokio runtime because it spawns the persistence writer.
#[derive(Clone)]
pub struct ContentStore {
    inner: Arc<StoreInner>,
}

impl ContentStore {
    /// Creates a store holding the built-in defaults, still marked loading.
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        let (writes, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        tokio::spawn(run_writer(Arc::clone(&backend), Arc::clone(&pending), rx));

        Self {
            inner: Arc::new(StoreInner {
                content: RwLock::new(SiteContent::default()),
                loading: AtomicBool::new(true),
                ids: IdGenerator::new(),
                pending,
                writes,
                backend,
            }),
        }
    }

    /// Creates a store and loads persisted content.
    pub async fn open(backend: Arc<dyn ContentBackend>) -> Self {
        let store = Self::new(backend);
        store.load().await;
        store
    }

    /// Replaces memory with persisted content, or defaults if there is none
    /// or it cannot be read. Does not write back.
    pub async fn load(&self) {
        let backend = &self.inner.backend;
        match backend.load().await {
            Ok(Some(content)) => {
                info!(
                    backend = backend.name(),
                    projects = content.projects.len(),
                    "Loaded site content"
                );
                *self.inner.content.write() = content;
            },
            Ok(None) => {
                info!(backend = backend.name(), "No stored content, using defaults");
                *self.inner.content.write() = SiteContent::default();
            },
            Err(e) => {
                warn!(
                    backend = backend.name(),
                    error = %format!("{e:#}"),
                    "Failed to load site content, using defaults"
                );
            },
        }
        self.mark_ready();
    }

    /// The backend this store persists to.
    pub fn backend(&self) -> &Arc<dyn ContentBackend> {
        &self.inner.backend
    }

    /// Returns a copy of the current aggregate.
    pub fn snapshot(&self) -> SiteContent {
        self.inner.content.read().clone()
    }

    /// Returns the project with `id`, if any.
    pub fn project(&self, id: &str) -> Option<Project> {
        self.inner.content.read().project(id).cloned()
    }

    /// True until content has been loaded or a remote snapshot (or error) arrived.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// Clears the loading flag.
    pub fn mark_ready(&self) {
        self.inner.loading.store(false, Ordering::Release);
    }

    /// Replaces the whole project list.
    pub fn replace_projects(&self, projects: Vec<Project>) -> SiteContent {
        self.mutate(|content| content.projects = projects)
    }

    /// Inserts or replaces a project.
    ///
    /// An empty id gets a fresh one and the project goes to the head of the
    /// list. A known id is replaced in place. An unknown non-empty id is
    /// inserted at the head with the id kept as given.
    pub fn upsert_project(&self, mut project: Project) -> SiteContent {
        self.mutate(|content| {
            if project.is_new() {
                project.id = self.fresh_id(content);
                debug!(id = %project.id, "Adding project");
                content.projects.insert(0, project);
            } else if let Some(slot) = content.projects.iter_mut().find(|p| p.id == project.id) {
                debug!(id = %project.id, "Replacing project");
                *slot = project;
            } else {
                debug!(id = %project.id, "Adding project with caller-supplied id");
                content.projects.insert(0, project);
            }
        })
    }

    /// Removes the project with `id`. Unknown ids leave the list untouched.
    pub fn remove_project(&self, id: &str) -> SiteContent {
        self.mutate(|content| {
            if let Some(index) = content.projects.iter().position(|p| p.id == id) {
                content.projects.remove(index);
            }
        })
    }

    /// Sets the biography.
    pub fn set_bio(&self, bio: impl Into<String>) -> SiteContent {
        let bio = bio.into();
        self.mutate(|content| content.bio = bio)
    }

    /// Sets the showreel URL.
    pub fn set_showreel_url(&self, url: impl Into<String>) -> SiteContent {
        let url = url.into();
        self.mutate(|content| content.showreel_url = url)
    }

    /// Number of saves queued or in flight.
    pub fn pending_saves(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Overwrites memory with content received from the remote document.
    /// Nothing is persisted.
    ///
    /// Returns false and keeps memory as is while local saves are pending;
    /// the last of those saves overwrites the document anyway.
    pub fn apply_remote(&self, content: SiteContent) -> bool {
        let applied = {
            let mut current = self.inner.content.write();
            if self.inner.pending.load(Ordering::Acquire) == 0 {
                *current = content;
                true
            } else {
                false
            }
        };
        self.mark_ready();
        applied
    }

    /// Waits until every save queued before this call has been attempted.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.inner.writes.send(WriteCommand::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    fn mutate(&self, apply: impl FnOnce(&mut SiteContent)) -> SiteContent {
        // Enqueue under the lock so saves reach the writer in mutation order
        let mut content = self.inner.content.write();
        apply(&mut content);
        let snapshot = content.clone();
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        if self
            .inner
            .writes
            .send(WriteCommand::Save(snapshot.clone()))
            .is_err()
        {
            self.inner.pending.fetch_sub(1, Ordering::AcqRel);
            error!("Persistence writer is gone, change kept in memory only");
        }
        drop(content);
        snapshot
    }

    fn fresh_id(&self, content: &SiteContent) -> String {
        loop {
            let id = self.inner.ids.next_id();
            if !content.contains_project(&id) {
                return id;
            }
        }
    }
}

async fn run_writer(
    backend: Arc<dyn ContentBackend>,
    pending: Arc<AtomicUsize>,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Save(content) => {
                if let Err(e) = backend.save(&content).await {
                    error!(
                        backend = backend.name(),
                        error = %format!("{e:#}"),
                        "Persistence failed"
                    );
                }
                pending.fetch_sub(1, Ordering::AcqRel);
            },
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            },
        }
    }
    debug!(backend = backend.name(), "Persistence writer stopped");
}
