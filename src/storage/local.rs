//! Local-mode persistence: three independent string slots.
//!
//! The project list is stored as a JSON array; bio and showreel URL are
//! stored verbatim. Each slot falls back to its own default when it is
//! missing or cannot be decoded.

use super::ContentBackend;
use super::kv::KvStore;
use crate::content::SiteContent;
use crate::content::model::{DEFAULT_BIO, DEFAULT_SHOWREEL_URL, Project, default_projects};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

/// Slot holding the JSON-serialized project list.
pub const PROJECTS_KEY: &str = "portfolio_projects";
/// Slot holding the biography text.
pub const BIO_KEY: &str = "portfolio_bio";
/// Slot holding the showreel URL.
pub const SHOWREEL_KEY: &str = "portfolio_showreel";
/// Slot holding the admin passphrase (read by the auth gate).
pub const SECRET_KEY: &str = "portfolio_password";

/// Persists [`SiteContent`] into a [`KvStore`].
#[derive(Clone)]
pub struct LocalBackend {
    kv: KvStore,
}

impl LocalBackend {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// The slot store behind this backend.
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    async fn read_projects(&self) -> Result<Option<Vec<Project>>> {
        let Some(bytes) = self.kv.get(PROJECTS_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(projects) => Ok(Some(projects)),
            Err(e) => {
                warn!(key = PROJECTS_KEY, error = %e, "Stored project list is malformed, using defaults");
                Ok(Some(default_projects()))
            },
        }
    }

    async fn read_text(&self, key: &str, default: &str) -> Result<Option<String>> {
        let Some(bytes) = self.kv.get(key).await? else {
            return Ok(None);
        };
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Some(text)),
            Err(e) => {
                warn!(key, error = %e, "Stored slot is not valid UTF-8, using default");
                Ok(Some(default.to_string()))
            },
        }
    }
}

#[async_trait]
impl ContentBackend for LocalBackend {
    async fn load(&self) -> Result<Option<SiteContent>> {
        let projects = self.read_projects().await?;
        let bio = self.read_text(BIO_KEY, DEFAULT_BIO).await?;
        let showreel_url = self
            .read_text(SHOWREEL_KEY, DEFAULT_SHOWREEL_URL)
            .await?;

        if projects.is_none() && bio.is_none() && showreel_url.is_none() {
            return Ok(None);
        }

        Ok(Some(SiteContent {
            projects: projects.unwrap_or_else(default_projects),
            bio: bio.unwrap_or_else(|| DEFAULT_BIO.to_string()),
            showreel_url: showreel_url.unwrap_or_else(|| DEFAULT_SHOWREEL_URL.to_string()),
        }))
    }

    async fn save(&self, content: &SiteContent) -> Result<()> {
        let projects =
            serde_json::to_vec(&content.projects).context("Failed to serialize project list")?;
        self.kv
            .set(PROJECTS_KEY, &projects)
            .await
            .context("Failed to write project list")?;
        self.kv
            .set_str(BIO_KEY, &content.bio)
            .await
            .context("Failed to write bio")?;
        self.kv
            .set_str(SHOWREEL_KEY, &content.showreel_url)
            .await
            .context("Failed to write showreel URL")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
