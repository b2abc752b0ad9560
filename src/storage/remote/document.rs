//! Remote document schema.

use crate::constants::{DEFAULT_COLLECTION, DEFAULT_DOCUMENT};
use crate::content::SiteContent;
use crate::content::model::{DEFAULT_BIO, DEFAULT_SHOWREEL_URL, Project, default_projects};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a document: a fixed collection/id pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub collection: String,
    pub id: String,
}

impl DocumentKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl Default for DocumentKey {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION, DEFAULT_DOCUMENT)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// The shared document as stored remotely.
///
/// Documents written by other clients may lack fields; every field has a
/// default so partial documents still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
    #[serde(default = "default_bio")]
    pub bio: String,
    #[serde(default = "default_showreel_url")]
    pub showreel_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteDocument {
    /// Builds a document from content, stamped with `updated_at`.
    pub fn from_content(content: &SiteContent, updated_at: DateTime<Utc>) -> Self {
        Self {
            projects: content.projects.clone(),
            bio: content.bio.clone(),
            showreel_url: content.showreel_url.clone(),
            updated_at: Some(updated_at),
        }
    }

    /// Drops the timestamp and returns the content fields.
    pub fn into_content(self) -> SiteContent {
        SiteContent {
            projects: self.projects,
            bio: self.bio,
            showreel_url: self.showreel_url,
        }
    }
}

fn default_bio() -> String {
    DEFAULT_BIO.to_string()
}

fn default_showreel_url() -> String {
    DEFAULT_SHOWREEL_URL.to_string()
}
