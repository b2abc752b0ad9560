//! Typed errors for folio.
//!
//! Storage plumbing uses `anyhow` with context; the variants here cover the
//! failures callers are expected to match on.

/// Result type for folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The admin session has not been unlocked.
    #[error("admin session is locked")]
    SessionLocked,

    /// Project id not present in the collection.
    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// Remote document endpoint answered with a non-success status.
    #[error("remote document request to {url} failed with status {status}")]
    RemoteStatus { url: String, status: u16 },

    /// Storage failure with context.
    #[error("storage error in {context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Create a storage error with context.
    pub fn storage(context: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    /// Create a project not found error.
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::ProjectNotFound { id: id.into() }
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SessionLocked => 401,
            Self::ProjectNotFound { .. } => 404,
            Self::RemoteStatus { .. } => 502,
            Self::Storage { .. } => 500,
        }
    }
}
