//! Passphrase check against the stored admin secret.

use crate::constants::DEFAULT_SECRET;
use crate::storage::{KvStore, SECRET_KEY};
use anyhow::{Context, Result};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Result of a passphrase check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted,
    Denied,
}

impl AuthOutcome {
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Compares candidates with the admin secret held in local storage.
#[derive(Clone)]
pub struct AuthGate {
    kv: KvStore,
}

impl AuthGate {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Checks `candidate` against the secret stored right now.
    ///
    /// Falls back to the built-in default when nothing (or an empty string)
    /// is stored, or when the slot cannot be read.
    pub async fn authenticate(&self, candidate: &str) -> AuthOutcome {
        let reference = self.reference_secret().await;
        if bool::from(candidate.as_bytes().ct_eq(reference.as_bytes())) {
            AuthOutcome::Granted
        } else {
            AuthOutcome::Denied
        }
    }

    /// Overwrites the stored secret. Callers decide who may do this.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    pub async fn set_secret(&self, secret: &str) -> Result<()> {
        self.kv
            .set_str(SECRET_KEY, secret)
            .await
            .context("Failed to store admin secret")
    }

    async fn reference_secret(&self) -> String {
        match self.kv.get_str(SECRET_KEY).await {
            Ok(Some(secret)) if !secret.is_empty() => secret,
            Ok(_) => DEFAULT_SECRET.to_string(),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Failed to read admin secret, using default");
                DEFAULT_SECRET.to_string()
            },
        }
    }
}
