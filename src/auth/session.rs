//! Admin sessions.

use super::gate::{AuthGate, AuthOutcome};
use crate::error::{Error, Result};
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

/// Lock state of an admin session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Locked,
    Unlocked,
}

/// One admin view's authentication state.
///
/// Starts `Locked`; only a granted [`AuthGate::authenticate`] unlocks it and
/// only [`close`](Self::close) (or dropping the session) locks it again.
/// There is no timeout.
#[derive(Debug, Default)]
pub struct AdminSession {
    state: SessionState,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    /// Checks `candidate`; a granted check unlocks the session. A denied
    /// check leaves the state as it was.
    pub async fn authenticate(&mut self, gate: &AuthGate, candidate: &str) -> AuthOutcome {
        let outcome = gate.authenticate(candidate).await;
        if outcome.is_granted() {
            self.state = SessionState::Unlocked;
        }
        outcome
    }

    /// Locks the session.
    pub fn close(&mut self) {
        self.state = SessionState::Locked;
    }

    /// Replaces the stored secret. Requires an unlocked session; the old
    /// secret is not asked for again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionLocked`] if the session is locked, or a
    /// storage error if the secret cannot be written.
    pub async fn change_secret(&self, gate: &AuthGate, secret: &str) -> Result<()> {
        if !self.is_authenticated() {
            return Err(Error::SessionLocked);
        }
        gate.set_secret(secret)
            .await
            .map_err(|e| Error::storage("changing admin secret", e))
    }
}

/// Unlocked admin sessions keyed by bearer token.
///
/// Tokens live in memory only: restarting the server locks every session.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, AdminSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with `candidate`. Returns its token when granted.
    pub async fn open(&self, gate: &AuthGate, candidate: &str) -> Option<String> {
        let mut session = AdminSession::new();
        if !session.authenticate(gate, candidate).await.is_granted() {
            return None;
        }
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), session);
        Some(token)
    }

    /// True if `token` belongs to an unlocked session.
    pub fn is_unlocked(&self, token: &str) -> bool {
        self.sessions
            .get(token)
            .is_some_and(|session| session.is_authenticated())
    }

    /// Locks and forgets the session behind `token`.
    pub fn close(&self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some((_, mut session)) => {
                session.close();
                info!(target: "audit", event_type = "session_closed", "Admin session closed");
                true
            },
            None => false,
        }
    }

    /// Replaces the stored secret on behalf of the session behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionLocked`] for unknown tokens, or a storage
    /// error if the secret cannot be written.
    pub async fn change_secret(&self, gate: &AuthGate, token: &str, secret: &str) -> Result<()> {
        // Read the state out first so no map guard is held across the await
        let state = self
            .sessions
            .get(token)
            .map_or(SessionState::Locked, |session| session.state());
        let session = AdminSession { state };
        session.change_secret(gate, secret).await
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KvStore;

    #[tokio::test]
    async fn test_session_starts_locked() {
        let session = AdminSession::new();
        assert_eq!(session.state(), SessionState::Locked);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_correct_secret_unlocks() {
        let gate = AuthGate::new(KvStore::memory());
        let mut session = AdminSession::new();

        let outcome = session.authenticate(&gate, "Husson").await;

        assert_eq!(outcome, AuthOutcome::Granted);
        assert_eq!(session.state(), SessionState::Unlocked);
    }

    #[tokio::test]
    async fn test_wrong_secret_stays_locked() {
        let gate = AuthGate::new(KvStore::memory());
        let mut session = AdminSession::new();

        let outcome = session.authenticate(&gate, "wrong").await;

        assert_eq!(outcome, AuthOutcome::Denied);
        assert_eq!(session.state(), SessionState::Locked);
    }

    #[tokio::test]
    async fn test_close_locks_again() {
        let gate = AuthGate::new(KvStore::memory());
        let mut session = AdminSession::new();
        session.authenticate(&gate, "Husson").await;

        session.close();
        assert_eq!(session.state(), SessionState::Locked);
    }

    #[tokio::test]
    async fn test_change_secret_requires_unlocked_session() {
        let gate = AuthGate::new(KvStore::memory());
        let mut session = AdminSession::new();

        let err = session.change_secret(&gate, "x").await.unwrap_err();
        assert!(matches!(err, Error::SessionLocked));
        assert!(gate.authenticate("Husson").await.is_granted());

        session.authenticate(&gate, "Husson").await;
        session.change_secret(&gate, "x").await.unwrap();
        assert!(gate.authenticate("x").await.is_granted());
    }

    #[tokio::test]
    async fn test_registry_tokens() {
        let gate = AuthGate::new(KvStore::memory());
        let registry = SessionRegistry::new();

        assert!(registry.open(&gate, "nope").await.is_none());
        assert!(registry.is_empty());

        let token = registry.open(&gate, "Husson").await.unwrap();
        assert!(registry.is_unlocked(&token));
        assert!(!registry.is_unlocked("made-up"));
        assert_eq!(registry.len(), 1);

        assert!(registry.close(&token));
        assert!(!registry.is_unlocked(&token));
        assert!(!registry.close(&token));
    }

    #[tokio::test]
    async fn test_registry_change_secret() {
        let gate = AuthGate::new(KvStore::memory());
        let registry = SessionRegistry::new();
        let token = registry.open(&gate, "Husson").await.unwrap();

        assert!(matches!(
            registry.change_secret(&gate, "bogus", "x").await,
            Err(Error::SessionLocked)
        ));

        registry.change_secret(&gate, &token, "rotated").await.unwrap();
        assert!(gate.authenticate("rotated").await.is_granted());
        // Existing sessions stay unlocked after a rotation
        assert!(registry.is_unlocked(&token));
    }
}
