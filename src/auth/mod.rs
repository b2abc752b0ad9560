//! Admin access control.
//!
//! A single shared passphrase guards all write operations. It is stored in
//! plaintext in the local slot store, compared as an exact string, and never
//! rate limited. That matches the site's original behavior and is a known
//! weak point, not something this module tries to harden.
//!
//! - [`AuthGate`] - Checks and replaces the stored passphrase
//! - [`AdminSession`] - `Locked`/`Unlocked` state machine for one admin view
//! - [`SessionRegistry`] - Bearer tokens for unlocked sessions served over HTTP

mod gate;
mod session;

pub use gate::{AuthGate, AuthOutcome};
pub use session::{AdminSession, SessionRegistry, SessionState};
