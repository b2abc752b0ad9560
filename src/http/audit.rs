//! Security audit logging for admin API events.
//!
//! Emitted under the `audit` target so they can be routed separately with
//! `RUST_LOG=audit=info`.

use std::net::SocketAddr;
use tracing::{info, warn};

/// Security audit events.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// Wrong passphrase submitted
    AuthFailure { client: Option<SocketAddr> },
    /// Passphrase accepted and a session opened
    AuthSuccess { client: Option<SocketAddr> },
    /// Admin request without a valid bearer token
    TokenRejected {
        client: Option<SocketAddr>,
        path: String,
    },
    /// Admin secret replaced
    SecretChanged { client: Option<SocketAddr> },
}

/// Log a security audit event with structured fields.
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::AuthFailure { client } => {
            warn!(
                target: "audit",
                event_type = "auth_failure",
                client = %display_client(client),
                "Authentication failed"
            );
        },
        AuditEvent::AuthSuccess { client } => {
            info!(
                target: "audit",
                event_type = "auth_success",
                client = %display_client(client),
                "Authentication succeeded"
            );
        },
        AuditEvent::TokenRejected { client, path } => {
            warn!(
                target: "audit",
                event_type = "token_rejected",
                client = %display_client(client),
                %path,
                "Admin request without a valid session"
            );
        },
        AuditEvent::SecretChanged { client } => {
            info!(
                target: "audit",
                event_type = "secret_changed",
                client = %display_client(client),
                "Admin secret changed"
            );
        },
    }
}

fn display_client(client: Option<SocketAddr>) -> String {
    client.map_or_else(|| "unknown".to_string(), |addr| addr.to_string())
}
