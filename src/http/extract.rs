//! Request extractors.

use super::audit::{AuditEvent, log_audit_event};
use super::{AppError, AppState};
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Peer address when the server was started with connect info.
#[derive(Debug, Clone, Copy)]
pub struct ClientAddr(pub Option<SocketAddr>);

impl<S: Send + Sync> FromRequestParts<S> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
        ))
    }
}

/// Bearer token of an unlocked admin session.
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

impl FromRequestParts<AppState> for AdminToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        match token {
            Some(token) if state.sessions.is_unlocked(token) => Ok(Self(token.to_string())),
            _ => {
                let client = parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|info| info.0);
                log_audit_event(AuditEvent::TokenRejected {
                    client,
                    path: parts.uri.path().to_string(),
                });
                Err(AppError::Unauthorized(
                    "Admin session required".to_string(),
                ))
            },
        }
    }
}
