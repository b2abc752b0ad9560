//! Admin handlers.
//!
//! Every mutation returns the updated aggregate. Persistence happens in the
//! background, so a storage failure never fails the request.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use super::super::audit::{AuditEvent, log_audit_event};
use super::super::types::{
    BioBody, GenerateBioRequest, GenerateBioResponse, LoginRequest, LoginResponse, SecretRequest,
    ShowreelBody,
};
use super::super::{AdminToken, AppError, AppState, ClientAddr};
use crate::bio;
use crate::content::{Project, SiteContent};

/// Message shown when the passphrase is wrong.
pub const DENIED_MESSAGE: &str = "Code incorrect";

/// POST /api/admin/session - Exchange the passphrase for a session token.
pub(crate) async fn open_session(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    match state.sessions.open(&state.auth, &req.code).await {
        Some(token) => {
            log_audit_event(AuditEvent::AuthSuccess { client });
            Ok(Json(LoginResponse { token }))
        },
        None => {
            log_audit_event(AuditEvent::AuthFailure { client });
            Err(AppError::Unauthorized(DENIED_MESSAGE.to_string()))
        },
    }
}

/// DELETE /api/admin/session - Lock and forget the session.
pub(crate) async fn close_session(
    State(state): State<AppState>,
    AdminToken(token): AdminToken,
) -> StatusCode {
    state.sessions.close(&token);
    StatusCode::NO_CONTENT
}

/// PUT /api/admin/projects - Replace the whole project list.
pub(crate) async fn replace_projects(
    State(state): State<AppState>,
    _admin: AdminToken,
    Json(projects): Json<Vec<Project>>,
) -> Json<SiteContent> {
    Json(state.store.replace_projects(projects))
}

/// POST /api/admin/projects - Create (empty id) or update (matching id).
pub(crate) async fn upsert_project(
    State(state): State<AppState>,
    _admin: AdminToken,
    Json(project): Json<Project>,
) -> Json<SiteContent> {
    Json(state.store.upsert_project(project))
}

/// DELETE /api/admin/projects/{id} - Remove a project; unknown ids are a no-op.
pub(crate) async fn remove_project(
    State(state): State<AppState>,
    _admin: AdminToken,
    Path(id): Path<String>,
) -> Json<SiteContent> {
    Json(state.store.remove_project(&id))
}

/// PUT /api/admin/bio
pub(crate) async fn set_bio(
    State(state): State<AppState>,
    _admin: AdminToken,
    Json(req): Json<BioBody>,
) -> Json<SiteContent> {
    Json(state.store.set_bio(req.bio))
}

/// PUT /api/admin/showreel
pub(crate) async fn set_showreel(
    State(state): State<AppState>,
    _admin: AdminToken,
    Json(req): Json<ShowreelBody>,
) -> Json<SiteContent> {
    Json(state.store.set_showreel_url(req.showreel_url))
}

/// PUT /api/admin/secret - Replace the admin passphrase. An empty value
/// restores the built-in default.
pub(crate) async fn set_secret(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    AdminToken(token): AdminToken,
    Json(req): Json<SecretRequest>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .change_secret(&state.auth, &token, &req.secret)
        .await?;
    log_audit_event(AuditEvent::SecretChanged { client });
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/bio/generate - Generate a bio, optionally applying it.
pub(crate) async fn generate_bio(
    State(state): State<AppState>,
    _admin: AdminToken,
    Json(req): Json<GenerateBioRequest>,
) -> Json<GenerateBioResponse> {
    let keywords = req
        .keywords
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| bio::random_keywords().to_string());

    let text = state.generator.generate(&keywords).await;
    info!(%keywords, applied = req.apply, "Generated biography");

    let content = req.apply.then(|| state.store.set_bio(text.clone()));
    Json(GenerateBioResponse {
        keywords,
        bio: text,
        content,
    })
}
