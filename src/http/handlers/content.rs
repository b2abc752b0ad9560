//! Public read handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::types::{BioBody, HealthResponse, ShowreelBody};
use super::super::{AppError, AppState};
use crate::content::{Project, SiteContent};

/// GET /health - Liveness and loading state.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        loading: state.store.is_loading(),
        backend: state.store.backend().name().to_string(),
    })
}

/// GET /api/content - The whole aggregate.
pub(crate) async fn get_content(State(state): State<AppState>) -> Json<SiteContent> {
    Json(state.store.snapshot())
}

/// GET /api/projects - Projects in display order.
pub(crate) async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.store.snapshot().projects)
}

/// GET /api/projects/{id} - One project.
pub(crate) async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .store
        .project(&id)
        .map(Json)
        .ok_or_else(|| crate::Error::project_not_found(id).into())
}

/// GET /api/bio
pub(crate) async fn get_bio(State(state): State<AppState>) -> Json<BioBody> {
    Json(BioBody {
        bio: state.store.snapshot().bio,
    })
}

/// GET /api/showreel
pub(crate) async fn get_showreel(State(state): State<AppState>) -> Json<ShowreelBody> {
    Json(ShowreelBody {
        showreel_url: state.store.snapshot().showreel_url,
    })
}
