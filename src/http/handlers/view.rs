//! View models and surface selection.

use axum::{
    Json,
    extract::State,
    http::{Method, Uri},
};

use super::super::types::{AboutView, HomeView, IndexView, ProjectCard, SurfaceResponse};
use super::super::{AppError, AppState};
use crate::router::ViewSelector;

/// GET /api/views/home - Landing page: identity and showreel.
pub(crate) async fn home_view(State(state): State<AppState>) -> Json<HomeView> {
    Json(HomeView {
        title: state.site.title.clone(),
        tagline: state.site.tagline.clone(),
        showreel_url: state.store.snapshot().showreel_url,
        loading: state.store.is_loading(),
    })
}

/// GET /api/views/index - Gallery index cards.
pub(crate) async fn index_view(State(state): State<AppState>) -> Json<IndexView> {
    let content = state.store.snapshot();
    Json(IndexView {
        projects: content.projects.iter().map(ProjectCard::from).collect(),
    })
}

/// GET /api/views/about
pub(crate) async fn about_view(State(state): State<AppState>) -> Json<AboutView> {
    Json(AboutView {
        title: state.site.title.clone(),
        bio: state.store.snapshot().bio,
    })
}

/// Any other request outside `/api`: `GET` reports the selected surface.
pub(crate) async fn select_surface(
    method: Method,
    uri: Uri,
) -> Result<Json<SurfaceResponse>, AppError> {
    if method != Method::GET {
        return Err(AppError::NotFound(format!("No route for {method} {}", uri.path())));
    }
    let location = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    Ok(Json(SurfaceResponse {
        surface: ViewSelector::from_location(&location),
        location,
    }))
}

/// Unknown `/api` routes.
pub(crate) async fn api_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {method} {}", uri.path()))
}
