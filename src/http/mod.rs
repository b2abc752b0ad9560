//! HTTP API.
//!
//! Public routes read the content store. Admin routes require a bearer
//! token obtained from `POST /api/admin/session` and return the updated
//! aggregate after every mutation. Any other `GET` reports which surface
//! (public or admin) the requested location selects.

pub mod audit;
mod error;
mod extract;
mod handlers;
pub mod types;

pub use error::AppError;
pub use extract::{AdminToken, ClientAddr};

use crate::app::App;
use crate::auth::{AuthGate, SessionRegistry};
use crate::bio::BioGenerator;
use crate::config::{ServerConfig, SiteConfig};
use crate::content::ContentStore;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub auth: AuthGate,
    pub sessions: Arc<SessionRegistry>,
    pub generator: Arc<dyn BioGenerator>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn from_app(app: &App) -> Self {
        Self {
            store: app.store().clone(),
            auth: app.auth().clone(),
            sessions: Arc::clone(app.sessions()),
            generator: Arc::clone(app.generator()),
            site: Arc::new(app.site().clone()),
        }
    }
}

/// Builds the API router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let admin = Router::new()
        .route(
            "/session",
            post(handlers::open_session).delete(handlers::close_session),
        )
        .route(
            "/projects",
            put(handlers::replace_projects).post(handlers::upsert_project),
        )
        .route("/projects/{id}", delete(handlers::remove_project))
        .route("/bio", put(handlers::set_bio))
        .route("/bio/generate", post(handlers::generate_bio))
        .route("/showreel", put(handlers::set_showreel))
        .route("/secret", put(handlers::set_secret));

    let api = Router::new()
        .route("/content", get(handlers::get_content))
        .route("/projects", get(handlers::list_projects))
        .route("/projects/{id}", get(handlers::get_project))
        .route("/bio", get(handlers::get_bio))
        .route("/showreel", get(handlers::get_showreel))
        .route("/views/home", get(handlers::home_view))
        .route("/views/index", get(handlers::index_view))
        .route("/views/about", get(handlers::about_view))
        .nest("/admin", admin)
        .fallback(handlers::api_not_found);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .fallback(handlers::select_surface)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the API until Ctrl+C, then ends the application session.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(app: App, server: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("Failed to read bound address")?;

    let routes = router(
        AppState::from_app(&app),
        server.max_body_mb.saturating_mul(1024 * 1024),
    );
    info!(addr = %local_addr, "Listening on http://{local_addr}");

    axum::serve(
        listener,
        routes.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server failed")?;

    app.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
