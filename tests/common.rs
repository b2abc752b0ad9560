//! Shared helpers for integration tests.
//!
//! `TestHost` drives the API router in-process with `tower::ServiceExt::oneshot`.
//! `spawn_server` runs a throwaway axum server on an ephemeral port, used to
//! stand in for the remote document endpoint and the generation endpoint.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use folio::app::App;
use folio::bio::BioGenerator;
use folio::config::SiteConfig;
use folio::content::ContentStore;
use folio::http::{self, AppState};
use folio::storage::{ContentBackend, KvStore, LocalBackend};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Generator returning a fixed text and remembering the last keywords.
#[derive(Default)]
pub struct StubGenerator {
    pub text: String,
    pub last_keywords: parking_lot::Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            last_keywords: parking_lot::Mutex::new(None),
        }
    }
}

#[async_trait]
impl BioGenerator for StubGenerator {
    async fn generate(&self, keywords: &str) -> String {
        *self.last_keywords.lock() = Some(keywords.to_string());
        self.text.clone()
    }
}

/// In-process API host over in-memory local storage.
pub struct TestHost {
    pub app: App,
    pub generator: Arc<StubGenerator>,
    router: Router,
}

impl TestHost {
    pub async fn start() -> Self {
        let kv = KvStore::memory();
        let backend: Arc<dyn ContentBackend> = Arc::new(LocalBackend::new(kv.clone()));
        Self::with_parts(kv, backend).await
    }

    pub async fn with_parts(kv: KvStore, backend: Arc<dyn ContentBackend>) -> Self {
        let generator = Arc::new(StubGenerator::new("Une bio générée."));
        let app = App::assemble(
            kv,
            backend,
            Arc::clone(&generator) as Arc<dyn BioGenerator>,
            SiteConfig::default(),
        )
        .await;
        let router = http::router(AppState::from_app(&app), 1024 * 1024);
        Self {
            app,
            generator,
            router,
        }
    }

    pub fn store(&self) -> &ContentStore {
        self.app.store()
    }

    /// Sends a request and returns the status with the JSON body
    /// (`Value::Null` for empty bodies).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, None, None).await
    }

    /// Opens an admin session and returns its token.
    pub async fn login(&self, code: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/admin/session",
                None,
                Some(serde_json::json!({ "code": code })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

/// Runs `router` on 127.0.0.1 with an ephemeral port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Polls `check` until it holds or two seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
