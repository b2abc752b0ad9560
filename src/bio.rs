//! Artist biography generation.
//!
//! Sends a short French prompt built from keywords to the Gemini REST API
//! and returns the text. Generation never fails from the caller's point of
//! view: a missing key, a transport or API error, or an empty answer each
//! map to a fixed fallback string.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Returned when no API key is configured.
pub const MISSING_KEY_FALLBACK: &str = "Photographe et réalisateur dont le travail explore la tension entre l'espace urbain et l'intimité du silence.";
/// Returned when the request fails.
pub const ERROR_FALLBACK: &str = "Photographe et réalisateur basé à Paris. Explore les frontières entre la lumière et l'obscurité.";
/// Returned when the model answers with no text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Erreur de génération.";

/// Keyword sets used when the caller has none.
pub const KEYWORD_SETS: [&str; 4] = [
    "lumière naturelle, mélancolie, architecture brute, silence",
    "mouvement, chaos urbain, grain argentique, portraits intimes",
    "minimalisme, abstraction, nature morte, vide",
    "cinématographie, couleurs néon, nuit, solitude",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Picks one of [`KEYWORD_SETS`] at random.
pub fn random_keywords() -> &'static str {
    KEYWORD_SETS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(KEYWORD_SETS[0])
}

/// Builds the generation prompt for `keywords`.
pub fn build_prompt(keywords: &str) -> String {
    format!(
        "Rédige une biographie d'artiste courte, élégante et énigmatique (maximum 100 mots) \
         pour un photographe/réalisateur. Ton professionnel et poétique. Mots-clés : {keywords}. \
         Réponds uniquement en Français."
    )
}

/// Something that writes a biography from keywords.
#[async_trait]
pub trait BioGenerator: Send + Sync + 'static {
    /// Returns a biography, or a fallback string on any failure.
    async fn generate(&self, keywords: &str) -> String;
}

/// Gemini-backed [`BioGenerator`].
#[derive(Clone)]
pub struct GeminiBioGenerator {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiBioGenerator {
    /// Creates a generator. An empty or missing key disables remote calls.
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build tuned HTTP client, using defaults");
                Client::new()
            });

        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads the key from the environment variable `api_key_env`.
    pub fn from_env(api_key_env: &str, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::new(std::env::var(api_key_env).ok(), model, base_url)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, api_key: &str, keywords: &str) -> anyhow::Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: build_prompt(keywords),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {status}: {detail}");
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl BioGenerator for GeminiBioGenerator {
    async fn generate(&self, keywords: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No Gemini API key configured, returning fallback biography");
            return MISSING_KEY_FALLBACK.to_string();
        };

        match self.request(api_key, keywords).await {
            Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_FALLBACK.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!(error = %format!("{e:#}"), "Error generating bio");
                ERROR_FALLBACK.to_string()
            },
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
