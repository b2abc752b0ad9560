//! Request and response bodies.

use crate::content::{Project, SiteContent};
use crate::router::ViewSelector;
use serde::{Deserialize, Serialize};

/// POST /api/admin/session
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "password")]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BioBody {
    pub bio: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowreelBody {
    #[serde(alias = "url")]
    pub showreel_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SecretRequest {
    pub secret: String,
}

/// POST /api/admin/bio/generate
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateBioRequest {
    /// Picked from the built-in sets when absent or blank.
    pub keywords: Option<String>,
    /// Store the generated text as the new bio.
    pub apply: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateBioResponse {
    pub keywords: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<SiteContent>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub loading: bool,
    pub backend: String,
}

/// Public landing view.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub title: String,
    pub tagline: String,
    pub showreel_url: String,
    pub loading: bool,
}

/// One entry of the gallery index.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub year: String,
    pub cover_image: String,
}

impl From<&Project> for ProjectCard {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            category: project.category.clone(),
            year: project.year.clone(),
            cover_image: project.cover_image.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexView {
    pub projects: Vec<ProjectCard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AboutView {
    pub title: String,
    pub bio: String,
}

/// Fallback for any other GET.
#[derive(Debug, Serialize)]
pub struct SurfaceResponse {
    pub surface: ViewSelector,
    pub location: String,
}
