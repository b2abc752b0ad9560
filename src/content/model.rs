//! Portfolio data model.
//!
//! Field names serialize in camelCase (`coverImage`, `showreelUrl`) so the
//! stored JSON matches what browser front ends read and write.

use serde::{Deserialize, Serialize};

const SEED_COVER_STILLNESS: &str =
    "https://images.unsplash.com/photo-1492691523567-6119e281dfbb?q=80&w=2070&auto=format&fit=crop";
const SEED_GALLERY_STILLNESS: &str =
    "https://images.unsplash.com/photo-1518131348530-97992994bb0f?q=80&w=2070&auto=format&fit=crop";
const SEED_COVER_CONCRETE: &str =
    "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?q=80&w=2070&auto=format&fit=crop";
const SEED_COVER_VESSEL: &str =
    "https://images.unsplash.com/photo-1502134249126-9f3755a50d78?q=80&w=2070&auto=format&fit=crop";

/// Biography used until one is stored.
pub const DEFAULT_BIO: &str = "Photographe et réalisateur basé à Paris. Explore les frontières entre la lumière et l'obscurité, le mouvement et l'immobilité.";

/// Showreel used until one is stored.
pub const DEFAULT_SHOWREEL_URL: &str = "https://cdn.coverr.co/videos/coverr-walking-through-an-empty-underground-parking-lot-4536/1080p.mp4";

/// One portfolio entry.
///
/// An empty `id` marks an entry that has not been persisted yet. Image
/// fields hold either a URL or an inline data URL; `images` is in display
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub year: String,
    pub description: String,
    pub cover_image: String,
    pub images: Vec<String>,
}

impl Project {
    /// Returns true if this entry still needs an id.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }
}

/// The persisted aggregate: projects, biography and showreel.
///
/// Project order is display order; new entries go to the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
    #[serde(default = "default_bio")]
    pub bio: String,
    #[serde(default = "default_showreel_url")]
    pub showreel_url: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            projects: default_projects(),
            bio: default_bio(),
            showreel_url: default_showreel_url(),
        }
    }
}

impl SiteContent {
    /// Looks up a project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Returns true if any project carries `id`.
    pub fn contains_project(&self, id: &str) -> bool {
        self.project(id).is_some()
    }
}

/// Seed projects shown on first run.
pub fn default_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".to_string(),
            title: "STILLNESS IN MOTION".to_string(),
            category: "Motion Design".to_string(),
            year: "2024".to_string(),
            description: "Une exploration de la fluidité temporelle à travers des paysages urbains capturés au ralenti.".to_string(),
            cover_image: SEED_COVER_STILLNESS.to_string(),
            images: vec![
                SEED_COVER_STILLNESS.to_string(),
                SEED_GALLERY_STILLNESS.to_string(),
            ],
        },
        Project {
            id: "2".to_string(),
            title: "CONCRETE JUNGLE".to_string(),
            category: "Photography".to_string(),
            year: "2023".to_string(),
            description: "La géométrie brutale des structures modernes face à la fragilité humaine."
                .to_string(),
            cover_image: SEED_COVER_CONCRETE.to_string(),
            images: vec![SEED_COVER_CONCRETE.to_string()],
        },
        Project {
            id: "3".to_string(),
            title: "VESSEL OF LIGHT".to_string(),
            category: "Short Film".to_string(),
            year: "2023".to_string(),
            description:
                "Documentaire expérimental sur les artisans verriers du nord de la France."
                    .to_string(),
            cover_image: SEED_COVER_VESSEL.to_string(),
            images: vec![SEED_COVER_VESSEL.to_string()],
        },
    ]
}

fn default_bio() -> String {
    DEFAULT_BIO.to_string()
}

fn default_showreel_url() -> String {
    DEFAULT_SHOWREEL_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_has_seed_projects() {
        let content = SiteContent::default();
        assert_eq!(content.projects.len(), 3);
        let ids: Vec<_> = content.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(content.bio, DEFAULT_BIO);
        assert_eq!(content.showreel_url, DEFAULT_SHOWREEL_URL);
    }

    #[test]
    fn test_project_serializes_camel_case() {
        let project = Project {
            id: "7".to_string(),
            cover_image: "data:image/png;base64,AAAA".to_string(),
            ..Project::default()
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["coverImage"], "data:image/png;base64,AAAA");
        assert!(json.get("cover_image").is_none());
    }

    #[test]
    fn test_partial_project_fills_missing_fields() {
        let project: Project = serde_json::from_str(r#"{"id":"9","title":"Only title"}"#).unwrap();
        assert_eq!(project.title, "Only title");
        assert!(project.images.is_empty());
        assert!(project.description.is_empty());
    }

    #[test]
    fn test_partial_content_uses_defaults() {
        let content: SiteContent = serde_json::from_str(r#"{"bio":"x"}"#).unwrap();
        assert_eq!(content.bio, "x");
        assert_eq!(content.projects.len(), 3);
        assert_eq!(content.showreel_url, DEFAULT_SHOWREEL_URL);
    }

    #[test]
    fn test_is_new() {
        assert!(Project::default().is_new());
        let saved = Project {
            id: "1".to_string(),
            ..Project::default()
        };
        assert!(!saved.is_new());
    }
}
