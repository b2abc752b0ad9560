//! Configuration types for the folio server.
//!
//! Settings come from a TOML file. Every section and field has a default, so
//! an empty file (or no file at all) yields a working local setup:
//!
//! - [`ServerConfig`] - HTTP listener settings
//! - [`StorageConfig`] - local or remote persistence
//! - [`RemoteConfig`] - remote document endpoint
//! - [`GeneratorConfig`] - biography generation
//! - [`SiteConfig`] - site identity shown on the home view

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bio;
use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// folio.toml configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub remote: Option<RemoteConfig>,
    pub generator: GeneratorConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
            max_body_mb: constants::DEFAULT_MAX_BODY_MB,
        }
    }
}

/// Which persistence adapter backs the content store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub mode: StorageMode,
    /// Database file for local slots. Defaults to `$FOLIO_HOME/content.redb`.
    pub path: Option<PathBuf>,
    /// Keep local slots in memory only. Nothing survives a restart.
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: String,
    pub collection: String,
    pub document: String,
    pub poll_interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            collection: constants::DEFAULT_COLLECTION.to_string(),
            document: constants::DEFAULT_DOCUMENT.to_string(),
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
            timeout_ms: constants::DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: bio::DEFAULT_MODEL.to_string(),
            api_key_env: constants::DEFAULT_API_KEY_ENV.to_string(),
            base_url: bio::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_SITE_TITLE.to_string(),
            tagline: constants::DEFAULT_SITE_TAGLINE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0 or a zero body limit
    /// - Remote mode without a `[remote]` section
    /// - Remote URL that does not parse or is not http(s)
    /// - Zero poll interval or timeout
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Server
        if self.server.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)\n  \
                 Common ports: 3000 (default), 8080, 8000"
                    .to_string(),
            );
        } else if self.server.port < 1024 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 3000, 8080) to avoid permission issues",
                self.server.port
            ));
        }

        if self.server.max_body_mb == 0 {
            errors.push("server.max_body_mb cannot be 0".to_string());
        }

        // 2. Storage
        match (self.storage.mode, &self.remote) {
            (StorageMode::Remote, None) => errors.push(
                "storage.mode is \"remote\" but no [remote] section is configured\n  \
                 Add [remote] with at least: url = \"https://...\""
                    .to_string(),
            ),
            (StorageMode::Remote, Some(remote)) => remote.validate(&mut errors, &mut warnings),
            (StorageMode::Local, Some(_)) => warnings.push(
                "[remote] is configured but storage.mode is \"local\"; it will be ignored"
                    .to_string(),
            ),
            (StorageMode::Local, None) => {},
        }

        if self.storage.mode == StorageMode::Local
            && self.storage.in_memory
            && self.storage.path.is_some()
        {
            warnings.push(
                "storage.path is ignored because storage.in_memory is enabled".to_string(),
            );
        }

        // 3. Generator
        if self.generator.model.trim().is_empty() {
            errors.push("generator.model cannot be empty".to_string());
        }
        if url::Url::parse(&self.generator.base_url).is_err() {
            errors.push(format!(
                "generator.base_url is not a valid URL: '{}'",
                self.generator.base_url
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}

impl RemoteConfig {
    fn validate(&self, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
        match url::Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if url.scheme() == "http" && url.host_str() != Some("127.0.0.1") {
                    warnings.push(format!(
                        "remote.url '{}' is not encrypted\n  \
                         Content and edits travel in clear text",
                        self.url
                    ));
                }
            },
            Ok(url) => errors.push(format!(
                "remote.url must use http or https (got scheme '{}')",
                url.scheme()
            )),
            Err(e) => errors.push(format!("remote.url is not a valid URL '{}': {e}", self.url)),
        }

        if self.collection.trim().is_empty() {
            errors.push("remote.collection cannot be empty".to_string());
        }
        if self.document.trim().is_empty() {
            errors.push("remote.document cannot be empty".to_string());
        }
        if self.poll_interval_ms == 0 {
            errors.push("remote.poll_interval_ms cannot be 0".to_string());
        } else if self.poll_interval_ms < 250 {
            warnings.push(format!(
                "remote.poll_interval_ms {} is very low\n  \
                 Recommendation: 1000-5000 to avoid hammering the endpoint",
                self.poll_interval_ms
            ));
        }
        if self.timeout_ms == 0 {
            errors.push("remote.timeout_ms cannot be 0".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_config(url: &str) -> Config {
        Config {
            storage: StorageConfig {
                mode: StorageMode::Remote,
                ..StorageConfig::default()
            },
            remote: Some(RemoteConfig {
                url: url.to_string(),
                ..RemoteConfig::default()
            }),
            ..Config::default()
        }
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, constants::DEFAULT_PORT);
        assert_eq!(config.storage.mode, StorageMode::Local);
        assert!(config.remote.is_none());
        assert_eq!(config.site.title, constants::DEFAULT_SITE_TITLE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[server]
host = "0.0.0.0"
port = 8080

[storage]
mode = "remote"

[remote]
url = "https://store.example/v1"
collection = "site"
poll_interval_ms = 1500

[generator]
model = "gemini-test"

[site]
title = "STUDIO"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.max_body_mb, constants::DEFAULT_MAX_BODY_MB);
        assert_eq!(config.storage.mode, StorageMode::Remote);
        let remote = config.remote.as_ref().unwrap();
        assert_eq!(remote.collection, "site");
        assert_eq!(remote.document, constants::DEFAULT_DOCUMENT);
        assert_eq!(remote.poll_interval_ms, 1500);
        assert_eq!(config.generator.model, "gemini-test");
        assert_eq!(config.site.tagline, constants::DEFAULT_SITE_TAGLINE);

        let result = config.validate().unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_unknown_storage_mode_is_rejected() {
        let result = toml::from_str::<Config>("[storage]\nmode = \"cloud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("port cannot be 0"));
    }

    #[test]
    fn test_validate_privileged_port_warns() {
        let mut config = Config::default();
        config.server.port = 80;

        let result = config.validate().unwrap();
        assert!(result.has_warnings());
        assert!(result.warnings[0].contains("privileged"));
    }

    #[test]
    fn test_validate_remote_mode_requires_section() {
        let config = Config {
            storage: StorageConfig {
                mode: StorageMode::Remote,
                ..StorageConfig::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("no [remote] section"));
    }

    #[test]
    fn test_validate_remote_url() {
        assert!(remote_config("https://store.example").validate().is_ok());

        let err = remote_config("not a url").validate().unwrap_err().to_string();
        assert!(err.contains("not a valid URL"));

        let err = remote_config("ftp://store.example")
            .validate()
            .unwrap_err()
            .to_string();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_validate_plain_http_warns_unless_loopback() {
        let result = remote_config("http://store.example").validate().unwrap();
        assert!(result.has_warnings());

        let result = remote_config("http://127.0.0.1:9000").validate().unwrap();
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_validate_zero_poll_interval() {
        let mut config = remote_config("https://store.example");
        if let Some(remote) = config.remote.as_mut() {
            remote.poll_interval_ms = 0;
        }

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("poll_interval_ms cannot be 0"));
    }

    #[test]
    fn test_validate_collects_multiple_errors() {
        let mut config = remote_config("https://store.example");
        config.server.port = 0;
        if let Some(remote) = config.remote.as_mut() {
            remote.collection = String::new();
        }

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("port cannot be 0"));
        assert!(err.contains("collection cannot be empty"));
    }

    #[test]
    fn test_ignored_remote_section_warns() {
        let config = Config {
            remote: Some(RemoteConfig::default()),
            ..Config::default()
        };

        let result = config.validate().unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("ignored")));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("folio.toml")).unwrap();
        assert_eq!(config.server.port, constants::DEFAULT_PORT);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[server\nport = 1").unwrap();

        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }
}
