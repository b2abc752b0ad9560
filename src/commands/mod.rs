//! CLI command implementations.
//!
//! - [`serve`] - HTTP API server
//! - [`show`] - Print the current content as JSON
//! - [`secret`] - Manage the admin passphrase
//! - [`bio`] - Generate a biography from keywords

pub mod bio;
pub mod secret;
pub mod serve;
pub mod show;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::paths;

/// Loads and validates the configuration.
///
/// An explicit `path` must exist. Without one, `./folio.toml` or
/// `$FOLIO_HOME/folio.toml` is used when present, otherwise defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = paths::find_config()?;
            debug!(path = %path.display(), "Resolved config path");
            Config::load_or_default(&path)?
        },
    };

    let result = config.validate().context("Invalid configuration")?;
    for warning in &result.warnings {
        warn!("{warning}");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("port cannot be 0"));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[site]\ntitle = \"STUDIO\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.site.title, "STUDIO");
    }
}
