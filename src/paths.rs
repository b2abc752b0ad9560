//! Path resolution for folio data.
//!
//! # Base Directory
//! - [`get_folio_dir`] - `~/.folio/` (or `FOLIO_HOME`)
//!
//! # Files
//! - [`get_content_db_path`] - `~/.folio/content.redb` (local content slots)
//! - [`get_config_path`] - `~/.folio/folio.toml` (server settings)
//!
//! [`find_config`] prefers a `folio.toml` in the working directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory.
pub const FOLIO_HOME_ENV: &str = "FOLIO_HOME";

/// Config file name, looked up in the working directory then the base directory.
pub const CONFIG_FILE: &str = "folio.toml";

/// Get the folio base directory.
///
/// Resolution order:
/// 1. `FOLIO_HOME` environment variable (if set and non-empty)
/// 2. `~/.folio/` (default)
pub fn get_folio_dir() -> Result<PathBuf> {
    resolve_folio_dir(std::env::var(FOLIO_HOME_ENV).ok(), dirs::home_dir())
}

fn resolve_folio_dir(folio_home: Option<String>, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(folio_home) = folio_home
        && !folio_home.is_empty()
    {
        return Ok(PathBuf::from(folio_home));
    }

    let home = home.context("Failed to get home directory")?;
    Ok(home.join(".folio"))
}

/// Get the local content database path: `~/.folio/content.redb`
pub fn get_content_db_path() -> Result<PathBuf> {
    Ok(get_folio_dir()?.join("content.redb"))
}

/// Get the default config path: `~/.folio/folio.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_folio_dir()?.join(CONFIG_FILE))
}

/// Finds the config file to load when none was given on the command line.
///
/// Returns `./folio.toml` when present, otherwise the base directory path
/// (which may not exist; callers fall back to defaults).
pub fn find_config() -> Result<PathBuf> {
    let local = Path::new(CONFIG_FILE);
    if local.is_file() {
        return Ok(local.to_path_buf());
    }
    get_config_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_folio_home_overrides_home() {
        let dir = resolve_folio_dir(
            Some("/srv/folio".to_string()),
            Some(PathBuf::from("/home/artist")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/srv/folio"));
    }

    #[test]
    fn test_empty_folio_home_is_ignored() {
        let dir =
            resolve_folio_dir(Some(String::new()), Some(PathBuf::from("/home/artist"))).unwrap();
        assert_eq!(dir, PathBuf::from("/home/artist/.folio"));
    }

    #[test]
    fn test_missing_home_is_an_error() {
        assert!(resolve_folio_dir(None, None).is_err());
    }

    #[test]
    fn test_derived_paths_structure() {
        if let Ok(base) = get_folio_dir() {
            let db = get_content_db_path().unwrap();
            assert!(db.starts_with(&base));
            assert_eq!(db.extension().and_then(|e| e.to_str()), Some("redb"));
            assert!(get_config_path().unwrap().ends_with(CONFIG_FILE));
        }
    }

    #[test]
    #[serial]
    fn test_find_config_prefers_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = find_config();

        // Restore original directory (ignore errors since cwd might have changed)
        let _ = std::env::set_current_dir(&original_dir);

        assert_eq!(result.unwrap(), PathBuf::from(CONFIG_FILE));
    }

    #[test]
    #[serial]
    fn test_find_config_falls_back_to_base_dir() {
        let dir = tempfile::tempdir().unwrap();

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = find_config();

        let _ = std::env::set_current_dir(&original_dir);

        if let Ok(expected) = get_config_path() {
            assert_eq!(result.unwrap(), expected);
        }
    }
}
