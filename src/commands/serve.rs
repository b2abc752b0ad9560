//! `folio serve` - run the HTTP API.

use anyhow::Result;
use tracing::info;

use crate::app::App;
use crate::config::Config;
use crate::http;

/// Command-line overrides for file settings.
#[derive(Debug, Default, Clone)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Keep local slots in memory only.
    pub memory: bool,
}

impl ServeOverrides {
    /// Applies the overrides on top of `config`.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.memory {
            config.storage.in_memory = true;
        }
        config
    }
}

/// Execute the serve command.
pub async fn execute(config: Config, overrides: ServeOverrides) -> Result<()> {
    let config = overrides.apply(config);
    config.validate()?;

    info!(
        mode = ?config.storage.mode,
        in_memory = config.storage.in_memory,
        "Starting folio"
    );
    let app = App::start(&config).await?;
    http::serve(app, &config.server).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let config = ServeOverrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            memory: true,
        }
        .apply(Config::default());

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.storage.in_memory);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut base = Config::default();
        base.server.port = 4000;

        let config = ServeOverrides::default().apply(base);
        assert_eq!(config.server.port, 4000);
        assert!(!config.storage.in_memory);
    }
}
