//! tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable selecting the log format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "FOLIO_LOG_FORMAT";

const DEFAULT_FILTER: &str = "folio=info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Picks JSON when forced by flag or when the env var says so.
    pub fn resolve(force_json: bool, env_value: Option<&str>) -> Self {
        if force_json || env_value.is_some_and(|v| v.trim().eq_ignore_ascii_case("json")) {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn from_env(force_json: bool) -> Self {
        Self::resolve(force_json, std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }
}

/// Installs the global subscriber on stderr, keeping stdout for command
/// output. `RUST_LOG` overrides the default filter.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}
