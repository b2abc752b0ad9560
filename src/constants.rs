//! Shared constants.

/// Default HTTP port for `folio serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default request body limit in megabytes. Inline images and videos travel
/// as data URLs inside JSON, so this is larger than axum's 2 MB default.
pub const DEFAULT_MAX_BODY_MB: usize = 16;

/// Default poll interval for the HTTP document watcher.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Default timeout for remote document requests.
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 5_000;

/// Fixed collection/id pair of the remote document.
pub const DEFAULT_COLLECTION: &str = "portfolio";
pub const DEFAULT_DOCUMENT: &str = "content";

/// Passphrase accepted when no admin secret has been stored.
pub const DEFAULT_SECRET: &str = "Husson";

/// Site identity shown on the public home view.
pub const DEFAULT_SITE_TITLE: &str = "MAXIME HUSSON";
pub const DEFAULT_SITE_TAGLINE: &str = "Visual Works & Motion Theory";

/// Environment variable read for the generation API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
