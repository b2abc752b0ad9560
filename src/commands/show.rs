//! `folio show` - print the stored content.

use anyhow::{Context, Result};

use crate::app::App;
use crate::config::Config;

/// Execute the show command.
pub async fn execute(config: &Config) -> Result<()> {
    let app = App::start(config).await?;
    let content = app.store().snapshot();
    app.shutdown().await;

    let json = serde_json::to_string_pretty(&content).context("Failed to serialize content")?;
    println!("{json}");
    Ok(())
}
