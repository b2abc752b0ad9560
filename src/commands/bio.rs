//! `folio bio` - generate a biography.

use anyhow::Result;

use crate::app::App;
use crate::bio;
use crate::config::Config;

/// Execute the bio command. Without keywords, one of the built-in sets is
/// used. With `apply`, the text also replaces the stored bio.
pub async fn execute(config: &Config, keywords: Option<String>, apply: bool) -> Result<()> {
    let keywords = keywords
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| bio::random_keywords().to_string());

    let app = App::start(config).await?;
    let text = app.generator().generate(&keywords).await;

    println!("Keywords: {keywords}");
    println!();
    println!("{text}");

    if apply {
        app.store().set_bio(text);
        println!();
        println!("Bio updated");
    }

    app.shutdown().await;
    Ok(())
}
