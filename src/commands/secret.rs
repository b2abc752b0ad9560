//! `folio secret` - manage the admin passphrase from the command line.
//!
//! Writes straight to local storage; the server must not hold the database
//! open at the same time.

use anyhow::Result;
use clap::Subcommand;

use crate::app::App;
use crate::config::Config;

#[derive(Debug, Subcommand)]
pub enum SecretAction {
    /// Replace the admin passphrase
    Set {
        /// New passphrase
        value: String,
    },
    /// Restore the built-in default passphrase
    Reset,
    /// Check a passphrase without changing anything
    Check {
        /// Passphrase to test
        value: String,
    },
}

/// Execute a secret management command.
pub async fn execute(config: &Config, action: SecretAction) -> Result<()> {
    let app = App::start(config).await?;

    let result = match action {
        SecretAction::Set { value } => app.auth().set_secret(&value).await.map(|()| {
            println!("Admin passphrase updated");
        }),
        SecretAction::Reset => app.auth().set_secret("").await.map(|()| {
            println!("Admin passphrase reset to the default");
        }),
        SecretAction::Check { value } => {
            if app.auth().authenticate(&value).await.is_granted() {
                println!("Granted");
            } else {
                println!("Denied");
            }
            Ok(())
        },
    };

    app.shutdown().await;
    result
}
