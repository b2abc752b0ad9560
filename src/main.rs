//! folio CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use folio::commands::{self, secret::SecretAction, serve::ServeOverrides};
use folio::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content server for a single-artist portfolio", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ./folio.toml, then $FOLIO_HOME/folio.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the content API
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Keep local content in memory only
        #[arg(long)]
        memory: bool,
    },
    /// Print the current content as JSON
    Show,
    /// Manage the admin passphrase
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
    /// Generate an artist biography
    Bio {
        /// Keywords (random built-in set if omitted)
        keywords: Option<String>,
        /// Store the result as the site bio
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(LogFormat::from_env(cli.log_json));

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, memory } => {
            commands::serve::execute(config, ServeOverrides { host, port, memory }).await
        },
        Commands::Show => commands::show::execute(&config).await,
        Commands::Secret { action } => commands::secret::execute(&config, action).await,
        Commands::Bio { keywords, apply } => {
            commands::bio::execute(&config, keywords, apply).await
        },
    }
}
