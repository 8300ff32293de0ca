pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::StoreBackend;

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "Todo API - personal todo management server")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "json", help = "Output in human-readable text format (default)")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server until interrupted")]
    Serve {
        #[arg(long, help = "Storage backend (memory or postgres), overrides TODO_STORE")]
        store: Option<StoreBackend>,

        #[arg(long, help = "Listen port, overrides TODO_API_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Create the PostgreSQL schema if missing")]
    Migrate,

    #[command(about = "User management in the PostgreSQL store")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        match (cli.text, cli.json) {
            (false, true) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { store, port } => commands::serve::handle(store, port).await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::User { cmd } => commands::user::handle(cmd, output_format).await,
    }
}
