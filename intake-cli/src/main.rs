//! Intake Command Line Interface
//!
//! Usage:
//!   intake init            - Initialize the database schema
//!   intake start           - Start the intake API server
//!   intake key create      - Provision an API key
//!   intake key list        - List API keys
//!   intake key revoke <id> - Deactivate an API key

use clap::{Parser, Subcommand};
use intake_api::{run_server, ApiConfig};
use intake_db::SqliteStore;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Legal-case intake pipeline CLI")]
#[command(version)]
struct Cli {
    /// Database file path
    #[arg(long, default_value = "intake.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,

    /// Start the intake API server
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage API keys
    Key {
        #[command(subcommand)]
        action: KeyCommands,
    },
}

#[derive(Subcommand)]
enum KeyCommands {
    /// Provision a new API key and print the secret (shown only once)
    Create {
        /// Human-readable key name
        #[arg(short, long)]
        name: String,
        /// Hourly request limit
        #[arg(short, long, default_value = "100")]
        limit: i64,
        /// Days until the key expires (never, if omitted)
        #[arg(short, long)]
        expires_days: Option<i64>,
    },
    /// List provisioned keys
    List,
    /// Deactivate a key
    Revoke {
        /// Key id
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match cli.command {
        Commands::Init => {
            println!("Initializing intake database at {}...", cli.db.display());

            let store = SqliteStore::open(&cli.db)?;
            store.init_schema()?;

            println!("Database schema initialized successfully.");
            Ok(())
        }

        Commands::Start { host, port } => {
            println!("Starting intake API server on {}:{}...", host, port);

            let store = SqliteStore::open(&cli.db)?;
            let config = ApiConfig {
                host,
                port,
                enable_cors: true,
            };

            run_server(config, store).await?;
            Ok(())
        }

        Commands::Key { action } => commands::handle_key_command(action, &cli.db),
    }
}
