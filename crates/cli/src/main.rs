//! Motoshop CLI - drive the storefront library from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! moto-cli products
//!
//! # Load the catalog, replay cart actions, and log the resulting snapshot
//! moto-cli cart add:167 add:167 add:168 update:167:-1 sub:168
//!
//! # Same, with the snapshot as JSON log lines
//! moto-cli --json cart add:167
//! ```
//!
//! # Commands
//!
//! - `products` - Fetch and list the catalog
//! - `cart` - Replay cart actions (`add:<id>`, `sub:<id>`, `update:<id>:<amount>`)
//!
//! The catalog endpoint is configured through `CATALOG_BASE_URL`,
//! `CATALOG_CATEGORY` and `CATALOG_LIMIT` (a `.env` file is honoured).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use motoshop_storefront::{CartAction, CatalogConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "moto-cli")]
#[command(author, version, about = "Motoshop CLI tools")]
struct Cli {
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list the product catalog
    Products,
    /// Load the catalog and replay cart actions
    Cart {
        /// Actions such as `add:1`, `sub:1` or `update:1:-2`
        #[arg(required = true)]
        actions: Vec<CartAction>,

        /// Stop at the first rejected action instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "motoshop_storefront=info,moto_cli=info".into());
    if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> motoshop_storefront::Result<()> {
    let config = CatalogConfig::from_env()?;

    match cli.command {
        Commands::Products => commands::products::list(&config).await,
        Commands::Cart { actions, strict } => {
            commands::cart::replay(&config, &actions, strict).await
        }
    }
}
