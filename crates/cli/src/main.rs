//! Armoire CLI - catalog back-office management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in and persist the session
//! armoire login -e admin@example.com
//!
//! # Browse the catalog
//! armoire categories list
//! armoire products list --search wardrobe --page 2
//!
//! # Create a product from a manifest file
//! armoire products create -m wardrobe.yaml
//!
//! # Reorder a color variant's gallery
//! armoire colors reorder <PRODUCT_ID> <COLOR_ID> --from 0 --to 2
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session management
//! - `categories` - List and manage categories
//! - `models` - List and manage model verities
//! - `products` - List, inspect, and manage products
//! - `colors` - Manage a product's color variants and image order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::{CategoryAction, ColorAction, ModelAction, ProductAction};

#[derive(Parser)]
#[command(name = "armoire")]
#[command(author, version, about = "Armoire catalog back-office CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session token
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password; falls back to ARMOIRE_PASSWORD
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session and account profile
    Whoami,
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage model verities
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage a product's color variants
    Colors {
        #[command(subcommand)]
        action: ColorAction,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match &e {
            commands::CliError::Api(api) => {
                tracing::error!(detail = %api, "{}", api.user_message());
            }
            _ => tracing::error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Login { email, password } => commands::session::login(&email, password).await,
        Commands::Logout => commands::session::logout().await,
        Commands::Whoami => commands::session::whoami().await,
        Commands::Categories { action } => commands::categories::run(action).await,
        Commands::Models { action } => commands::models::run(action).await,
        Commands::Products { action } => commands::products::run(action).await,
        Commands::Colors { action } => commands::colors::run(action).await,
    }
}
