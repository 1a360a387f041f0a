//! # Kollny Express CLI (`kollny`)
//!
//! ## Usage
//!
//! ```bash
//! kollny --config ./config/kollny.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kollny serve` | Start the HTTP server |
//! | `kollny init` | Create the SQLite schema |
//! | `kollny recipes <ingredient>...` | Match a pantry from the terminal |
//! | `kollny catalog` | List the recipe catalog |
//! | `kollny status` | Print persistence diagnostics |

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use kollny_express::config;
use kollny_express::diagnostics;
use kollny_express::migrate;
use kollny_express::recipes;
use kollny_express::server::{self, Persistence};

/// Kollny Express — match what's in your pantry against a recipe catalog.
///
/// The config file is optional; `PORT`, `DATABASE_URL`, and `DATABASE_NAME`
/// override it.
#[derive(Parser)]
#[command(
    name = "kollny",
    about = "Kollny Express — pantry-to-recipe matching service",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Ignored if it does not exist.
    #[arg(long, global = true, default_value = "./config/kollny.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve,

    /// Initialize the database schema.
    ///
    /// Requires a `[db]` section or `DATABASE_URL`. Idempotent.
    Init,

    /// Match ingredients against the catalog and print ranked recipes.
    Recipes {
        /// Ingredients you have (case-insensitive).
        ingredients: Vec<String>,

        /// Only show recipes of this difficulty: easy, medium, or hard.
        #[arg(long)]
        difficulty: Option<String>,

        /// Only show recipes marked healthy.
        #[arg(long)]
        healthy_only: bool,
    },

    /// List every recipe in the catalog.
    Catalog,

    /// Print persistence diagnostics (same data as `GET /test`).
    Status,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Commands that don't touch configuration
    match &cli.command {
        Commands::Recipes {
            ingredients,
            difficulty,
            healthy_only,
        } => {
            return recipes::run_recipes(ingredients, difficulty.as_deref(), *healthy_only);
        }
        Commands::Catalog => return recipes::list_catalog(),
        _ => {}
    }

    let cfg = config::resolve_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Init => {
            let Some(db) = &cfg.db else {
                bail!("No database configured. Add a [db] section or set DATABASE_URL.");
            };
            migrate::run_migrations(db).await?;
            println!("Database initialized successfully.");
        }
        Commands::Status => {
            let persistence = Persistence::open(&cfg).await;
            let report = diagnostics::build_report(&cfg, persistence.status()).await;
            diagnostics::print_report(&report);
        }
        Commands::Recipes { .. } | Commands::Catalog => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
