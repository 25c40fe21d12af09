//! lightbnb CLI - query and maintain the LightBnB rental database
//!
//! Provides:
//! - User lookup and registration (`users`)
//! - A guest's past reservations (`reservations`)
//! - Property search and creation (`properties`)
//! - Schema migrations and fixture seeding (`db`)
//! - Config management and shell completions

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lightbnb_db::{create_pool_with_options, PgStore};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

use config::LightbnbConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and maintain the LightBnB rental database",
    long_about = "Look up users, search properties, list past reservations, and manage the \
                  LightBnB PostgreSQL schema. Results are printed as JSON on stdout."
)]
struct Cli {
    /// PostgreSQL connection string (overrides database.url in config)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Enable debug logging (shows generated SQL)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or register users
    Users(commands::users::UsersArgs),
    /// List a guest's past reservations, oldest first
    Reservations(commands::reservations::ReservationsArgs),
    /// Search or add properties
    Properties(commands::properties::PropertiesArgs),
    /// Database maintenance (migrate, seed)
    Db(commands::db::DbArgs),
    /// Manage lightbnb configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so DATABASE_URL from .env reaches clap
    let env_files = config::load_dotenv();
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }) {
        // only fails when a global subscriber is already installed
        eprintln!("warning: logging not initialized: {err}");
    }
    for path in &env_files {
        debug!("Loaded .env from {}", path.display());
    }

    let url = cli.database_url;
    let output = match cli.command {
        Commands::Completions(args) => return run_completions(args),
        Commands::Config(args) => return config::run_config(args),
        Commands::Users(args) => {
            let session = Session::open(url).await?;
            commands::run_users(args, &session.store).await?
        }
        Commands::Reservations(args) => {
            let session = Session::open(url).await?;
            commands::run_reservations(args, &session.store, session.default_limit).await?
        }
        Commands::Properties(args) => {
            let session = Session::open(url).await?;
            commands::run_properties(args, &session.store, session.default_limit).await?
        }
        Commands::Db(args) => {
            let session = Session::open(url).await?;
            commands::run_db(args, &session.store).await?
        }
    };

    commands::print_json(&output)
}

/// Store plus the config values commands need
struct Session {
    store: PgStore,
    default_limit: u32,
}

impl Session {
    async fn open(database_url: Option<String>) -> Result<Self> {
        let config = LightbnbConfig::load()?;
        let url = config.database_url(database_url)?;
        let pool = create_pool_with_options(&url, config.database.max_connections)
            .await
            .context("Failed to connect to database")?;
        info!("connected to database");

        Ok(Self {
            store: PgStore::new(pool),
            default_limit: config.listing.default_limit,
        })
    }
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
