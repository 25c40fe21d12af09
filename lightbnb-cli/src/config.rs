//! CLI configuration: `~/.lightbnb/config.toml` and `.env` loading

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{DEFAULT_LIMIT, DEFAULT_MAX_CONNECTIONS};
use serde::{Deserialize, Serialize};

const TEMPLATE: &str = include_str!("../config.template.toml");

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

/// Load `.env` files so clap's `env` fallbacks see them.
///
/// The current directory wins over `~/.lightbnb/.env`; neither overwrites
/// variables that are already set. Returns the files that were read.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub default_limit: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightbnbConfig {
    pub database: DatabaseConfig,
    pub listing: ListingConfig,
}

impl LightbnbConfig {
    pub fn path() -> Result<PathBuf> {
        config_dir()
            .map(|dir| dir.join("config.toml"))
            .context("Could not determine home directory")
    }

    /// Load the user config, or defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Pick the database URL: flag or `DATABASE_URL` first, then the file.
    pub fn database_url(&self, from_cli: Option<String>) -> Result<String> {
        from_cli
            .filter(|url| !url.is_empty())
            .or_else(|| self.database.url.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no database URL: pass --database-url, set DATABASE_URL, \
                     or run `lightbnb config init` and edit database.url"
                )
            })
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a starter config file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", LightbnbConfig::path()?.display());
        }
        ConfigCommands::Show => {
            let config = LightbnbConfig::load()?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
            print!("{rendered}");
        }
        ConfigCommands::Init(args) => {
            let path = LightbnbConfig::path()?;
            init_at(&path, args.force)?;
            println!("Created config at: {}", path.display());
        }
    }
    Ok(())
}

fn init_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
