//! `lightbnb db`: schema and development data

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{run_migrations, seed, FixtureSet, PgStore, Store};
use serde_json::{json, Value};

use super::to_json;

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Apply pending schema migrations
    Migrate,
    /// Insert fixture users and properties
    Seed(SeedArgs),
}

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Directory with users.json and properties.json (default: bundled fixtures)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

pub async fn run_db(args: DbArgs, store: &PgStore) -> Result<Value> {
    match args.command {
        DbCommand::Migrate => {
            run_migrations(store.pool())
                .await
                .context("Failed to apply migrations")?;
            Ok(json!({ "migrated": true }))
        }
        DbCommand::Seed(args) => seed_from(args, store).await,
    }
}

async fn seed_from(args: SeedArgs, store: &dyn Store) -> Result<Value> {
    let fixtures = match &args.dir {
        Some(dir) => FixtureSet::load_dir(dir).await?,
        None => FixtureSet::bundled()?,
    };
    let report = seed(store, &fixtures)
        .await
        .context("Seeding stopped; rows inserted before the failure remain")?;
    to_json(&report)
}
