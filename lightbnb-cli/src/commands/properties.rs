//! `lightbnb properties`: search listings and add new ones

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{NewProperty, PropertyFilter, RowLimit, Store};
use serde_json::Value;
use tokio::io::AsyncReadExt;

use super::to_json;

#[derive(Parser, Debug)]
pub struct PropertiesArgs {
    #[command(subcommand)]
    pub command: PropertiesCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertiesCommand {
    /// Search reviewed properties, cheapest first
    List(ListArgs),
    /// Add a property from a JSON document
    ///
    /// The document carries every listing field, with cost_per_night in
    /// cents:
    ///   lightbnb properties add --file listing.json
    ///   cat listing.json | lightbnb properties add
    Add(AddArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// City name substring (case-sensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Lowest nightly price, in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub min_price: Option<i32>,

    /// Highest nightly price, in dollars
    #[arg(long, value_name = "DOLLARS")]
    pub max_price: Option<i32>,

    /// Lowest average review rating
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<f64>,

    /// Maximum rows (default: listing.default_limit from config)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

impl ListArgs {
    fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// JSON file with the property fields (reads stdin if omitted)
    #[arg(long, short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}

pub async fn run_properties(
    args: PropertiesArgs,
    store: &dyn Store,
    default_limit: u32,
) -> Result<Value> {
    match args.command {
        PropertiesCommand::List(args) => {
            let limit = RowLimit::new(args.limit.unwrap_or(default_limit));
            let rows = store.get_all_properties(&args.filter(), limit).await?;
            tracing::debug!(rows = rows.len(), "property search");
            to_json(&rows)
        }
        PropertiesCommand::Add(args) => {
            let property = read_property(args.file).await?;
            let created = store.add_property(&property).await?;
            tracing::info!(id = created.id, title = %created.title, "property added");
            to_json(&created)
        }
    }
}

async fn read_property(file: Option<PathBuf>) -> Result<NewProperty> {
    let (source, raw) = match file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), raw)
        }
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read stdin")?;
            ("stdin".to_string(), raw)
        }
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid property JSON from {source}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;

    fn list(args: ListArgs) -> PropertiesArgs {
        PropertiesArgs {
            command: PropertiesCommand::List(args),
        }
    }

    fn titles(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["title"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn flags_map_onto_filter() {
        let args = ListArgs {
            city: Some("Vancouver".into()),
            owner_id: Some(3),
            min_price: Some(50),
            max_price: Some(150),
            min_rating: Some(4.0),
            limit: None,
        };
        let expected = PropertyFilter::new()
            .city("Vancouver")
            .owner_id(3)
            .price_range(Some(50), Some(150))
            .minimum_rating(4.0);
        assert_eq!(args.filter(), expected);
    }

    #[tokio::test]
    async fn list_uses_default_limit_and_filters() {
        let store = testing::store().await;

        let all = run_properties(list(ListArgs::default()), &store, 2)
            .await
            .unwrap();
        assert_eq!(titles(&all), ["loft", "condo"]);

        let priced = ListArgs {
            min_price: Some(100),
            ..Default::default()
        };
        let value = run_properties(list(priced), &store, 10).await.unwrap();
        assert_eq!(titles(&value), ["condo", "cabin"]);
        assert_eq!(value[1]["average_rating"], 4.0);
    }

    #[tokio::test]
    async fn add_reads_json_file() {
        let store = testing::store().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.json");
        let input = testing::listing(1, "treehouse", "Tofino", 22_000);
        std::fs::write(&path, serde_json::to_string(&input).unwrap()).unwrap();

        let args = PropertiesArgs {
            command: PropertiesCommand::Add(AddArgs { file: Some(path) }),
        };
        let created = run_properties(args, &store, 10).await.unwrap();

        assert_eq!(created["id"], 4);
        assert_eq!(created["title"], "treehouse");
        assert_eq!(created["cost_per_night"], 22_000);
    }

    #[tokio::test]
    async fn add_rejects_incomplete_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.json");
        std::fs::write(&path, r#"{"title": "no owner"}"#).unwrap();

        let err = read_property(Some(path)).await.unwrap_err();
        assert!(err.to_string().contains("Invalid property JSON"));
    }
}
