//! `lightbnb reservations`: a guest's past stays

use anyhow::Result;
use clap::Parser;
use lightbnb_db::{RowLimit, Store};
use serde_json::Value;

use super::to_json;

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest user id
    pub guest_id: i32,

    /// Maximum rows (default: listing.default_limit from config)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

pub async fn run_reservations(
    args: ReservationsArgs,
    store: &dyn Store,
    default_limit: u32,
) -> Result<Value> {
    let limit = RowLimit::new(args.limit.unwrap_or(default_limit));
    let rows = store.get_all_reservations(args.guest_id, limit).await?;
    tracing::debug!(guest_id = args.guest_id, rows = rows.len(), "past reservations");
    to_json(&rows)
}
