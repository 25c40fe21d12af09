//! `lightbnb users`: look up and register accounts

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use lightbnb_db::{NewUser, Store};
use serde_json::Value;

use super::to_json;

#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Look up one user by email or id (prints null when absent)
    Get(GetArgs),
    /// Register a user; the password is stored as given
    Add(AddArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("key").required(true).args(["email", "id"])))]
pub struct GetArgs {
    /// Email address (matched case-insensitively)
    #[arg(long)]
    pub email: Option<String>,

    /// Numeric user id
    #[arg(long)]
    pub id: Option<i32>,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Password, already hashed by the caller
    #[arg(long)]
    pub password: String,
}

pub async fn run_users(args: UsersArgs, store: &dyn Store) -> Result<Value> {
    match args.command {
        UsersCommand::Get(args) => {
            let user = match (args.email, args.id) {
                (Some(email), _) => store.get_user_with_email(&email).await?,
                (None, Some(id)) => store.get_user_with_id(id).await?,
                (None, None) => None,
            };
            to_json(&user)
        }
        UsersCommand::Add(args) => {
            let user = store
                .add_user(&NewUser::new(args.name, args.email, args.password))
                .await?;
            tracing::info!(id = user.id, "user added");
            to_json(&user)
        }
    }
}
