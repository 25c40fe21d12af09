//! Reference data for seeding a development database
//!
//! Two JSON files, `users.json` and `properties.json`. Each user carries a
//! fixture-local `id`; a property's `owner_id` refers to that id, not to a
//! database id, and is remapped while seeding.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};
use crate::models::{NewProperty, NewUser};
use crate::store::Store;

pub const USERS_FILE: &str = "users.json";
pub const PROPERTIES_FILE: &str = "properties.json";

const BUNDLED_USERS: &str = include_str!("../../fixtures/users.json");
const BUNDLED_PROPERTIES: &str = include_str!("../../fixtures/properties.json");

/// A user fixture and the id property fixtures use to name it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureUser {
    pub id: i32,
    #[serde(flatten)]
    pub user: NewUser,
}

/// Users and properties to seed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    pub users: Vec<FixtureUser>,
    pub properties: Vec<NewProperty>,
}

/// What a seed run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub properties: usize,
}

impl FixtureSet {
    /// The fixtures compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            users: parse(Path::new(USERS_FILE), BUNDLED_USERS)?,
            properties: parse(Path::new(PROPERTIES_FILE), BUNDLED_PROPERTIES)?,
        })
    }

    /// Read `users.json` and `properties.json` from `dir`.
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        let users_path = dir.join(USERS_FILE);
        let properties_path = dir.join(PROPERTIES_FILE);

        let users = tokio::fs::read_to_string(&users_path).await?;
        let properties = tokio::fs::read_to_string(&properties_path).await?;

        Ok(Self {
            users: parse(&users_path, &users)?,
            properties: parse(&properties_path, &properties)?,
        })
    }

    /// Every property owner must name a user fixture.
    fn check_owners(&self) -> Result<()> {
        let ids: HashSet<i32> = self.users.iter().map(|u| u.id).collect();
        match self.properties.iter().find(|p| !ids.contains(&p.owner_id)) {
            Some(orphan) => Err(DbError::InvalidReference {
                resource: "user",
                detail: format!(
                    "property fixture '{}' names owner_id {} but no user fixture has that id",
                    orphan.title, orphan.owner_id
                ),
            }),
            None => Ok(()),
        }
    }
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|err| DbError::fixture(path, err))
}

/// Insert every fixture through the store.
///
/// Owner references are checked before anything is written, so a broken
/// fixture set inserts nothing. A user that already exists stops the run
/// with `DbError::Conflict`.
pub async fn seed(store: &dyn Store, fixtures: &FixtureSet) -> Result<SeedReport> {
    fixtures.check_owners()?;

    let mut report = SeedReport::default();
    let mut owner_ids: HashMap<i32, i32> = HashMap::with_capacity(fixtures.users.len());

    for fixture in &fixtures.users {
        let user = store.add_user(&fixture.user).await?;
        owner_ids.insert(fixture.id, user.id);
        report.users += 1;
    }

    for property in &fixtures.properties {
        let mut property = property.clone();
        if let Some(&owner_id) = owner_ids.get(&property.owner_id) {
            property.owner_id = owner_id;
        }
        store.add_property(&property).await?;
        report.properties += 1;
    }

    tracing::info!(users = report.users, properties = report.properties, "seeded fixtures");
    Ok(report)
}
