//! lightbnb-db: data access for the LightBnB rental app
//!
//! Reads and writes users, properties, and reservations. Every operation is
//! one parameterized SQL statement against an injected connection pool.
//!
//! ```ignore
//! use lightbnb_db::{create_pool, PgStore, PropertyFilter, RowLimit, Store};
//!
//! let store = PgStore::new(create_pool("postgres://localhost/lightbnb").await?);
//! let filter = PropertyFilter::new().price_range(None, Some(150));
//! let cheap = store.get_all_properties(&filter, RowLimit::default()).await?;
//! ```

pub mod db;
pub mod error;
pub mod fixtures;
pub mod memory;
pub mod models;
pub mod store;

pub use db::{
    create_pool, create_pool_with_options, run_migrations, PastReservation, Property,
    PropertyListing, User, DEFAULT_MAX_CONNECTIONS, MIGRATOR,
};
pub use error::{DbError, Result};
pub use fixtures::{seed, FixtureSet, SeedReport};
pub use memory::MemoryStore;
pub use models::{NewProperty, NewUser, PropertyFilter, RowLimit, DEFAULT_LIMIT};
pub use store::{PgStore, Store};
