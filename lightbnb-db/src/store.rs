//! The data access contract and its PostgreSQL implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{
    PastReservation, Property, PropertyListing, PropertyRepo, ReservationRepo, User, UserRepo,
};
use crate::error::Result;
use crate::models::{NewProperty, NewUser, PropertyFilter, RowLimit};

/// The six LightBnB data operations.
///
/// Implementations are independent request/response calls with no ordering
/// between them; a write is not guaranteed visible to a concurrent read.
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a user by email, ignoring case.
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>>;

    /// Insert a user. Email and password are stored exactly as given.
    async fn add_user(&self, user: &NewUser) -> Result<User>;

    /// A guest's finished reservations, oldest first.
    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: RowLimit,
    ) -> Result<Vec<PastReservation>>;

    /// Reviewed properties matching `filter`, cheapest first.
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: RowLimit,
    ) -> Result<Vec<PropertyListing>>;

    async fn add_property(&self, property: &NewProperty) -> Result<Property>;
}

/// PostgreSQL-backed store over an injected pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        UserRepo::new(&self.pool).find_by_email(email).await
    }

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        UserRepo::new(&self.pool).find_by_id(id).await
    }

    async fn add_user(&self, user: &NewUser) -> Result<User> {
        UserRepo::new(&self.pool).create(user).await
    }

    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: RowLimit,
    ) -> Result<Vec<PastReservation>> {
        ReservationRepo::new(&self.pool)
            .past_for_guest(guest_id, limit)
            .await
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: RowLimit,
    ) -> Result<Vec<PropertyListing>> {
        PropertyRepo::new(&self.pool).search(filter, limit).await
    }

    async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        PropertyRepo::new(&self.pool).create(property).await
    }
}
