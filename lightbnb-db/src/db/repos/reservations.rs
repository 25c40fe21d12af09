//! Reservation repository - past stays for a guest

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::Property;
use crate::error::DbError;
use crate::models::RowLimit;

/// A finished stay: the reserved property, the dates, and the property's
/// average review rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PastReservation {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average_rating: Option<f64>,
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reservations of `guest_id` that ended before today, oldest first.
    ///
    /// Grouped per property+reservation pair so a property booked twice
    /// yields two rows. Properties with no reviews drop out of the inner join.
    #[tracing::instrument(skip(self), err)]
    pub async fn past_for_guest(
        &self,
        guest_id: i32,
        limit: RowLimit,
    ) -> Result<Vec<PastReservation>, DbError> {
        let rows = sqlx::query_as::<_, PastReservation>(
            r#"
            SELECT
                properties.*,
                reservations.start_date,
                reservations.end_date,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
              AND reservations.end_date < now()::date
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
