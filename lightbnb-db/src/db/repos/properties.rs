//! Property repository
//!
//! - search: one JOIN + GROUP BY query with the average review rating;
//!   optional filters are appended through `QueryBuilder::push_bind`, so the
//!   placeholder numbers always match the bound values
//! - create: plain INSERT ... RETURNING

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::DbError;
use crate::models::{NewProperty, PropertyFilter, RowLimit};

/// Property record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Minor units (cents)
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// Property with its average review rating, for search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

const SEARCH_SELECT: &str = "SELECT properties.*, \
     avg(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     JOIN property_reviews ON properties.id = property_reviews.property_id \
     WHERE TRUE";

/// Assemble the property search.
///
/// Clause order is fixed: WHERE filters, GROUP BY, HAVING on the rating,
/// ORDER BY cost, LIMIT. Prices compare against `cost_per_night / 100`
/// (integer division) so callers filter in major units.
pub(crate) fn search_query(
    filter: &PropertyFilter,
    limit: RowLimit,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SEARCH_SELECT);

    // Case-sensitive on purpose: LIKE, not ILIKE.
    if let Some(city) = filter.city_filter() {
        builder
            .push(" AND properties.city LIKE ")
            .push_bind(format!("%{city}%"));
    }
    if let Some(owner_id) = filter.owner_id {
        builder
            .push(" AND properties.owner_id = ")
            .push_bind(owner_id);
    }
    if let Some(minimum) = filter.minimum_price_per_night {
        builder
            .push(" AND properties.cost_per_night / 100 >= ")
            .push_bind(minimum);
    }
    if let Some(maximum) = filter.maximum_price_per_night {
        builder
            .push(" AND properties.cost_per_night / 100 <= ")
            .push_bind(maximum);
    }

    builder.push(" GROUP BY properties.id");

    if let Some(rating) = filter.minimum_rating {
        builder
            .push(" HAVING avg(property_reviews.rating)::float8 >= ")
            .push_bind(rating);
    }

    builder
        .push(" ORDER BY properties.cost_per_night, properties.id LIMIT ")
        .push_bind(limit.as_i64());

    builder
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first.
    #[tracing::instrument(skip(self), err)]
    pub async fn search(
        &self,
        filter: &PropertyFilter,
        limit: RowLimit,
    ) -> Result<Vec<PropertyListing>, DbError> {
        let mut builder = search_query(filter, limit);
        tracing::debug!(sql = builder.sql(), "property search");

        let rows = builder
            .build_query_as::<PropertyListing>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Insert a property and return the stored row with its generated id.
    #[tracing::instrument(skip(self), err)]
    pub async fn create(&self, property: &NewProperty) -> Result<Property, DbError> {
        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool)
        .await
        .map_err(|err| DbError::from_write(err, "property", property.title.as_str()))
    }
}
