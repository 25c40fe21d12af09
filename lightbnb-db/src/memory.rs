//! In-process store for tests and offline tooling
//!
//! Mirrors what the PostgreSQL schema and queries do: case-insensitive unique
//! emails, owner references, inner-join exclusion of unreviewed properties,
//! integer price division, case-sensitive city matching, ordering and limits.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::db::{PastReservation, Property, PropertyListing, User};
use crate::error::{DbError, Result};
use crate::models::{
    normalize_email, NewProperty, NewUser, PropertyFilter, PropertyReview, Reservation, RowLimit,
};
use crate::store::Store;

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    properties: Vec<Property>,
    reservations: Vec<Reservation>,
    reviews: Vec<PropertyReview>,
}

impl State {
    fn user_exists(&self, id: i32) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn property(&self, id: i32) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// `avg(rating)` over the property's reviews; `None` when it has none,
    /// which is exactly when the SQL inner join drops the property.
    fn average_rating(&self, property_id: i32) -> Option<f64> {
        let (sum, count) = self
            .reviews
            .iter()
            .filter(|r| r.property_id == property_id)
            .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r.rating), count + 1));
        (count > 0).then(|| sum as f64 / count as f64)
    }
}

/// Store backed by plain vectors behind a lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a reservation. Guest and property must exist.
    pub fn add_reservation(
        &self,
        guest_id: i32,
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Reservation> {
        let mut state = self.write();
        check_references(&state, guest_id, property_id)?;

        let reservation = Reservation {
            id: next_id(state.reservations.len()),
            guest_id,
            property_id,
            start_date,
            end_date,
        };
        state.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// Record a review. Guest and property must exist.
    pub fn add_review(
        &self,
        guest_id: i32,
        property_id: i32,
        rating: i16,
    ) -> Result<PropertyReview> {
        let mut state = self.write();
        check_references(&state, guest_id, property_id)?;

        let review = PropertyReview {
            id: next_id(state.reviews.len()),
            guest_id,
            property_id,
            rating,
        };
        state.reviews.push(review.clone());
        Ok(review)
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len + 1).unwrap_or(i32::MAX)
}

fn check_references(state: &State, guest_id: i32, property_id: i32) -> Result<()> {
    if !state.user_exists(guest_id) {
        return Err(DbError::InvalidReference {
            resource: "user",
            detail: format!("guest_id {guest_id} does not exist"),
        });
    }
    if state.property(property_id).is_none() {
        return Err(DbError::InvalidReference {
            resource: "property",
            detail: format!("property_id {property_id} does not exist"),
        });
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| normalize_email(&u.email) == email)
            .cloned())
    }

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn add_user(&self, user: &NewUser) -> Result<User> {
        let mut state = self.write();
        let email = normalize_email(&user.email);
        if state.users.iter().any(|u| normalize_email(&u.email) == email) {
            return Err(DbError::Conflict {
                resource: "user",
                key: user.email.clone(),
            });
        }

        let user = User {
            id: next_id(state.users.len()),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: RowLimit,
    ) -> Result<Vec<PastReservation>> {
        let today = Utc::now().date_naive();
        let state = self.read();

        let mut rows: Vec<(i32, PastReservation)> = state
            .reservations
            .iter()
            .filter(|r| r.guest_id == guest_id && r.end_date < today)
            .filter_map(|r| {
                let property = state.property(r.property_id)?;
                let average_rating = state.average_rating(r.property_id)?;
                Some((
                    r.id,
                    PastReservation {
                        property: property.clone(),
                        start_date: r.start_date,
                        end_date: r.end_date,
                        average_rating: Some(average_rating),
                    },
                ))
            })
            .collect();

        rows.sort_by_key(|(id, row)| (row.start_date, *id));
        Ok(rows
            .into_iter()
            .take(limit.as_usize())
            .map(|(_, row)| row)
            .collect())
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: RowLimit,
    ) -> Result<Vec<PropertyListing>> {
        let state = self.read();

        let mut rows: Vec<PropertyListing> = state
            .properties
            .iter()
            .filter(|p| filter.city_filter().map_or(true, |city| p.city.contains(city)))
            .filter(|p| filter.owner_id.map_or(true, |owner| p.owner_id == owner))
            .filter(|p| filter.accepts_price(p.cost_per_night))
            .filter_map(|p| {
                let average_rating = state.average_rating(p.id)?;
                Some(PropertyListing {
                    property: p.clone(),
                    average_rating: Some(average_rating),
                })
            })
            .filter(|row| match (filter.minimum_rating, row.average_rating) {
                (Some(minimum), Some(average)) => average >= minimum,
                _ => true,
            })
            .collect();

        rows.sort_by_key(|row| (row.property.cost_per_night, row.property.id));
        rows.truncate(limit.as_usize());
        Ok(rows)
    }

    async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        let mut state = self.write();
        if !state.user_exists(property.owner_id) {
            return Err(DbError::InvalidReference {
                resource: "user",
                detail: format!("owner_id {} does not exist", property.owner_id),
            });
        }

        let property = Property {
            id: next_id(state.properties.len()),
            owner_id: property.owner_id,
            title: property.title.clone(),
            description: property.description.clone(),
            thumbnail_photo_url: property.thumbnail_photo_url.clone(),
            cover_photo_url: property.cover_photo_url.clone(),
            cost_per_night: property.cost_per_night,
            street: property.street.clone(),
            city: property.city.clone(),
            province: property.province.clone(),
            post_code: property.post_code.clone(),
            country: property.country.clone(),
            parking_spaces: property.parking_spaces,
            number_of_bathrooms: property.number_of_bathrooms,
            number_of_bedrooms: property.number_of_bedrooms,
        };
        state.properties.push(property.clone());
        Ok(property)
    }
}
