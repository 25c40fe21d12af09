//! Reservation and review rows
//!
//! The DAL never writes these; they exist so tests and the in-memory store
//! can describe booking history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reservation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Review record; only its rating is ever read, through `avg(rating)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyReview {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub rating: i16,
}
