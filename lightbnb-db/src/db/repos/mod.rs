//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and maps one operation onto one
//! SQL statement. No repository opens a transaction.

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::{Property, PropertyListing, PropertyRepo};
pub use reservations::{PastReservation, ReservationRepo};
pub use users::{User, UserRepo};
