//! Input types and shared records
//!
//! Row types returned by queries live next to their repository in
//! `db::repos`; this module holds what callers construct.

pub mod filter;
pub mod limit;
pub mod property;
pub mod reservation;
pub mod user;

pub use filter::PropertyFilter;
pub use limit::{RowLimit, DEFAULT_LIMIT};
pub use property::NewProperty;
pub use reservation::{PropertyReview, Reservation};
pub use user::{normalize_email, NewUser};
