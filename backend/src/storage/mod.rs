//! # Storage Module
//!
//! Data persistence for the booking backend. The domain layer talks to
//! the traits in `traits`; `sqlite` provides the production
//! implementation backed by sqlx.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::*;
