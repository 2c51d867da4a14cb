//! SQLite implementation of the storage traits.

pub mod db;

pub use db::DbConnection;
