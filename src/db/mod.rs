//! Database layer for Meal Swap
//!
//! SQLite storage for users, the food catalog and the meal log.

pub mod connection;
pub mod demo;
pub mod migrations;
pub mod store;

pub use connection::{Database, DbError, DbResult};
pub use demo::seed_demo_data;
pub use store::{SqliteFoodCatalog, SqliteMealLog};
