//! Data models
//!
//! Shared between order-server and its HTTP clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake generated).

pub mod order;
pub mod product;
pub mod profile;
pub mod stats;

// Re-exports
pub use order::*;
pub use product::*;
pub use profile::*;
pub use stats::*;
