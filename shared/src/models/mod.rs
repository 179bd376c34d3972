//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are Unix
//! millis, all monetary values are `f64` at the row boundary.

pub mod cart;
pub mod combo;
pub mod dish;
pub mod order;
pub mod report;
pub mod user;

// Re-exports
pub use cart::*;
pub use combo::*;
pub use dish::*;
pub use order::*;
pub use report::*;
pub use user::*;
