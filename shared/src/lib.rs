//! Shared types for the Comedor back office
//!
//! Data models and small utilities used by the server crate. DB row
//! mapping is feature-gated behind `db` so non-persistence consumers
//! compile without sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
