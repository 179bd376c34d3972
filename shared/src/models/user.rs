//! User Model

use serde::{Deserialize, Serialize};

/// Registered customer — the user-growth metrics count these rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub create_time: i64,
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: Option<String>,
    pub phone: Option<String>,
}
