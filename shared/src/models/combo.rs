//! Combo Meal Model

use serde::{Deserialize, Serialize};

use super::dish::SaleStatus;

/// Combo meal entity — a sellable bundle of dishes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Combo {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    pub status: SaleStatus,
    pub create_time: i64,
    pub create_user: Option<i64>,
    pub update_time: i64,
    pub update_user: Option<i64>,

    // -- Relations (populated by application code, skipped by FromRow) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub dishes: Vec<ComboDish>,
}

/// Membership row linking a combo to one of its dishes
///
/// No independent lifecycle: rows are batch-created and batch-deleted
/// alongside the owning combo. Name and price are snapshots of the dish
/// at membership-creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ComboDish {
    pub id: i64,
    pub combo_id: i64,
    pub dish_id: i64,
    pub name: String,
    pub price: f64,
    pub copies: i64,
}

/// Membership payload — the dish reference; name/price resolved from the
/// catalog at save time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboDishInput {
    pub dish_id: i64,
    #[serde(default = "default_copies")]
    pub copies: i64,
}

fn default_copies() -> i64 {
    1
}

/// Create combo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboCreate {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: Option<SaleStatus>,
    #[serde(default)]
    pub dishes: Vec<ComboDishInput>,
}

/// Update combo payload — scalars partial, membership set replaced wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: Option<SaleStatus>,
    #[serde(default)]
    pub dishes: Vec<ComboDishInput>,
}
