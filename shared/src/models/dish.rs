//! Dish Model

use serde::{Deserialize, Serialize};

/// Sale status shared by dishes and combo meals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum SaleStatus {
    Enabled,
    Disabled,
}

impl Default for SaleStatus {
    fn default() -> Self {
        Self::Disabled
    }
}

/// Dish entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
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
    pub flavors: Vec<DishFlavor>,
}

/// Flavor row — child of a dish, replaced wholesale on every dish update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishFlavor {
    pub id: i64,
    pub dish_id: i64,
    /// Flavor dimension, e.g. "辣度"
    pub name: String,
    /// JSON-encoded option list, e.g. `["不辣","微辣","中辣"]`
    pub value: String,
}

impl DishFlavor {
    /// Decode the JSON option list; malformed storage degrades to empty.
    pub fn values(&self) -> Vec<String> {
        serde_json::from_str(&self.value).unwrap_or_default()
    }
}

/// Flavor payload — no id/dish_id, those are stamped at insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishFlavorInput {
    pub name: String,
    /// JSON-encoded option list
    pub value: String,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Defaults to DISABLED — a new dish never goes on sale implicitly
    pub status: Option<SaleStatus>,
    #[serde(default)]
    pub flavors: Vec<DishFlavorInput>,
}

/// Update dish payload
///
/// Scalar fields are partial (None = keep). The flavor set is always
/// replaced: prior rows are deleted and `flavors` is inserted, so an
/// empty list leaves the dish with zero flavors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: Option<SaleStatus>,
    #[serde(default)]
    pub flavors: Vec<DishFlavorInput>,
}
