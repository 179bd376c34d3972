//! Shopping Cart Model

use serde::{Deserialize, Serialize};

/// One line of a user's cart
///
/// Exactly one of dish_id/combo_id is set (CHECK constraint). Merge
/// identity is (user_id, dish_id|combo_id, flavor); name/image/amount are
/// catalog snapshots taken when the line was first inserted and are never
/// refreshed by subsequent merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub dish_id: Option<i64>,
    pub combo_id: Option<i64>,
    /// Cart-level customization, empty string when absent
    #[serde(default)]
    pub flavor: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    /// Unit amount
    pub amount: f64,
    /// Quantity, always >= 1
    pub number: i64,
    pub create_time: i64,
}

/// Add-to-cart / remove-from-cart payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartItemInput {
    pub dish_id: Option<i64>,
    pub combo_id: Option<i64>,
    #[serde(default)]
    pub flavor: String,
}

impl CartItemInput {
    pub fn dish(dish_id: i64) -> Self {
        Self {
            dish_id: Some(dish_id),
            ..Default::default()
        }
    }

    pub fn combo(combo_id: i64) -> Self {
        Self {
            combo_id: Some(combo_id),
            ..Default::default()
        }
    }
}
