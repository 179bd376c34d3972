//! Report View Models
//!
//! Plain value structs returned by the aggregation services. Series fields
//! are parallel vectors: same length as `dates`, same index = same day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-bucketed turnover series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoverReport {
    pub dates: Vec<NaiveDate>,
    /// Completed-order turnover per day, 0.0 for empty days
    pub turnover: Vec<f64>,
}

/// Day-bucketed user growth series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReport {
    pub dates: Vec<NaiveDate>,
    /// Users created within each day
    pub new_users: Vec<i64>,
    /// Cumulative users created up to the end of each day
    pub total_users: Vec<i64>,
}

/// Day-bucketed order count series with range totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReport {
    pub dates: Vec<NaiveDate>,
    /// All orders per day, any status
    pub order_counts: Vec<i64>,
    /// Completed orders per day
    pub valid_order_counts: Vec<i64>,
    pub total_order_count: i64,
    pub valid_order_count: i64,
    /// valid / total, 0.0 when the range holds no orders
    pub completion_rate: f64,
}

/// Ranked best-sellers, at most 10 entries, quantities non-increasing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTop10 {
    pub names: Vec<String>,
    pub numbers: Vec<i64>,
}

/// Whole-window business overview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessData {
    pub turnover: f64,
    pub valid_order_count: i64,
    pub order_completion_rate: f64,
    /// Average amount per completed order, 0.0 when none completed
    pub unit_price: f64,
    pub new_users: i64,
}
