//! Order Model

use serde::{Deserialize, Serialize};

/// Order lifecycle status — numeric wire/storage codes
///
/// COMPLETED is the distinguished terminal status: only completed orders
/// count toward turnover and the "valid order" metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[repr(i32)]
pub enum OrderStatus {
    PendingPayment = 1,
    ToBeConfirmed = 2,
    Confirmed = 3,
    InDelivery = 4,
    Completed = 5,
    Cancelled = 6,
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        status as i32
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::PendingPayment),
            2 => Ok(Self::ToBeConfirmed),
            3 => Ok(Self::Confirmed),
            4 => Ok(Self::InDelivery),
            5 => Ok(Self::Completed),
            6 => Ok(Self::Cancelled),
            other => Err(format!("Unknown order status code: {other}")),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-facing order number
    pub number: String,
    pub user_id: i64,
    pub status: OrderStatus,
    /// Total amount at submission time
    pub amount: f64,
    pub remark: Option<String>,
    pub order_time: i64,
    pub checkout_time: Option<i64>,
}

/// Order line — item snapshot taken from the cart at submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub dish_id: Option<i64>,
    pub combo_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub flavor: String,
    /// Unit amount
    pub amount: f64,
    pub number: i64,
}

/// Submit order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSubmit {
    pub remark: Option<String>,
}

/// Submission receipt returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmitted {
    pub order_id: i64,
    pub order_number: String,
    pub amount: f64,
    pub order_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for code in 1..=6 {
            let status = OrderStatus::try_from(code).unwrap();
            assert_eq!(i32::from(status), code);
        }
        assert!(OrderStatus::try_from(0).is_err());
        assert!(OrderStatus::try_from(7).is_err());
    }

    #[test]
    fn completed_is_code_five() {
        assert_eq!(i32::from(OrderStatus::Completed), 5);
    }
}
