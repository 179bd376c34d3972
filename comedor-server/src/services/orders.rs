//! Order Service — cart checkout
//!
//! Submission converts the user's cart into an order plus its lines and
//! clears the cart, all inside one transaction. Amount arithmetic goes
//! through Decimal so line totals never accumulate float drift.

use crate::db::repository::{self as repo};
use crate::utils::money::line_total;
use crate::utils::{AppError, AppResult};
use shared::models::{OrderLine, OrderStatus, OrderSubmit, OrderSubmitted};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use tracing::info;

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Submit the user's cart as a new order
    pub async fn submit(&self, user_id: i64, data: OrderSubmit) -> AppResult<OrderSubmitted> {
        let now = now_millis();

        let mut tx = self.pool.begin().await?;

        let cart = repo::cart::find_by_user_tx(&mut tx, user_id).await?;
        if cart.is_empty() {
            return Err(AppError::CartEmpty);
        }

        let amount = line_total(cart.iter().map(|line| (line.amount, line.number)));
        let number = snowflake_id().to_string();

        let order_id = repo::order::insert(
            &mut tx,
            user_id,
            &number,
            OrderStatus::PendingPayment,
            amount,
            data.remark.as_deref(),
            now,
        )
        .await?;

        let lines: Vec<OrderLine> = cart
            .iter()
            .map(|line| OrderLine {
                id: 0,
                order_id,
                dish_id: line.dish_id,
                combo_id: line.combo_id,
                name: line.name.clone(),
                image: line.image.clone(),
                flavor: line.flavor.clone(),
                amount: line.amount,
                number: line.number,
            })
            .collect();
        repo::order::insert_lines(&mut tx, order_id, &lines).await?;

        repo::cart::delete_by_user_tx(&mut tx, user_id).await?;
        tx.commit().await?;

        info!(order_id, user_id, amount, "Order submitted");
        Ok(OrderSubmitted {
            order_id,
            order_number: number,
            amount,
            order_time: now,
        })
    }

    /// Move an order to a new status; reaching COMPLETED stamps the
    /// checkout time
    pub async fn update_status(&self, order_id: i64, status: OrderStatus) -> AppResult<()> {
        let checkout_time = (status == OrderStatus::Completed).then(now_millis);
        repo::order::update_status(&self.pool, order_id, status, checkout_time).await?;
        Ok(())
    }
}
