//! Order Repository
//!
//! Order rows are written once at submission and only change status
//! afterwards. Aggregation reads are day-bucketed: callers pass half-open
//! `[begin, end)` Unix-millis bounds.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderLine, OrderStatus};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, number, user_id, status, amount, remark, order_time, checkout_time FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn lines_by_order(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT id, order_id, dish_id, combo_id, name, image, flavor, amount, number FROM order_line WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Insert an order row, returning the generated id
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    number: &str,
    status: OrderStatus,
    amount: f64,
    remark: Option<&str>,
    order_time: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (number, user_id, status, amount, remark, order_time) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(number)
    .bind(user_id)
    .bind(status)
    .bind(amount)
    .bind(remark)
    .bind(order_time)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Batch-insert the lines of an order
pub async fn insert_lines(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    lines: &[OrderLine],
) -> RepoResult<()> {
    for line in lines {
        sqlx::query(
            "INSERT INTO order_line (order_id, dish_id, combo_id, name, image, flavor, amount, number) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(order_id)
        .bind(line.dish_id)
        .bind(line.combo_id)
        .bind(&line.name)
        .bind(&line.image)
        .bind(&line.flavor)
        .bind(line.amount)
        .bind(line.number)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
    checkout_time: Option<i64>,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET status = ?1, checkout_time = COALESCE(?2, checkout_time) WHERE id = ?3",
    )
    .bind(status)
    .bind(checkout_time)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Sum of order amounts in `[begin, end)`, optionally filtered by status.
///
/// A window with no matching orders sums to 0.0, never NULL.
pub async fn sum_amount(
    pool: &SqlitePool,
    begin: i64,
    end: i64,
    status: Option<OrderStatus>,
) -> RepoResult<f64> {
    let sum: Option<f64> = match status {
        Some(status) => {
            sqlx::query_scalar(
                "SELECT SUM(amount) FROM orders WHERE order_time >= ?1 AND order_time < ?2 AND status = ?3",
            )
            .bind(begin)
            .bind(end)
            .bind(status)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(
                "SELECT SUM(amount) FROM orders WHERE order_time >= ?1 AND order_time < ?2",
            )
            .bind(begin)
            .bind(end)
            .fetch_one(pool)
            .await?
        }
    };
    Ok(sum.unwrap_or(0.0))
}

/// Count of orders in `[begin, end)`, optionally filtered by status
pub async fn count(
    pool: &SqlitePool,
    begin: i64,
    end: i64,
    status: Option<OrderStatus>,
) -> RepoResult<i64> {
    let count: i64 = match status {
        Some(status) => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM orders WHERE order_time >= ?1 AND order_time < ?2 AND status = ?3",
            )
            .bind(begin)
            .bind(end)
            .bind(status)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM orders WHERE order_time >= ?1 AND order_time < ?2",
            )
            .bind(begin)
            .bind(end)
            .fetch_one(pool)
            .await?
        }
    };
    Ok(count)
}

/// Best sellers over `[begin, end)`: completed orders only, grouped by line
/// name, quantity descending. Ties break on name ascending so the ranking
/// is deterministic.
pub async fn top_sales(
    pool: &SqlitePool,
    begin: i64,
    end: i64,
    limit: i64,
) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT ol.name, SUM(ol.number) AS total \
         FROM order_line ol \
         JOIN orders o ON o.id = ol.order_id \
         WHERE o.order_time >= ?1 AND o.order_time < ?2 AND o.status = ?3 \
         GROUP BY ol.name \
         ORDER BY total DESC, ol.name ASC \
         LIMIT ?4",
    )
    .bind(begin)
    .bind(end)
    .bind(OrderStatus::Completed)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
