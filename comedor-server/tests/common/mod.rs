//! Shared test fixtures: in-memory database and seed helpers
#![allow(dead_code)]

use comedor_server::db::DbService;
use comedor_server::db::repository as repo;
use shared::models::{DishCreate, DishFlavorInput, OrderLine, OrderStatus, SaleStatus, UserCreate};
use sqlx::SqlitePool;

/// Operator stamped on catalog writes
pub const OPERATOR: i64 = 1;

pub async fn test_db() -> DbService {
    DbService::open_in_memory()
        .await
        .expect("in-memory database")
}

pub fn dish_create(name: &str, price: f64, status: SaleStatus) -> DishCreate {
    DishCreate {
        name: name.to_string(),
        price,
        image: None,
        description: None,
        status: Some(status),
        flavors: Vec::new(),
    }
}

pub fn flavor(name: &str, values: &[&str]) -> DishFlavorInput {
    DishFlavorInput {
        name: name.to_string(),
        value: serde_json::to_string(values).unwrap(),
    }
}

pub async fn seed_user_at(pool: &SqlitePool, create_time: i64) -> i64 {
    repo::user::create(pool, &UserCreate::default(), create_time)
        .await
        .expect("seed user")
        .id
}

/// Insert an order directly at a chosen time and status
pub async fn seed_order(
    pool: &SqlitePool,
    user_id: i64,
    status: OrderStatus,
    amount: f64,
    order_time: i64,
) -> i64 {
    seed_order_with_lines(pool, user_id, status, amount, order_time, &[]).await
}

/// Insert an order with named lines, for ranking tests
pub async fn seed_order_with_lines(
    pool: &SqlitePool,
    user_id: i64,
    status: OrderStatus,
    amount: f64,
    order_time: i64,
    lines: &[(&str, i64)],
) -> i64 {
    let mut tx = pool.begin().await.expect("begin");
    let number = shared::util::snowflake_id().to_string();
    let order_id = repo::order::insert(&mut tx, user_id, &number, status, amount, None, order_time)
        .await
        .expect("seed order");

    let rows: Vec<OrderLine> = lines
        .iter()
        .map(|(name, quantity)| OrderLine {
            id: 0,
            order_id,
            dish_id: None,
            combo_id: None,
            name: name.to_string(),
            image: String::new(),
            flavor: String::new(),
            amount: 0.0,
            number: *quantity,
        })
        .collect();
    repo::order::insert_lines(&mut tx, order_id, &rows)
        .await
        .expect("seed order lines");

    tx.commit().await.expect("commit");
    order_id
}
