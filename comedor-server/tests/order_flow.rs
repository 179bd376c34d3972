//! Order submission: cart conversion, decimal totals, status transitions

mod common;

use comedor_server::db::repository as repo;
use comedor_server::services::{CartService, CatalogService, OrderService};
use comedor_server::utils::AppError;
use common::{OPERATOR, dish_create, test_db};
use shared::models::{CartItemInput, OrderStatus, OrderSubmit, SaleStatus};

const USER: i64 = 20;

#[tokio::test]
async fn submit_converts_cart_into_order_and_clears_it() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());
    let orders = OrderService::new(db.pool.clone());

    let rice = catalog
        .save_dish(dish_create("Rice", 1.5, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    let duck = catalog
        .save_dish(dish_create("Roast Duck", 22.9, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(rice.id)).await.unwrap();
    cart.add(USER, CartItemInput::dish(rice.id)).await.unwrap();
    cart.add(USER, CartItemInput::dish(duck.id)).await.unwrap();

    let submitted = orders
        .submit(USER, OrderSubmit { remark: Some("no cilantro".into()) })
        .await
        .unwrap();

    // 1.5 * 2 + 22.9, decimal-exact
    assert_eq!(submitted.amount, 25.9);
    assert!(!submitted.order_number.is_empty());

    let order = repo::order::find_by_id(&db.pool, submitted.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::PendingPayment);
    assert_eq!(order.user_id, USER);
    assert_eq!(order.remark.as_deref(), Some("no cilantro"));

    let lines = repo::order::lines_by_order(&db.pool, submitted.order_id)
        .await
        .unwrap();
    assert_eq!(lines.len(), 2);
    let rice_line = lines.iter().find(|l| l.name == "Rice").unwrap();
    assert_eq!(rice_line.number, 2);

    // Cart is empty after submission
    assert!(cart.show(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn submit_with_empty_cart_is_rejected() {
    let db = test_db().await;
    let orders = OrderService::new(db.pool.clone());

    let err = orders.submit(USER, OrderSubmit::default()).await.unwrap_err();
    assert!(matches!(err, AppError::CartEmpty));
}

#[tokio::test]
async fn decimal_totals_do_not_drift() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());
    let orders = OrderService::new(db.pool.clone());

    // 0.1 + 0.2 is the classic f64 trap
    let a = catalog
        .save_dish(dish_create("Ten Cents", 0.1, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    let b = catalog
        .save_dish(dish_create("Twenty Cents", 0.2, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(a.id)).await.unwrap();
    cart.add(USER, CartItemInput::dish(b.id)).await.unwrap();

    let submitted = orders.submit(USER, OrderSubmit::default()).await.unwrap();
    assert_eq!(submitted.amount, 0.3);
}

#[tokio::test]
async fn completing_an_order_stamps_checkout_time() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());
    let orders = OrderService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Set Meal", 15.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    let submitted = orders.submit(USER, OrderSubmit::default()).await.unwrap();

    orders
        .update_status(submitted.order_id, OrderStatus::Confirmed)
        .await
        .unwrap();
    let order = repo::order::find_by_id(&db.pool, submitted.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert!(order.checkout_time.is_none());

    orders
        .update_status(submitted.order_id, OrderStatus::Completed)
        .await
        .unwrap();
    let order = repo::order::find_by_id(&db.pool, submitted.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert!(order.checkout_time.is_some());
}

#[tokio::test]
async fn updating_unknown_order_fails() {
    let db = test_db().await;
    let orders = OrderService::new(db.pool.clone());

    let err = orders
        .update_status(999, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
