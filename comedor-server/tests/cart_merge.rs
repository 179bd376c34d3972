//! Cart merge semantics: idempotent quantity increments, catalog snapshots

mod common;

use comedor_server::services::{CartService, CatalogService};
use comedor_server::utils::AppError;
use common::{OPERATOR, dish_create, test_db};
use shared::models::{CartItemInput, ComboCreate, DishUpdate, SaleStatus};

const USER: i64 = 10;

#[tokio::test]
async fn adding_same_dish_twice_merges_into_one_line() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Fried Rice", 8.5, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    let line = cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();

    assert_eq!(line.number, 2);
    let lines = cart.show(USER).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].number, 2);
    assert_eq!(lines[0].name, "Fried Rice");
    assert_eq!(lines[0].amount, 8.5);
}

#[tokio::test]
async fn dish_and_combo_lines_do_not_merge() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Soup", 4.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    let combo = catalog
        .save_combo(
            ComboCreate {
                name: "Soup Set".into(),
                price: 10.0,
                image: None,
                description: None,
                status: Some(SaleStatus::Enabled),
                dishes: Vec::new(),
            },
            OPERATOR,
        )
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    cart.add(USER, CartItemInput::combo(combo.id)).await.unwrap();

    let lines = cart.show(USER).await.unwrap();
    assert_eq!(lines.len(), 2);
}

#[tokio::test]
async fn different_flavors_stay_separate_lines() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Wings", 7.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    let mut mild = CartItemInput::dish(dish.id);
    mild.flavor = "mild".into();
    let mut hot = CartItemInput::dish(dish.id);
    hot.flavor = "hot".into();

    cart.add(USER, mild.clone()).await.unwrap();
    cart.add(USER, hot).await.unwrap();
    cart.add(USER, mild).await.unwrap();

    let mut lines = cart.show(USER).await.unwrap();
    lines.sort_by(|a, b| a.flavor.cmp(&b.flavor));
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].flavor.as_str(), lines[0].number), ("hot", 1));
    assert_eq!((lines[1].flavor.as_str(), lines[1].number), ("mild", 2));
}

#[tokio::test]
async fn merge_keeps_first_insertion_snapshot() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Tea", 2.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();

    // Catalog price changes after the line exists
    catalog
        .update_dish(
            dish.id,
            DishUpdate {
                name: None,
                price: Some(3.5),
                image: None,
                description: None,
                status: None,
                flavors: Vec::new(),
            },
            OPERATOR,
        )
        .await
        .unwrap();

    let line = cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    assert_eq!(line.number, 2);
    // The line still carries the price seen at first insertion
    assert_eq!(line.amount, 2.0);
}

#[tokio::test]
async fn carts_are_scoped_per_user() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Shared Dish", 5.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    cart.add(USER + 1, CartItemInput::dish(dish.id)).await.unwrap();

    assert_eq!(cart.show(USER).await.unwrap().len(), 1);
    assert_eq!(cart.show(USER + 1).await.unwrap().len(), 1);
    assert_eq!(cart.show(USER).await.unwrap()[0].number, 1);
}

#[tokio::test]
async fn unknown_catalog_item_fails_the_add() {
    let db = test_db().await;
    let cart = CartService::new(db.pool.clone());

    let err = cart.add(USER, CartItemInput::dish(404)).await.unwrap_err();
    assert!(matches!(err, AppError::CatalogLookup(_)));

    let err = cart.add(USER, CartItemInput::combo(404)).await.unwrap_err();
    assert!(matches!(err, AppError::CatalogLookup(_)));

    assert!(cart.show(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn item_with_neither_id_is_rejected() {
    let db = test_db().await;
    let cart = CartService::new(db.pool.clone());

    let err = cart.add(USER, CartItemInput::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn remove_one_decrements_then_deletes() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Beer", 3.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();

    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();
    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();

    cart.remove_one(USER, CartItemInput::dish(dish.id)).await.unwrap();
    assert_eq!(cart.show(USER).await.unwrap()[0].number, 1);

    cart.remove_one(USER, CartItemInput::dish(dish.id)).await.unwrap();
    assert!(cart.show(USER).await.unwrap().is_empty());

    // Removing from an empty cart is a no-op
    cart.remove_one(USER, CartItemInput::dish(dish.id)).await.unwrap();
}

#[tokio::test]
async fn clear_empties_cart_and_is_idempotent() {
    let db = test_db().await;
    let catalog = CatalogService::new(db.pool.clone());
    let cart = CartService::new(db.pool.clone());

    let dish = catalog
        .save_dish(dish_create("Juice", 3.0, SaleStatus::Enabled), OPERATOR)
        .await
        .unwrap();
    cart.add(USER, CartItemInput::dish(dish.id)).await.unwrap();

    cart.clear(USER).await.unwrap();
    assert!(cart.show(USER).await.unwrap().is_empty());

    // Clearing an already-empty cart succeeds
    cart.clear(USER).await.unwrap();
}
