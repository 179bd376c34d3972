//! Cart Repository
//!
//! The add path is a single atomic upsert: the partial unique indexes on
//! (user_id, dish_id|combo_id, flavor) make concurrent identical adds
//! collapse into one increment instead of a duplicate line.

use super::{RepoError, RepoResult};
use shared::models::{CartItemInput, CartLine};
use sqlx::{Sqlite, SqlitePool, Transaction};

const CART_COLUMNS: &str =
    "id, user_id, dish_id, combo_id, flavor, name, image, amount, number, create_time";

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT id, user_id, dish_id, combo_id, flavor, name, image, amount, number, create_time FROM cart_line WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Cart lines of a user inside the caller's transaction (order submission)
pub async fn find_by_user_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
) -> RepoResult<Vec<CartLine>> {
    let lines = sqlx::query_as::<_, CartLine>(
        "SELECT id, user_id, dish_id, combo_id, flavor, name, image, amount, number, create_time FROM cart_line WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(lines)
}

/// Insert a line with number 1, or bump the existing line's number by 1.
///
/// The conflict path only touches `number`: name/image/amount stay the
/// catalog snapshot taken when the line was first inserted.
pub async fn upsert_increment(
    pool: &SqlitePool,
    user_id: i64,
    item: &CartItemInput,
    name: &str,
    image: &str,
    amount: f64,
    now: i64,
) -> RepoResult<CartLine> {
    let sql = if item.dish_id.is_some() {
        format!(
            "INSERT INTO cart_line (user_id, dish_id, combo_id, flavor, name, image, amount, number, create_time) \
             VALUES (?1, ?2, NULL, ?3, ?4, ?5, ?6, 1, ?7) \
             ON CONFLICT (user_id, dish_id, flavor) WHERE dish_id IS NOT NULL \
             DO UPDATE SET number = number + 1 \
             RETURNING {CART_COLUMNS}"
        )
    } else {
        format!(
            "INSERT INTO cart_line (user_id, dish_id, combo_id, flavor, name, image, amount, number, create_time) \
             VALUES (?1, NULL, ?2, ?3, ?4, ?5, ?6, 1, ?7) \
             ON CONFLICT (user_id, combo_id, flavor) WHERE combo_id IS NOT NULL \
             DO UPDATE SET number = number + 1 \
             RETURNING {CART_COLUMNS}"
        )
    };

    let item_id = item
        .dish_id
        .or(item.combo_id)
        .ok_or_else(|| RepoError::Validation("Cart item has no dish or combo id".into()))?;

    let line = sqlx::query_as::<_, CartLine>(&sql)
        .bind(user_id)
        .bind(item_id)
        .bind(&item.flavor)
        .bind(name)
        .bind(image)
        .bind(amount)
        .bind(now)
        .fetch_one(pool)
        .await?;
    Ok(line)
}

/// Decrement a line's quantity; a line at 1 is removed. No-op when the
/// line does not exist.
pub async fn decrement_or_delete(
    pool: &SqlitePool,
    user_id: i64,
    item: &CartItemInput,
) -> RepoResult<()> {
    let (id_column, item_id) = match (item.dish_id, item.combo_id) {
        (Some(dish_id), _) => ("dish_id", dish_id),
        (_, Some(combo_id)) => ("combo_id", combo_id),
        _ => return Err(RepoError::Validation("Cart item has no dish or combo id".into())),
    };

    let update_sql = format!(
        "UPDATE cart_line SET number = number - 1 WHERE user_id = ?1 AND {id_column} = ?2 AND flavor = ?3 AND number > 1"
    );
    let rows = sqlx::query(&update_sql)
        .bind(user_id)
        .bind(item_id)
        .bind(&item.flavor)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        let delete_sql = format!(
            "DELETE FROM cart_line WHERE user_id = ?1 AND {id_column} = ?2 AND flavor = ?3"
        );
        sqlx::query(&delete_sql)
            .bind(user_id)
            .bind(item_id)
            .bind(&item.flavor)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Remove every line of a user's cart; idempotent
pub async fn delete_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart_line WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Transaction-scoped cart clear (order submission)
pub async fn delete_by_user_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM cart_line WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
