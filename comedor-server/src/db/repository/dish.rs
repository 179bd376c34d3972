//! Dish Repository

use super::{RepoError, RepoResult, placeholders};
use shared::models::{Dish, DishCreate, DishFlavor, DishFlavorInput, DishUpdate, SaleStatus};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let dish = sqlx::query_as::<_, Dish>(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM dish WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(dish)
}

pub async fn find_by_status(pool: &SqlitePool, status: SaleStatus) -> RepoResult<Vec<Dish>> {
    let dishes = sqlx::query_as::<_, Dish>(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM dish WHERE status = ? ORDER BY name",
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(dishes)
}

pub async fn find_page(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Dish>> {
    let dishes = sqlx::query_as::<_, Dish>(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM dish ORDER BY create_time DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(dishes)
}

pub async fn flavors_by_dish(pool: &SqlitePool, dish_id: i64) -> RepoResult<Vec<DishFlavor>> {
    let flavors = sqlx::query_as::<_, DishFlavor>(
        "SELECT id, dish_id, name, value FROM dish_flavor WHERE dish_id = ? ORDER BY id",
    )
    .bind(dish_id)
    .fetch_all(pool)
    .await?;
    Ok(flavors)
}

/// Load every dish in `ids` inside the caller's transaction
pub async fn find_by_ids(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[i64],
) -> RepoResult<Vec<Dish>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM dish WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, Dish>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let dishes = query.fetch_all(&mut **tx).await?;
    Ok(dishes)
}

/// Insert a dish row, returning the generated id
pub async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    data: &DishCreate,
    operator_id: i64,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dish (name, price, image, description, status, create_time, create_user, update_time, update_user) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?6, ?7) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(data.image.clone().unwrap_or_default())
    .bind(&data.description)
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .bind(operator_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Partial update of dish scalar fields; flavors are handled separately
pub async fn update_fields(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    data: &DishUpdate,
    operator_id: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE dish SET name = COALESCE(?1, name), price = COALESCE(?2, price), image = COALESCE(?3, image), description = COALESCE(?4, description), status = COALESCE(?5, status), update_time = ?6, update_user = ?7 WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.description)
    .bind(data.status)
    .bind(now)
    .bind(operator_id)
    .bind(id)
    .execute(&mut **tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }
    Ok(())
}

pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    status: SaleStatus,
    operator_id: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE dish SET status = ?1, update_time = ?2, update_user = ?3 WHERE id = ?4",
    )
    .bind(status)
    .bind(now)
    .bind(operator_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }
    Ok(())
}

/// Replace the flavor set of a dish: delete all prior rows, insert the new set
pub async fn replace_flavors(
    tx: &mut Transaction<'_, Sqlite>,
    dish_id: i64,
    flavors: &[DishFlavorInput],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM dish_flavor WHERE dish_id = ?")
        .bind(dish_id)
        .execute(&mut **tx)
        .await?;
    for flavor in flavors {
        sqlx::query("INSERT INTO dish_flavor (dish_id, name, value) VALUES (?1, ?2, ?3)")
            .bind(dish_id)
            .bind(&flavor.name)
            .bind(&flavor.value)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

pub async fn delete_by_ids(tx: &mut Transaction<'_, Sqlite>, ids: &[i64]) -> RepoResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let sql = format!("DELETE FROM dish WHERE id IN ({})", placeholders(ids.len()));
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.execute(&mut **tx).await?;
    Ok(())
}

pub async fn delete_flavors_by_dish_ids(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[i64],
) -> RepoResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let sql = format!(
        "DELETE FROM dish_flavor WHERE dish_id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.execute(&mut **tx).await?;
    Ok(())
}
