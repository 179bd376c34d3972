//! Combo Meal Repository

use super::{RepoError, RepoResult, placeholders};
use shared::models::{Combo, ComboCreate, ComboDish, ComboUpdate, SaleStatus};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Combo>> {
    let combo = sqlx::query_as::<_, Combo>(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM combo WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(combo)
}

pub async fn find_by_status(pool: &SqlitePool, status: SaleStatus) -> RepoResult<Vec<Combo>> {
    let combos = sqlx::query_as::<_, Combo>(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM combo WHERE status = ? ORDER BY name",
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(combos)
}

pub async fn members_by_combo(pool: &SqlitePool, combo_id: i64) -> RepoResult<Vec<ComboDish>> {
    let members = sqlx::query_as::<_, ComboDish>(
        "SELECT id, combo_id, dish_id, name, price, copies FROM combo_dish WHERE combo_id = ? ORDER BY id",
    )
    .bind(combo_id)
    .fetch_all(pool)
    .await?;
    Ok(members)
}

/// Load every combo in `ids` inside the caller's transaction
pub async fn find_by_ids(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[i64],
) -> RepoResult<Vec<Combo>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id, name, price, image, description, status, create_time, create_user, update_time, update_user FROM combo WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, Combo>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let combos = query.fetch_all(&mut **tx).await?;
    Ok(combos)
}

/// Distinct combo ids holding a membership row for any of the given dishes
pub async fn combo_ids_referencing_dishes(
    tx: &mut Transaction<'_, Sqlite>,
    dish_ids: &[i64],
) -> RepoResult<Vec<i64>> {
    if dish_ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT DISTINCT combo_id FROM combo_dish WHERE dish_id IN ({})",
        placeholders(dish_ids.len())
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in dish_ids {
        query = query.bind(id);
    }
    let combo_ids = query.fetch_all(&mut **tx).await?;
    Ok(combo_ids)
}

/// Insert a combo row, returning the generated id
pub async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    data: &ComboCreate,
    operator_id: i64,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO combo (name, price, image, description, status, create_time, create_user, update_time, update_user) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?6, ?7) RETURNING id",
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

/// Partial update of combo scalar fields; membership is handled separately
pub async fn update_fields(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    data: &ComboUpdate,
    operator_id: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE combo SET name = COALESCE(?1, name), price = COALESCE(?2, price), image = COALESCE(?3, image), description = COALESCE(?4, description), status = COALESCE(?5, status), update_time = ?6, update_user = ?7 WHERE id = ?8",
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
        return Err(RepoError::NotFound(format!("Combo {id} not found")));
    }
    Ok(())
}

pub async fn set_status(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    status: SaleStatus,
    operator_id: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE combo SET status = ?1, update_time = ?2, update_user = ?3 WHERE id = ?4",
    )
    .bind(status)
    .bind(now)
    .bind(operator_id)
    .bind(id)
    .execute(&mut **tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Combo {id} not found")));
    }
    Ok(())
}

/// Count membership rows whose dish is currently halted
pub async fn halted_member_count(
    tx: &mut Transaction<'_, Sqlite>,
    combo_id: i64,
) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM combo_dish cd JOIN dish d ON d.id = cd.dish_id WHERE cd.combo_id = ?1 AND d.status = ?2",
    )
    .bind(combo_id)
    .bind(SaleStatus::Disabled)
    .fetch_one(&mut **tx)
    .await?;
    Ok(count)
}

/// Replace the membership set of a combo: delete all prior rows, insert the new set
pub async fn replace_members(
    tx: &mut Transaction<'_, Sqlite>,
    combo_id: i64,
    members: &[ComboDish],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM combo_dish WHERE combo_id = ?")
        .bind(combo_id)
        .execute(&mut **tx)
        .await?;
    for member in members {
        sqlx::query(
            "INSERT INTO combo_dish (combo_id, dish_id, name, price, copies) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(combo_id)
        .bind(member.dish_id)
        .bind(&member.name)
        .bind(member.price)
        .bind(member.copies)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn delete_by_ids(tx: &mut Transaction<'_, Sqlite>, ids: &[i64]) -> RepoResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let sql = format!("DELETE FROM combo WHERE id IN ({})", placeholders(ids.len()));
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.execute(&mut **tx).await?;
    Ok(())
}

pub async fn delete_members_by_combo_ids(
    tx: &mut Transaction<'_, Sqlite>,
    ids: &[i64],
) -> RepoResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let sql = format!(
        "DELETE FROM combo_dish WHERE combo_id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query(&sql);
    for id in ids {
        query = query.bind(id);
    }
    query.execute(&mut **tx).await?;
    Ok(())
}
