//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserCreate};
use sqlx::SqlitePool;

pub async fn create(pool: &SqlitePool, data: &UserCreate, now: i64) -> RepoResult<User> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (name, phone, create_time) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, phone, create_time FROM user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Users created strictly before `end` millis (cumulative count)
pub async fn count_created_before(pool: &SqlitePool, end: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE create_time < ?")
        .bind(end)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Users created within `[begin, end)`
pub async fn count_created_in(pool: &SqlitePool, begin: i64, end: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE create_time >= ?1 AND create_time < ?2")
            .bind(begin)
            .bind(end)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
