//! Demand Repository

use super::{RepoError, RepoResult};
use shared::models::{Demand, DemandCreate, DemandStatus};
use sqlx::SqlitePool;

const DEMAND_SELECT: &str = "SELECT id, owner_user_id, title, author, edition, status, delivery_address, delivery_phone, admin_notes, created_at, updated_at FROM demand";

pub async fn create(
    pool: &SqlitePool,
    owner_user_id: i64,
    data: DemandCreate,
) -> RepoResult<Demand> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO demand (id, owner_user_id, title, author, edition, status, delivery_address, delivery_phone, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(owner_user_id)
    .bind(&data.title)
    .bind(&data.author)
    .bind(&data.edition)
    .bind(DemandStatus::Requested)
    .bind(&data.delivery_address)
    .bind(&data.delivery_phone)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create demand".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Demand>> {
    let sql = format!("{DEMAND_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Demand>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_owner(pool: &SqlitePool, owner_user_id: i64) -> RepoResult<Vec<Demand>> {
    let sql = format!("{DEMAND_SELECT} WHERE owner_user_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Demand>(&sql)
        .bind(owner_user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Demand>> {
    let sql = format!("{DEMAND_SELECT} ORDER BY created_at DESC LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, Demand>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Conditional status write, same contract as the order repository.
pub async fn update_status_cas(
    pool: &SqlitePool,
    id: i64,
    expected: DemandStatus,
    target: DemandStatus,
    notes: Option<&str>,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE demand SET status = ?1, admin_notes = COALESCE(?2, admin_notes), updated_at = ?3 \
         WHERE id = ?4 AND status = ?5",
    )
    .bind(target)
    .bind(notes)
    .bind(now)
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
