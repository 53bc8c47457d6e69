//! Shop Repository

use super::{RepoError, RepoResult};
use shared::models::{Shop, ShopCreate};
use sqlx::SqlitePool;

const SHOP_SELECT: &str =
    "SELECT id, owner_user_id, name, location, is_active, created_at, updated_at FROM shop";

pub async fn create(pool: &SqlitePool, data: ShopCreate) -> RepoResult<Shop> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO shop (id, owner_user_id, name, location, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)",
    )
    .bind(id)
    .bind(data.owner_user_id)
    .bind(&data.name)
    .bind(&data.location)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shop".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Shop>> {
    let sql = format!("{SHOP_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Shop>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Owner lookup for the audience resolver. Inactive shops resolve to no one.
pub async fn owner_user_id(pool: &SqlitePool, shop_id: i64) -> RepoResult<Option<i64>> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT owner_user_id FROM shop WHERE id = ? AND is_active = 1")
            .bind(shop_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(id,)| id))
}
