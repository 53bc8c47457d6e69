//! Profile Repository
//!
//! Campus affiliation directory. Besides the per-user upsert, exposes the
//! read-only audience queries consumed by the notification resolver.

use super::RepoResult;
use shared::models::{Profile, ProfileUpsert};
use sqlx::SqlitePool;

pub async fn upsert(pool: &SqlitePool, user_id: i64, data: ProfileUpsert) -> RepoResult<Profile> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO profile (user_id, institution_id, department_id, hall, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
         ON CONFLICT(user_id) DO UPDATE SET \
            institution_id = excluded.institution_id, \
            department_id = excluded.department_id, \
            hall = excluded.hall, \
            updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(data.institution_id)
    .bind(data.department_id)
    .bind(data.hall)
    .bind(now)
    .execute(pool)
    .await?;
    let profile = find_by_user(pool, user_id)
        .await?
        .ok_or_else(|| super::RepoError::Database("Failed to upsert profile".into()))?;
    Ok(profile)
}

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Profile>> {
    let row = sqlx::query_as::<_, Profile>(
        "SELECT user_id, institution_id, department_id, hall, created_at, updated_at FROM profile WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Every user with a profile row.
pub async fn user_ids_all(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM profile")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn user_ids_by_institution(
    pool: &SqlitePool,
    institution_id: i64,
) -> RepoResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT user_id FROM profile WHERE institution_id = ?")
            .bind(institution_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn user_ids_by_department(
    pool: &SqlitePool,
    department_id: i64,
) -> RepoResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT user_id FROM profile WHERE department_id = ?")
            .bind(department_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}
