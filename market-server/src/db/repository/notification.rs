//! Notification Repository

use super::{RepoError, RepoResult};
use shared::models::{Notification, NotificationKind};
use sqlx::SqlitePool;

const NOTIFICATION_SELECT: &str = "SELECT id, recipient_user_id, title, message, kind, reference_type, reference_id, is_read, created_at FROM notification";

pub async fn insert(
    pool: &SqlitePool,
    recipient_user_id: i64,
    title: &str,
    message: &str,
    kind: NotificationKind,
    reference_type: Option<&str>,
    reference_id: Option<i64>,
) -> RepoResult<Notification> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO notification (id, recipient_user_id, title, message, kind, reference_type, reference_id, is_read, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
    )
    .bind(id)
    .bind(recipient_user_id)
    .bind(title)
    .bind(message)
    .bind(kind)
    .bind(reference_type)
    .bind(reference_id)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to insert notification".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notification>> {
    let sql = format!("{NOTIFICATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Notification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list_by_recipient(
    pool: &SqlitePool,
    recipient_user_id: i64,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Notification>> {
    let sql = format!(
        "{NOTIFICATION_SELECT} WHERE recipient_user_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, Notification>(&sql)
        .bind(recipient_user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn unread_count(pool: &SqlitePool, recipient_user_id: i64) -> RepoResult<i64> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notification WHERE recipient_user_id = ? AND is_read = 0",
    )
    .bind(recipient_user_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Mark one notification read. Scoped to the recipient so a caller can
/// never flip someone else's row.
pub async fn mark_read(pool: &SqlitePool, id: i64, recipient_user_id: i64) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE notification SET is_read = 1 WHERE id = ? AND recipient_user_id = ? AND is_read = 0",
    )
    .bind(id)
    .bind(recipient_user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn unread_count_tracks_mark_read() {
        let pool = DbService::open_in_memory().await.unwrap().pool;

        let n1 = insert(&pool, 7, "A", "first", NotificationKind::Broadcast, None, None)
            .await
            .unwrap();
        insert(&pool, 7, "B", "second", NotificationKind::Broadcast, None, None)
            .await
            .unwrap();
        insert(&pool, 8, "C", "other user", NotificationKind::Broadcast, None, None)
            .await
            .unwrap();

        assert_eq!(unread_count(&pool, 7).await.unwrap(), 2);

        assert!(mark_read(&pool, n1.id, 7).await.unwrap());
        assert_eq!(unread_count(&pool, 7).await.unwrap(), 1);

        // Re-marking and cross-user marking are no-ops
        assert!(!mark_read(&pool, n1.id, 7).await.unwrap());
        assert!(!mark_read(&pool, n1.id, 8).await.unwrap());
    }

    #[tokio::test]
    async fn list_is_recency_ordered() {
        let pool = DbService::open_in_memory().await.unwrap().pool;

        for i in 0..3 {
            insert(
                &pool,
                9,
                &format!("title {i}"),
                "msg",
                NotificationKind::OrderStatus,
                Some("order"),
                Some(100 + i),
            )
            .await
            .unwrap();
        }

        let rows = list_by_recipient(&pool, 9, 10, 0).await.unwrap();
        assert_eq!(rows.len(), 3);
        for pair in rows.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
}
