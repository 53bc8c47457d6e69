//! Unlock Payment Repository
//!
//! The (user_id, book_id) uniqueness invariant is enforced twice: a
//! pre-insert lookup gives the caller a precise `DuplicateUnlock`, and the
//! partial unique index `idx_unlock_active` closes the race between two
//! concurrent inserts. All lifecycle writes are conditional UPDATEs.

use super::{RepoError, RepoResult};
use shared::models::{UnlockPayment, UnlockStatus};
use sqlx::SqlitePool;

const UNLOCK_SELECT: &str = "SELECT id, user_id, book_id, amount, bkash_number, transaction_number, status, refund_requested, refund_requested_at, refund_approved, refund_approved_at, admin_notes, created_at, updated_at FROM unlock_payment";

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
    amount: i64,
    bkash_number: &str,
) -> RepoResult<UnlockPayment> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let trx = shared::util::transaction_number();
    sqlx::query(
        "INSERT INTO unlock_payment (id, user_id, book_id, amount, bkash_number, transaction_number, status, refund_requested, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8)",
    )
    .bind(id)
    .bind(user_id)
    .bind(book_id)
    .bind(amount)
    .bind(bkash_number)
    .bind(&trx)
    .bind(UnlockStatus::Pending)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create unlock payment".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UnlockPayment>> {
    let sql = format!("{UNLOCK_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, UnlockPayment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// The pending-or-approved row for (user, book), if any. Rejected rows do
/// not count — they permit a fresh attempt.
pub async fn find_active_by_user_book(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
) -> RepoResult<Option<UnlockPayment>> {
    let sql = format!("{UNLOCK_SELECT} WHERE user_id = ? AND book_id = ? AND status != 'rejected'");
    let row = sqlx::query_as::<_, UnlockPayment>(&sql)
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Whether the user holds an approved unlock for the book (contact gate).
pub async fn has_approved_unlock(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
) -> RepoResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM unlock_payment WHERE user_id = ? AND book_id = ? AND status = 'approved'",
    )
    .bind(user_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<UnlockPayment>> {
    let sql = format!("{UNLOCK_SELECT} WHERE user_id = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, UnlockPayment>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_pending(pool: &SqlitePool) -> RepoResult<Vec<UnlockPayment>> {
    let sql = format!("{UNLOCK_SELECT} WHERE status = 'pending' ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, UnlockPayment>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Terminal verdict on a pending payment. Wins only while the row is
/// still pending; a second resolver loses the CAS and gets `false`.
pub async fn resolve_cas(
    pool: &SqlitePool,
    id: i64,
    target: UnlockStatus,
    notes: Option<&str>,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE unlock_payment SET status = ?1, admin_notes = COALESCE(?2, admin_notes), updated_at = ?3 \
         WHERE id = ?4 AND status = ?5",
    )
    .bind(target)
    .bind(notes)
    .bind(now)
    .bind(id)
    .bind(UnlockStatus::Pending)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Flag a refund request on an approved payment. Wins at most once.
pub async fn request_refund_cas(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE unlock_payment SET refund_requested = 1, refund_requested_at = ?1, updated_at = ?1 \
         WHERE id = ?2 AND status = 'approved' AND refund_requested = 0",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Record the admin's refund decision. Wins only while the decision slot
/// is still NULL.
pub async fn resolve_refund_cas(
    pool: &SqlitePool,
    id: i64,
    approved: bool,
    notes: Option<&str>,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE unlock_payment SET refund_approved = ?1, refund_approved_at = ?2, admin_notes = COALESCE(?3, admin_notes), updated_at = ?2 \
         WHERE id = ?4 AND refund_requested = 1 AND refund_approved IS NULL",
    )
    .bind(approved)
    .bind(now)
    .bind(notes)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        let pool = DbService::open_in_memory().await.unwrap().pool;
        // Parent rows for the unlock_payment FKs (user_id -> user.id,
        // book_id -> book.id). The tests reference users 1-4 and books 10-11.
        for uid in [1i64, 2, 3, 4] {
            sqlx::query(
                "INSERT INTO user (id, name, phone, email, password_hash, role, is_active, created_at, updated_at) \
                 VALUES (?1, 'U', ?2, NULL, 'x', 'user', 1, 0, 0)",
            )
            .bind(uid)
            .bind(format!("phone-{uid}"))
            .execute(&pool)
            .await
            .unwrap();
        }
        for bid in [10i64, 11] {
            sqlx::query(
                "INSERT INTO book (id, seller_user_id, title, author, price, condition, description, contact_phone, institution_id, department_id, is_sold, created_at, updated_at) \
                 VALUES (?1, 1, 'B', NULL, 0, NULL, NULL, '0', NULL, NULL, 0, 0, 0)",
            )
            .bind(bid)
            .execute(&pool)
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn partial_unique_index_blocks_second_active_row() {
        let pool = test_pool().await;

        create(&pool, 1, 10, 20, "01711111111").await.unwrap();
        let err = create(&pool, 1, 10, 20, "01711111111").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // A different book is unaffected
        create(&pool, 1, 11, 10, "01711111111").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_row_permits_fresh_attempt() {
        let pool = test_pool().await;

        let p = create(&pool, 2, 10, 10, "01822222222").await.unwrap();
        assert!(resolve_cas(&pool, p.id, UnlockStatus::Rejected, None)
            .await
            .unwrap());

        // The partial index no longer sees the rejected row
        create(&pool, 2, 10, 10, "01822222222").await.unwrap();
    }

    #[tokio::test]
    async fn resolve_cas_wins_exactly_once() {
        let pool = test_pool().await;

        let p = create(&pool, 3, 10, 20, "01933333333").await.unwrap();
        assert!(resolve_cas(&pool, p.id, UnlockStatus::Approved, Some("verified"))
            .await
            .unwrap());
        assert!(!resolve_cas(&pool, p.id, UnlockStatus::Rejected, None)
            .await
            .unwrap());

        let row = find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(row.status, UnlockStatus::Approved);
        assert_eq!(row.admin_notes.as_deref(), Some("verified"));
    }

    #[tokio::test]
    async fn refund_request_and_resolution_win_once() {
        let pool = test_pool().await;

        let p = create(&pool, 4, 10, 20, "01744444444").await.unwrap();
        // Not approved yet: request loses
        assert!(!request_refund_cas(&pool, p.id).await.unwrap());

        resolve_cas(&pool, p.id, UnlockStatus::Approved, None)
            .await
            .unwrap();
        assert!(request_refund_cas(&pool, p.id).await.unwrap());
        assert!(!request_refund_cas(&pool, p.id).await.unwrap());

        assert!(resolve_refund_cas(&pool, p.id, true, None).await.unwrap());
        assert!(!resolve_refund_cas(&pool, p.id, false, None).await.unwrap());

        let row = find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(row.refund_approved, Some(true));
        assert!(row.refund_requested);
        assert!(row.refund_requested_at.is_some());
        assert!(row.refund_approved_at.is_some());
    }
}
