//! Book Repository

use super::{RepoError, RepoResult};
use shared::models::{Book, BookCreate};
use sqlx::SqlitePool;

const BOOK_SELECT: &str = "SELECT id, seller_user_id, title, author, price, condition, description, contact_phone, institution_id, department_id, is_sold, created_at, updated_at FROM book";

pub async fn create(pool: &SqlitePool, seller_user_id: i64, data: BookCreate) -> RepoResult<Book> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO book (id, seller_user_id, title, author, price, condition, description, contact_phone, institution_id, department_id, is_sold, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, ?11, ?11)",
    )
    .bind(id)
    .bind(seller_user_id)
    .bind(&data.title)
    .bind(&data.author)
    .bind(data.price)
    .bind(&data.condition)
    .bind(&data.description)
    .bind(&data.contact_phone)
    .bind(data.institution_id)
    .bind(data.department_id)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create book".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Book>> {
    let sql = format!("{BOOK_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Book>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Book>> {
    let sql = format!(
        "{BOOK_SELECT} WHERE is_sold = 0 ORDER BY created_at DESC LIMIT ? OFFSET ?"
    );
    let rows = sqlx::query_as::<_, Book>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
