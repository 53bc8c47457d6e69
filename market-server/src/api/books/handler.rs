//! Book Handlers
//!
//! `get_contact` is the payoff of the unlock flow: seller contact details
//! are only returned to the seller themself, an admin, or a caller
//! holding an approved unlock payment for the book.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Book, BookContact, BookCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{book, unlock_payment};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Query params for listing books
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Book>>>> {
    let books = book::find_all(state.pool(), query.limit, query.offset).await?;
    Ok(ok(books))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Book>>> {
    let row = book::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {id} not found")))?;
    Ok(ok(row))
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BookCreate>,
) -> AppResult<Json<AppResponse<Book>>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }
    if payload.price < 0 {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }
    let row = book::create(state.pool(), user.user_id, payload).await?;
    Ok(ok(row))
}

pub async fn get_contact(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<BookContact>>> {
    let row = book::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {id} not found")))?;

    let allowed = user.role.is_admin()
        || row.seller_user_id == user.user_id
        || unlock_payment::has_approved_unlock(state.pool(), user.user_id, id).await?;

    if !allowed {
        return Err(AppError::Forbidden(
            "Unlock this book's contact with a verified payment first".to_string(),
        ));
    }

    Ok(ok(BookContact {
        book_id: row.id,
        seller_user_id: row.seller_user_id,
        contact_phone: row.contact_phone,
    }))
}
