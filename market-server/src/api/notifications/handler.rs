//! Notification Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Notification, UnreadCount};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification;
use crate::utils::{AppError, AppResponse, AppResult, ok};

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

/// Own inbox, newest first.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Notification>>>> {
    let rows =
        notification::list_by_recipient(state.pool(), user.user_id, query.limit, query.offset)
            .await?;
    Ok(ok(rows))
}

pub async fn unread_count(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<UnreadCount>>> {
    let count = notification::unread_count(state.pool(), user.user_id).await?;
    Ok(ok(UnreadCount { count }))
}

pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Notification>>> {
    notification::mark_read(state.pool(), id, user.user_id).await?;
    let row = notification::find_by_id(state.pool(), id)
        .await?
        .filter(|n| n.recipient_user_id == user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Notification {id} not found")))?;
    Ok(ok(row))
}
