//! Shop Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{Shop, ShopCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::shop;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Admin registers a shop for an owner account.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ShopCreate>,
) -> AppResult<Json<AppResponse<Shop>>> {
    user.require_admin()?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Shop name must not be empty".to_string()));
    }
    let row = shop::create(state.pool(), payload).await?;
    Ok(ok(row))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Shop>>> {
    let row = shop::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop {id} not found")))?;
    Ok(ok(row))
}
