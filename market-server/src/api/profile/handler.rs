//! Profile Handlers

use axum::{Json, extract::State};

use shared::models::{Profile, ProfileUpsert};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::profile;
use crate::utils::{AppError, AppResponse, AppResult, ok};

pub async fn get_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Profile>>> {
    let row = profile::find_by_user(state.pool(), user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not set".to_string()))?;
    Ok(ok(row))
}

pub async fn upsert_own(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProfileUpsert>,
) -> AppResult<Json<AppResponse<Profile>>> {
    let row = profile::upsert(state.pool(), user.user_id, payload).await?;
    Ok(ok(row))
}
