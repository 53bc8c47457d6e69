//! Demand Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{Demand, DemandCreate, DemandStatus, EntityKind};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::demand;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::workflow;

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

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DemandStatus,
    pub notes: Option<String>,
}

/// File a demand for a title not currently listed. Entry state is
/// `requested`.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DemandCreate>,
) -> AppResult<Json<AppResponse<Demand>>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    let title = payload.title.clone();
    let placed = demand::create(state.pool(), user.user_id, payload).await?;

    state.dispatcher.notify_admin_new_entity(
        EntityKind::Demand,
        placed.id,
        &format!("Demand for \"{title}\" filed by {}", user.name),
    );

    Ok(ok(placed))
}

pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Demand>>>> {
    let rows = if user.role.is_admin() {
        demand::find_all(state.pool(), query.limit, query.offset).await?
    } else {
        demand::list_by_owner(state.pool(), user.user_id).await?
    };
    Ok(ok(rows))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Demand>>> {
    let row = demand::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Demand {id} not found")))?;
    if row.owner_user_id != user.user_id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Not your demand".to_string()));
    }
    Ok(ok(row))
}

pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<Demand>>> {
    let updated = workflow::transition_demand(
        state.pool(),
        &state.dispatcher,
        &user,
        id,
        payload.status,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(ok(updated))
}
