//! Shop Order Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{EntityKind, OrderStatus, ShopOrder, ShopOrderCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{shop, shop_order};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::workflow;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Shop owners pass their shop id to see its order queue.
    pub shop_id: Option<i64>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub notes: Option<String>,
}

/// Place a cash-on-delivery shop order.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ShopOrderCreate>,
) -> AppResult<Json<AppResponse<ShopOrder>>> {
    let shop = shop::find_by_id(state.pool(), payload.shop_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop {} not found", payload.shop_id)))?;
    if payload.quantity < 1 {
        return Err(AppError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let placed = shop_order::create(state.pool(), user.user_id, payload).await?;

    state.dispatcher.notify_admin_new_entity(
        EntityKind::ShopOrder,
        placed.id,
        &format!("Shop order at \"{}\" placed by {}", shop.name, user.name),
    );

    Ok(ok(placed))
}

/// Own shop orders; shop owners see their shop's queue; admins see all.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<ShopOrder>>>> {
    if let Some(shop_id) = query.shop_id {
        let owner = shop::owner_user_id(state.pool(), shop_id).await?;
        if owner != Some(user.user_id) && !user.role.is_admin() {
            return Err(AppError::Forbidden("Not your shop".to_string()));
        }
        return Ok(ok(shop_order::list_by_shop(state.pool(), shop_id).await?));
    }

    let rows = if user.role.is_admin() {
        shop_order::find_all(state.pool(), query.limit, query.offset).await?
    } else {
        shop_order::list_by_owner(state.pool(), user.user_id).await?
    };
    Ok(ok(rows))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<ShopOrder>>> {
    let row = shop_order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop order {id} not found")))?;

    let is_shop_owner = shop::owner_user_id(state.pool(), row.shop_id)
        .await?
        .is_some_and(|owner| owner == user.user_id);
    if row.owner_user_id != user.user_id && !is_shop_owner && !user.role.is_admin() {
        return Err(AppError::Forbidden("Not your shop order".to_string()));
    }
    Ok(ok(row))
}

pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<ShopOrder>>> {
    let updated = workflow::transition_shop_order(
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
