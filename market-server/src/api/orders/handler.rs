//! Order Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{EntityKind, Order, OrderCreate, OrderStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{book, order};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::workflow;

/// Query params for the admin listing
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

/// Status update request (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub notes: Option<String>,
}

/// Place an order. The creation transition: entry state is `pending`,
/// performed by the owner.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<AppResponse<Order>>> {
    let book = book::find_by_id(state.pool(), payload.book_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", payload.book_id)))?;
    if book.seller_user_id == user.user_id {
        return Err(AppError::Validation(
            "You cannot order your own listing".to_string(),
        ));
    }

    let placed = order::create(state.pool(), user.user_id, payload).await?;

    state.dispatcher.notify_admin_new_entity(
        EntityKind::Order,
        placed.id,
        &format!("Order for \"{}\" placed by {}", book.title, user.name),
    );

    Ok(ok(placed))
}

/// Own orders; admins see every order.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let rows = if user.role.is_admin() {
        order::find_all(state.pool(), query.limit, query.offset).await?
    } else {
        order::list_by_owner(state.pool(), user.user_id).await?
    };
    Ok(ok(rows))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let row = order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;
    if row.owner_user_id != user.user_id && !user.role.is_admin() {
        return Err(AppError::Forbidden("Not your order".to_string()));
    }
    Ok(ok(row))
}

pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let updated = workflow::transition_order(
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
