//! Unlock Payment Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use shared::models::{UnlockDecision, UnlockPayment};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::unlock_payment;
use crate::unlock;
use crate::utils::{AppResponse, AppResult, ok};

/// An 11-digit mobile wallet number starting with 01.
fn validate_wallet_number(number: &str) -> Result<(), ValidationError> {
    let ok = number.len() == 11
        && number.starts_with("01")
        && number.chars().all(|c| c.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("wallet_number"))
    }
}

/// Unlock submission: which book, and the sender wallet of the attested
/// bKash transfer.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitUnlockRequest {
    pub book_id: i64,
    #[validate(custom(function = validate_wallet_number))]
    pub bkash_number: String,
}

/// Admin verdict payload.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub decision: UnlockDecision,
    pub notes: Option<String>,
}

/// Admin refund verdict payload.
#[derive(Debug, Deserialize)]
pub struct RefundResolveRequest {
    pub approved: bool,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SubmitUnlockRequest>,
) -> AppResult<Json<AppResponse<UnlockPayment>>> {
    payload.validate()?;
    let payment = unlock::create_unlock(
        state.pool(),
        &user,
        payload.book_id,
        &payload.bkash_number,
    )
    .await?;
    Ok(ok(payment))
}

pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<UnlockPayment>>>> {
    let rows = unlock_payment::list_by_user(state.pool(), user.user_id).await?;
    Ok(ok(rows))
}

/// Admin verification queue, oldest first.
pub async fn list_pending(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<UnlockPayment>>>> {
    user.require_admin()?;
    let rows = unlock_payment::list_pending(state.pool()).await?;
    Ok(ok(rows))
}

pub async fn resolve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ResolveRequest>,
) -> AppResult<Json<AppResponse<UnlockPayment>>> {
    let payment = unlock::resolve_payment(
        state.pool(),
        &state.dispatcher,
        &user,
        id,
        payload.decision,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(ok(payment))
}

pub async fn refund_request(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<UnlockPayment>>> {
    let payment = unlock::request_refund(state.pool(), &user, id).await?;
    Ok(ok(payment))
}

pub async fn refund_resolve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RefundResolveRequest>,
) -> AppResult<Json<AppResponse<UnlockPayment>>> {
    let payment = unlock::resolve_refund(
        state.pool(),
        &state.dispatcher,
        &user,
        id,
        payload.approved,
        payload.notes.as_deref(),
    )
    .await?;
    Ok(ok(payment))
}
