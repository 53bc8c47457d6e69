//! Broadcast Handler

use axum::{Json, extract::State};

use shared::models::{BroadcastRequest, BroadcastResult};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Admin-only fan-out: resolve the audience, write one notification per
/// recipient, report the count actually written.
pub async fn broadcast(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BroadcastRequest>,
) -> AppResult<Json<AppResponse<BroadcastResult>>> {
    user.require_admin()?;

    if payload.title.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::Validation(
            "Title and message must not be empty".to_string(),
        ));
    }

    let sent_count = state
        .dispatcher
        .dispatch_broadcast(&payload.target, &payload.title, &payload.message)
        .await?;

    tracing::info!(
        admin = user.user_id,
        target = ?payload.target,
        sent_count,
        "Broadcast dispatched"
    );

    Ok(ok(BroadcastResult { sent_count }))
}
