//! Unlock Payment API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/unlocks", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_own).post(handler::create))
        .route("/pending", get(handler::list_pending))
        .route("/{id}/resolve", put(handler::resolve))
        .route("/{id}/refund-request", put(handler::refund_request))
        .route("/{id}/refund-resolve", put(handler::refund_resolve))
}
