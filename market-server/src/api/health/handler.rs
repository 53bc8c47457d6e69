//! Health Handler

use axum::Json;
use serde::Serialize;

use crate::utils::{AppResponse, ok};

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn health() -> Json<AppResponse<Health>> {
    ok(Health { status: "ok" })
}
