//! Order Model (peer-to-peer)

use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// Peer-to-peer order row: a buyer ordering a listed book directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub owner_user_id: i64,
    pub book_id: i64,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub delivery_phone: String,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Placement payload. Entry state is always `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub book_id: i64,
    pub delivery_address: String,
    pub delivery_phone: String,
}
