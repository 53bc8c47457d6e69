//! Shop Order Model (Nilkhet channel)

use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

/// Shop order row: cash-on-delivery order against a shop catalog entry.
/// Shares the order status machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopOrder {
    pub id: i64,
    pub owner_user_id: i64,
    pub shop_id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub delivery_phone: String,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Placement payload. Entry state is always `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopOrderCreate {
    pub shop_id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub delivery_address: String,
    pub delivery_phone: String,
}
