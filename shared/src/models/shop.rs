//! Shop Model

use serde::{Deserialize, Serialize};

/// Nilkhet shop row. One owner per shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: i64,
    pub owner_user_id: i64,
    pub name: String,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shop payload (admin registers the shop for an owner).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCreate {
    pub owner_user_id: i64,
    pub name: String,
    pub location: Option<String>,
}
