//! Demand Model

use serde::{Deserialize, Serialize};

use super::status::DemandStatus;

/// Book demand row: a request for a title not currently listed, fulfilled
/// by the Nilkhet channel. Enters at `requested`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Demand {
    pub id: i64,
    pub owner_user_id: i64,
    pub title: String,
    pub author: Option<String>,
    pub edition: Option<String>,
    pub status: DemandStatus,
    pub delivery_address: String,
    pub delivery_phone: String,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Placement payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandCreate {
    pub title: String,
    pub author: Option<String>,
    pub edition: Option<String>,
    pub delivery_address: String,
    pub delivery_phone: String,
}
