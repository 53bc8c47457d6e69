//! Book Model

use serde::{Deserialize, Serialize};

/// Book listing row.
///
/// `contact_phone` is the seller's direct contact, gated behind an
/// approved unlock payment — list/detail views never include it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    pub seller_user_id: i64,
    pub title: String,
    pub author: Option<String>,
    /// Asking price in whole taka.
    pub price: i64,
    pub condition: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing, default)]
    pub contact_phone: String,
    pub institution_id: Option<i64>,
    pub department_id: Option<i64>,
    pub is_sold: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create book payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreate {
    pub title: String,
    pub author: Option<String>,
    pub price: i64,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub contact_phone: String,
    pub institution_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Seller contact details, returned only to callers holding an approved
/// unlock for this book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookContact {
    pub book_id: i64,
    pub seller_user_id: i64,
    pub contact_phone: String,
}
