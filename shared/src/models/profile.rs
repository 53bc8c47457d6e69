//! Profile Model
//!
//! Campus affiliation directory, owned by the institution/department
//! management subsystem. The notification audience resolver reads it,
//! nothing in this crate writes it beyond registration.

use serde::{Deserialize, Serialize};

/// Profile row: user → campus affiliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub user_id: i64,
    pub institution_id: Option<i64>,
    pub department_id: Option<i64>,
    pub hall: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Upsert payload for a user's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub institution_id: Option<i64>,
    pub department_id: Option<i64>,
    pub hall: Option<String>,
}
