//! Unlock Payment Model

use serde::{Deserialize, Serialize};

use super::status::UnlockStatus;

/// Contact-unlock payment row.
///
/// At most one row per (user_id, book_id) whose status is not `rejected`
/// may exist at a time; the ledger guard checks before insert and a
/// partial unique index closes the race.
///
/// `refund_approved` is NULL until an admin resolves a refund request; it
/// is meaningful only when `status == approved && refund_requested`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UnlockPayment {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    /// Verification fee in whole taka (two-tier schedule off book price).
    pub amount: i64,
    pub bkash_number: String,
    pub transaction_number: String,
    pub status: UnlockStatus,
    pub refund_requested: bool,
    pub refund_requested_at: Option<i64>,
    pub refund_approved: Option<bool>,
    pub refund_approved_at: Option<i64>,
    pub admin_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Unlock request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockCreate {
    pub book_id: i64,
    /// Sender wallet of the attested bKash transfer.
    pub bkash_number: String,
}

/// Admin decision on a pending payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockDecision {
    Approved,
    Rejected,
}

impl UnlockDecision {
    pub fn as_status(&self) -> UnlockStatus {
        match self {
            UnlockDecision::Approved => UnlockStatus::Approved,
            UnlockDecision::Rejected => UnlockStatus::Rejected,
        }
    }
}
