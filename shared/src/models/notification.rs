//! Notification Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a notification is about. Stored as snake_case TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum NotificationKind {
    OrderStatus,
    ShopOrderStatus,
    DemandStatus,
    UnlockPayment,
    UnlockRefund,
    Broadcast,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::OrderStatus => "order_status",
            NotificationKind::ShopOrderStatus => "shop_order_status",
            NotificationKind::DemandStatus => "demand_status",
            NotificationKind::UnlockPayment => "unlock_payment",
            NotificationKind::UnlockRefund => "unlock_refund",
            NotificationKind::Broadcast => "broadcast",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification row. Written once by the dispatcher; the recipient only
/// ever flips `is_read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub recipient_user_id: i64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
}

/// Unread counter for the notification badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}
