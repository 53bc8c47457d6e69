//! Status enums for the four ledger entity kinds.
//!
//! Statuses are closed enums, stored as snake_case TEXT. The legal
//! transitions between them live in the server's workflow module; these
//! types only name the states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds driven by the status workflow engine.
///
/// Unlock payments have their own lifecycle (see [`UnlockStatus`]) and are
/// deliberately not a member: their resolution is not idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Order,
    ShopOrder,
    Demand,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Order => "order",
            EntityKind::ShopOrder => "shop_order",
            EntityKind::Demand => "demand",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status for peer-to-peer orders and shop orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status for book demands (requested through the Nilkhet channel).
///
/// Demands enter at `requested`; once out for delivery they can no longer
/// be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum DemandStatus {
    Requested,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl DemandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandStatus::Requested => "requested",
            DemandStatus::Processing => "processing",
            DemandStatus::OutForDelivery => "out_for_delivery",
            DemandStatus::Delivered => "delivered",
            DemandStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DemandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status for contact-unlock payments.
///
/// `approved` and `rejected` are terminal; the refund sub-lifecycle is
/// tracked by separate fields on the payment row, not by extra states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum UnlockStatus {
    Pending,
    Approved,
    Rejected,
}

impl UnlockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnlockStatus::Pending => "pending",
            UnlockStatus::Approved => "approved",
            UnlockStatus::Rejected => "rejected",
        }
    }

    /// A payment that is pending or approved blocks a fresh unlock attempt
    /// for the same (user, book) pair.
    pub fn blocks_new_attempt(&self) -> bool {
        !matches!(self, UnlockStatus::Rejected)
    }
}

impl fmt::Display for UnlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
