//! Per-kind transition tables.
//!
//! Expressed as exhaustive adjacency matches so that adding a status
//! variant forces this module to be revisited. Terminal states return
//! the empty slice.

use shared::models::{DemandStatus, OrderStatus};

/// Legal next states for orders and shop orders.
pub fn order_next(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Processing, Cancelled],
        Processing => &[OutForDelivery, Cancelled],
        OutForDelivery => &[Delivered, Cancelled],
        Delivered => &[],
        Cancelled => &[],
    }
}

pub fn order_can_move(from: OrderStatus, to: OrderStatus) -> bool {
    order_next(from).contains(&to)
}

/// Legal next states for demands. Once out for delivery a demand can no
/// longer be cancelled.
pub fn demand_next(from: DemandStatus) -> &'static [DemandStatus] {
    use DemandStatus::*;
    match from {
        Requested => &[Processing, Cancelled],
        Processing => &[OutForDelivery, Cancelled],
        OutForDelivery => &[Delivered],
        Delivered => &[],
        Cancelled => &[],
    }
}

pub fn demand_can_move(from: DemandStatus, to: DemandStatus) -> bool {
    demand_next(from).contains(&to)
}
