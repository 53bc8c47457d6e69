//! Status Workflow Engine
//!
//! Validates and applies status transitions for the three statusful
//! ledger kinds (orders, shop orders, demands) against per-kind
//! transition tables, then emits one [`StatusChangedEvent`] per
//! state-changing write.
//!
//! Policy split worth knowing: these transitions are advisory workflow
//! state, so a retry targeting the current status is a no-op success.
//! Payment resolution (the unlock module) is the strict opposite.

pub mod engine;
pub mod transitions;

pub use engine::{transition_demand, transition_order, transition_shop_order};
