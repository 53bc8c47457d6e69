//! Shared types for the campus book marketplace
//!
//! Domain models and utility functions used by the server crate and by
//! API consumers. DB row types are feature-gated behind `db` so that
//! clients can depend on this crate without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    BroadcastTarget, DemandStatus, EntityKind, OrderStatus, Role, UnlockStatus,
};
