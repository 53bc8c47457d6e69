//! Data models
//!
//! Shared between market-server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! UTC milliseconds.

pub mod book;
pub mod broadcast;
pub mod demand;
pub mod notification;
pub mod order;
pub mod profile;
pub mod shop;
pub mod shop_order;
pub mod status;
pub mod unlock_payment;
pub mod user;

// Re-exports
pub use book::*;
pub use broadcast::*;
pub use demand::*;
pub use notification::*;
pub use order::*;
pub use profile::*;
pub use shop::*;
pub use shop_order::*;
pub use status::*;
pub use unlock_payment::*;
pub use user::*;
