//! Unlock Ledger Guard
//!
//! Enforces the one-active-payment-per-(user, book) invariant, computes
//! the verification fee, and drives the pending → approved/rejected →
//! refund-requested → refund-resolved sub-lifecycle.
//!
//! Unlike order-status transitions, nothing here is idempotent: approving
//! a payment twice or re-resolving a refund is a caller bug with monetary
//! meaning, and is rejected with a precise error instead of being
//! silently absorbed.

pub mod guard;

pub use guard::{create_unlock, request_refund, resolve_payment, resolve_refund, unlock_fee};
