//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - registration and login
//! - [`profile`] - campus affiliation of the acting user
//! - [`books`] - listings and the gated seller contact
//! - [`shops`] - Nilkhet shop directory
//! - [`orders`] - peer-to-peer orders
//! - [`shop_orders`] - shop orders
//! - [`demands`] - book demands
//! - [`unlocks`] - contact-unlock payments and refunds
//! - [`broadcast`] - admin notification broadcast
//! - [`notifications`] - recipient inbox

pub mod auth;
pub mod books;
pub mod broadcast;
pub mod demands;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod profile;
pub mod shop_orders;
pub mod shops;
pub mod unlocks;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
