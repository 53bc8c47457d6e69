//! Market Server - campus book marketplace backend
//!
//! # Architecture
//!
//! The core of this service is the payment-gated unlock and multi-entity
//! status workflow engine:
//!
//! - **workflow**: per-kind transition tables + compare-and-swap
//!   application for orders, shop orders and demands
//! - **unlock**: contact-unlock payment ledger guard (uniqueness, fee
//!   schedule, verify/refund lifecycle)
//! - **notify**: audience resolver, notification dispatcher and the
//!   best-effort admin mail side-channel
//!
//! Everything else (auth, directories, CRUD surfaces) supports that core.
//!
//! # Module layout
//!
//! ```text
//! market-server/src/
//! ├── core/          # Config, state, server, background tasks
//! ├── auth/          # JWT auth, actor capability
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool + repositories
//! ├── workflow/      # status workflow engine
//! ├── unlock/        # unlock ledger guard
//! ├── notify/        # notifications + mail side-channel
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod unlock;
pub mod utils;
pub mod workflow;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  ____  _    ____
   / __ )/ __ \(_)  / __ )____ _____  ____ ______
  / __  / / / / /  / __  / __ `/_  / / __ `/ ___/
 / /_/ / /_/ / /  / /_/ / /_/ / / /_/ /_/ / /
/_____/\____/_/  /_____/\__,_/ /___/\__,_/_/
    "#
    );
}
