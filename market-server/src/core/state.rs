//! Server state - shared references to every service.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{BackgroundTasks, Config};
use crate::db::DbService;
use crate::notify::{Dispatcher, Mailer};
use crate::utils::AppError;

/// Shared application state, cloned into every handler.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | db | SQLite pool (the only shared mutable resource) |
/// | jwt_service | token issue/validate |
/// | dispatcher | notification writes + admin mail side-channel |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub dispatcher: Dispatcher,
}

impl ServerState {
    /// Build all services. The mail worker is registered on `tasks`.
    pub async fn initialize(
        config: &Config,
        tasks: &mut BackgroundTasks,
    ) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_path).await?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let mailer = Mailer::start(config, tasks);
        let dispatcher = Dispatcher::new(db.pool.clone(), mailer);

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            dispatcher,
        })
    }

    /// In-memory state for tests and scenario drivers: no mail relay,
    /// throwaway database.
    pub async fn initialize_in_memory() -> Result<Self, AppError> {
        let config = Config::with_overrides(":memory:", 0);
        let db = DbService::open_in_memory().await?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let mailer = Mailer::disabled(&config.admin_email);
        let dispatcher = Dispatcher::new(db.pool.clone(), mailer);

        Ok(Self {
            config,
            db,
            jwt_service,
            dispatcher,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
