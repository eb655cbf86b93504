use std::sync::Arc;

use spycat_services::Services;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and every field behind `Arc` are shared.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks).
    pub pool: spycat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rule layer used by every resource handler.
    pub services: Arc<Services>,
}

impl AppState {
    /// Build state with PostgreSQL-backed services over `pool`.
    pub fn new(pool: spycat_db::DbPool, config: ServerConfig) -> Self {
        let services = Arc::new(Services::postgres(pool.clone()));
        Self {
            pool,
            config: Arc::new(config),
            services,
        }
    }
}
