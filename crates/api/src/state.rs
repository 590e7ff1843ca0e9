use std::sync::Arc;

use toycraft_catalog::{CatalogUseCases, Stores};
use toycraft_core::validation::ContentFilter;

use crate::auth::jwt::JwtIdentityResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly only by the health check.
    pub pool: toycraft_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<CatalogUseCases>,
}

impl AppState {
    /// Wire the catalog to PostgreSQL and the JWT identity resolver.
    pub fn new(pool: toycraft_db::DbPool, config: ServerConfig) -> Self {
        let catalog = CatalogUseCases::new(
            Stores::postgres(pool.clone()),
            Arc::new(JwtIdentityResolver::new(&config.jwt)),
            ContentFilter::new(&config.banned_words),
        );
        Self {
            pool,
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
