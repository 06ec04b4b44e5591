//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::services::auth::{TokenError, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` if no signing secret is configured.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, TokenError> {
        let tokens = TokenService::new(&config.jwt_secret)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
            }),
        })
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// State over a pool that never connects, for exercising request
    /// handling that stops before the database.
    #[cfg(test)]
    #[allow(clippy::expect_used)]
    pub(crate) fn for_tests() -> Self {
        let config = crate::config::test_config();
        let pool = crate::db::create_lazy_pool(&config.database_url, config.statement_timeout)
            .expect("test database URL parses");
        Self::new(config, pool).expect("test secret is set")
    }
}
