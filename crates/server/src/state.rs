//! Shared per-process state handed to every handler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

/// Handler state: configuration plus the database pool, behind one `Arc`
/// so the per-request clone is pointer-cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pool: PgPool,
}

impl AppState {
    /// Bundle the loaded configuration and pool into shareable state.
    #[must_use]
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Database pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
