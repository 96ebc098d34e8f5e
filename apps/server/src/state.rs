//! Shared application state

use crate::{
    config::Config,
    db::{InMemorySpecStore, PostgresSpecStore, SpecStore},
    services::CodegenService,
    Result,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spec_store: Arc<dyn SpecStore>,
    pub codegen_service: Arc<CodegenService>,
}

impl AppState {
    /// Build state from configuration, connecting to PostgreSQL when a
    /// database URL is configured.
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn SpecStore> = match &config.database.url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .min_connections(config.database.pool_min_size)
                    .max_connections(config.database.pool_max_size)
                    .acquire_timeout(Duration::from_secs(config.database.pool_timeout_seconds))
                    .connect(url)
                    .await?;

                if config.database.run_migrations {
                    sqlx::migrate!("./migrations").run(&pool).await?;
                    tracing::info!("Database migrations applied");
                }

                tracing::info!(
                    pool_max_size = config.database.pool_max_size,
                    "Using PostgreSQL spec store"
                );
                Arc::new(PostgresSpecStore::new(pool))
            }
            None => {
                tracing::warn!("No database URL configured, specifications are kept in memory");
                Arc::new(InMemorySpecStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Build state around an existing store
    pub fn with_store(config: Config, spec_store: Arc<dyn SpecStore>) -> Self {
        let codegen_service = Arc::new(CodegenService::new(&config.codegen));
        Self {
            config: Arc::new(config),
            spec_store,
            codegen_service,
        }
    }
}
