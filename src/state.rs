use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the server state. The pool is lazy and the startup ping only
    /// logs: like the original stub, a missing database is reported but does
    /// not keep the health route from serving.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(&config.database_url)?;

        match sqlx::query("SELECT 1").execute(&db).await {
            Ok(_) => tracing::info!("database connected"),
            Err(e) => tracing::error!(error = %e, "database connection error"),
        }

        Ok(Self { db, config })
    }
}
