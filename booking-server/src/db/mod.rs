//! Database Module
//!
//! Handles the SurrealDB connection and schema bootstrap.
//!
//! The engine is picked from the URL scheme (`mem://`, `rocksdb://`, `ws://`),
//! so tests, the embedded server and the inspection tool share one code path.

pub mod models;
pub mod repository;

use crate::core::config::DatabaseConfig;
use crate::utils::AppError;
use std::time::Instant;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

/// Idempotent schema statements for the tables this service owns
const SCHEMA: &str = r#"
DEFINE INDEX IF NOT EXISTS consultation_id_idx ON TABLE consultation FIELDS consultation_id UNIQUE;
DEFINE INDEX IF NOT EXISTS consultation_customer_idx ON TABLE consultation FIELDS customer_id;
DEFINE INDEX IF NOT EXISTS consultation_status_idx ON TABLE consultation FIELDS status;
DEFINE INDEX IF NOT EXISTS consultation_specialist_idx ON TABLE consultation FIELDS assigned_specialist_id;
"#;

/// Database service, owns a SurrealDB client handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Any>,
}

impl DbService {
    /// Open a connection and select namespace/database, without touching the schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let db = any::connect(config.url.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        if let Some((username, password)) = config.credentials() {
            db.signin(Root { username, password })
                .await
                .map_err(|e| AppError::database(format!("Database signin failed: {e}")))?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Database connection established"
        );

        Ok(Self { db })
    }

    /// Open a connection and apply the schema
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        let service = Self::connect(config).await?;
        service.apply_schema().await?;
        Ok(service)
    }

    /// Apply index definitions (safe to run on every startup)
    pub async fn apply_schema(&self) -> Result<(), AppError> {
        self.db
            .query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");
        Ok(())
    }

    /// Round-trip to the store, returning the latency in milliseconds
    pub async fn ping(&self) -> Result<u64, AppError> {
        let start = Instant::now();
        self.db
            .health()
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {e}")))?;
        Ok(start.elapsed().as_millis() as u64)
    }
}
