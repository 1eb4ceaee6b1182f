//! Embedded database service
//!
//! One RocksDB-backed SurrealDB instance per server process. Schema
//! definitions are applied idempotently at startup; there is no separate
//! migration step.

pub mod models;
pub mod repository;
pub mod schema;
pub mod tx;

use shared::error::{AppError, AppResult};
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

pub const NAMESPACE: &str = "farmgate";
pub const DATABASE: &str = "market";

/// Handle to the embedded store
#[derive(Debug, Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the store at `path` and apply schema definitions
    pub async fn open(path: &Path) -> AppResult<Self> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("failed to open store: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("failed to select namespace: {e}")))?;

        schema::define(&db).await?;

        tracing::info!("📦 Database ready at {}", path.display());
        Ok(Self { db })
    }

    /// Cheap clone of the underlying connection
    pub fn handle(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
