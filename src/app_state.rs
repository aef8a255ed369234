use crate::config::Config;
use crate::db::{DbConnection, DbPool};
use crate::error::AppError;
use crate::storage::ObjectStorageClient;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub storage_client: ObjectStorageClient,
    pub config: Config,
}

impl AppState {
    pub fn new(db_pool: DbPool, storage_client: ObjectStorageClient, config: Config) -> Self {
        Self {
            db_pool,
            storage_client,
            config,
        }
    }

    pub fn conn(&self) -> Result<DbConnection, AppError> {
        self.db_pool
            .get()
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
