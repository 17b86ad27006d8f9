use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgDocumentStore;
use crate::database::store::DocumentStore;
use crate::filter::FilterError;

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Builds the configured store handle. One handle is created at startup and
/// shared by every service; there is no process-global connection.
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, DatabaseError> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory document store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreBackend::Postgres => {
                let name = Self::database_name(&config.url)?;
                let store = PgDocumentStore::connect(config).await?;
                info!("Connected to database: {}", name);
                Ok(Arc::new(store))
            }
        }
    }

    /// Database name is the last path segment of the connection string
    pub fn database_name(url: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.path_segments()
            .and_then(|segments| segments.last())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or(DatabaseError::InvalidDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_database_name_from_url() {
        assert_eq!(
            DatabaseManager::database_name("postgres://localhost:5432/kolejka").unwrap(),
            "kolejka"
        );
        assert_eq!(
            DatabaseManager::database_name("postgres://user:pass@db:5432/test?sslmode=disable").unwrap(),
            "test"
        );
    }

    #[test]
    fn rejects_urls_without_database() {
        assert!(DatabaseManager::database_name("postgres://localhost:5432").is_err());
        assert!(DatabaseManager::database_name("not a url").is_err());
    }

    #[tokio::test]
    async fn memory_backend_needs_no_server() {
        let config = DatabaseConfig {
            url: "postgres://localhost:5432/kolejka".to_string(),
            backend: StoreBackend::Memory,
            max_connections: 1,
            connection_timeout: 1,
        };
        let store = DatabaseManager::connect(&config).await.unwrap();
        store.ping().await.unwrap();
    }
}
