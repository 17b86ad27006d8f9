use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::database::store::{Document, DocumentStore, COLLECTIONS};
use crate::filter::Filter;

/// Document store on Postgres: one `(id UUID, doc JSONB)` table per collection
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;
        Ok(Self { pool })
    }

    fn table(collection: &str) -> Result<String, DatabaseError> {
        // Reuse Filter name validation before interpolating into SQL
        Filter::new(collection)?;
        Ok(format!("\"{}\"", collection))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ensure_collections(&self) -> Result<(), DatabaseError> {
        for collection in COLLECTIONS {
            let query = format!(
                "CREATE TABLE IF NOT EXISTS {} (id UUID PRIMARY KEY, doc JSONB NOT NULL)",
                Self::table(collection)?
            );
            sqlx::query(&query).execute(&self.pool).await?;
        }

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS tracking_subject_timestamp_idx \
             ON \"tracking\" ((\"doc\"->'tracking_id'), (\"doc\"->'tracking_timestamp'))",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS zone_enabled_created_idx \
             ON \"zone\" ((\"doc\"->'enabled'), (\"doc\"->'created_at'))",
        )
        .execute(&self.pool)
        .await?;

        info!("Collections ready: {}", COLLECTIONS.join(", "));
        Ok(())
    }

    async fn insert(&self, collection: &str, id: Uuid, document: Document) -> Result<(), DatabaseError> {
        let query = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", Self::table(collection)?);
        sqlx::query(&query)
            .bind(id)
            .bind(Value::Object(document))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DatabaseError> {
        QueryBuilder::new(filter).select_all(&self.pool).await
    }

    async fn update(&self, collection: &str, id: Uuid, document: Document) -> Result<bool, DatabaseError> {
        let query = format!("UPDATE {} SET doc = $2 WHERE id = $1", Self::table(collection)?);
        let result = sqlx::query(&query)
            .bind(id)
            .bind(Value::Object(document))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, filter: &Filter) -> Result<u64, DatabaseError> {
        QueryBuilder::new(filter).delete(&self.pool).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
