use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::filter::Filter;

/// One stored record: a flat JSON object carrying its own `id`
pub type Document = Map<String, Value>;

/// Collection names, in bootstrap order
pub const COLLECTIONS: &[&str] = &["tracking", "zone"];

/// A networked collection store. Every call may block on I/O; callers that
/// need a deadline wrap the future themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create collections and indexes if they do not exist yet
    async fn ensure_collections(&self) -> Result<(), DatabaseError>;

    async fn insert(&self, collection: &str, id: Uuid, document: Document) -> Result<(), DatabaseError>;

    /// All documents of `filter.collection()` matching the filter, in filter order
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DatabaseError>;

    /// Replace the document with `id`; false when no such document exists
    async fn update(&self, collection: &str, id: Uuid, document: Document) -> Result<bool, DatabaseError>;

    /// Remove every matching document and return how many were removed
    async fn delete(&self, filter: &Filter) -> Result<u64, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
