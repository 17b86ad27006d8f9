use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::store::{Document, DocumentStore, COLLECTIONS};
use crate::filter::Filter;

/// Process-local document store, used for development and tests.
/// Documents keep insertion order until a filter sorts them.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(Uuid, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ensure_collections(&self) -> Result<(), DatabaseError> {
        let mut collections = self.collections.write().await;
        for name in COLLECTIONS {
            collections.entry(name.to_string()).or_default();
        }
        Ok(())
    }

    async fn insert(&self, collection: &str, id: Uuid, document: Document) -> Result<(), DatabaseError> {
        Filter::new(collection)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|(existing, _)| *existing == id) {
            return Err(DatabaseError::QueryError(format!("duplicate id {} in {}", id, collection)));
        }
        docs.push((id, document));
        Ok(())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        let mut found: Vec<Document> = collections
            .get(filter.collection())
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default();
        filter.sort(&mut found);
        Ok(found)
    }

    async fn update(&self, collection: &str, id: Uuid, document: Document) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| *existing == id));
        match slot {
            Some((_, doc)) => {
                *doc = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, filter: &Filter) -> Result<u64, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(filter.collection()) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(_, doc)| !filter.matches(doc));
        Ok((before - docs.len()) as u64)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
