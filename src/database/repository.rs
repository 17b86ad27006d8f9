use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Entity;
use crate::database::store::{Document, DocumentStore};
use crate::filter::{Filter, FilterData};

/// Typed access to one collection. Records go in and out as `T`; the store
/// only ever sees documents.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn insert(&self, record: &T) -> Result<(), DatabaseError> {
        self.store
            .insert(T::COLLECTION, record.id(), to_document(record)?)
            .await
    }

    pub async fn select_any(&self, filter_data: FilterData) -> Result<Vec<T>, DatabaseError> {
        let mut filter = Filter::new(T::COLLECTION)?;
        filter.assign(filter_data)?;

        self.store
            .find(&filter)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    pub async fn select_one(&self, filter_data: FilterData) -> Result<Option<T>, DatabaseError> {
        Ok(self.select_any(filter_data).await?.into_iter().next())
    }

    pub async fn select_404(&self, filter_data: FilterData) -> Result<T, DatabaseError> {
        self.select_one(filter_data)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} not found", T::COLLECTION)))
    }

    pub async fn select_id(&self, id: Uuid) -> Result<T, DatabaseError> {
        self.select_404(FilterData::matching(json!({ "id": id })))
            .await
    }

    /// Replace the stored record with the same id
    pub async fn update(&self, record: &T) -> Result<(), DatabaseError> {
        if self
            .store
            .update(T::COLLECTION, record.id(), to_document(record)?)
            .await?
        {
            Ok(())
        } else {
            Err(DatabaseError::NotFound(format!("{} not found", T::COLLECTION)))
        }
    }

    pub async fn delete_any(&self, filter_data: FilterData) -> Result<u64, DatabaseError> {
        let mut filter = Filter::new(T::COLLECTION)?;
        filter.assign(filter_data)?;
        self.store.delete(&filter).await
    }
}

fn to_document<T: Serialize>(record: &T) -> Result<Document, DatabaseError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(DatabaseError::QueryError(format!(
            "record did not serialize to a document: {}",
            other
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DatabaseError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::database::models::{NewZone, Zone, ZoneType};

    fn zone(name: &str) -> Zone {
        Zone::create(NewZone {
            name: name.to_string(),
            description: None,
            zone_type: ZoneType::Checkpoint,
            image: None,
            lat: 1.0,
            lon: 2.0,
            radius: 100,
        })
    }

    fn repo() -> Repository<Zone> {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn insert_then_select_by_id() {
        let repo = repo();
        let created = zone("A");
        repo.insert(&created).await.unwrap();

        let loaded = repo.select_id(created.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.select_id(Uuid::new_v4()).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(
            repo.update(&zone("ghost")).await,
            Err(DatabaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_persists_changes() {
        let repo = repo();
        let mut created = zone("A");
        repo.insert(&created).await.unwrap();

        created.enabled = false;
        repo.update(&created).await.unwrap();
        assert!(!repo.select_id(created.id).await.unwrap().enabled);
    }
}
