use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTrackingPoint, TrackingPoint};
use crate::database::repository::Repository;
use crate::database::store::DocumentStore;
use crate::filter::FilterData;

/// Path value that selects every tracked subject
pub const ALL_SUBJECTS: &str = "ALL";

/// Which subjects a history query or delete applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingSubject {
    All,
    One(String),
}

impl TrackingSubject {
    pub fn parse(tracking_id: &str) -> Self {
        if tracking_id == ALL_SUBJECTS {
            TrackingSubject::All
        } else {
            TrackingSubject::One(tracking_id.to_string())
        }
    }

    fn where_clause(&self, data_type: Option<&str>) -> Value {
        let mut conditions = Map::new();
        if let TrackingSubject::One(tracking_id) = self {
            conditions.insert("tracking_id".to_string(), json!(tracking_id));
        }
        if let Some(data_type) = data_type {
            conditions.insert("data_type".to_string(), json!(data_type));
        }
        Value::Object(conditions)
    }
}

#[derive(Clone)]
pub struct TrackingService {
    points: Repository<TrackingPoint>,
}

impl TrackingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            points: Repository::new(store),
        }
    }

    pub async fn create(&self, new: NewTrackingPoint) -> Result<TrackingPoint, DatabaseError> {
        let point = TrackingPoint::create(new);
        self.points.insert(&point).await?;
        info!("Tracking point {} stored for {}", point.id, point.tracking_id);
        Ok(point)
    }

    /// Stores each point in order. Writes are independent: a store failure
    /// part way through leaves the earlier points committed.
    pub async fn create_many(&self, batch: Vec<NewTrackingPoint>) -> Result<Vec<TrackingPoint>, DatabaseError> {
        let mut created = Vec::with_capacity(batch.len());
        for new in batch {
            let point = TrackingPoint::create(new);
            self.points.insert(&point).await?;
            created.push(point);
        }
        info!("Bulk stored {} tracking points", created.len());
        Ok(created)
    }

    /// History for a subject, oldest observation first
    pub async fn list(
        &self,
        subject: &TrackingSubject,
        data_type: Option<&str>,
    ) -> Result<Vec<TrackingPoint>, DatabaseError> {
        let filter = FilterData::matching(subject.where_clause(data_type)).ordered_by("tracking_timestamp");
        self.points.select_any(filter).await
    }

    pub async fn delete(&self, subject: &TrackingSubject) -> Result<u64, DatabaseError> {
        let removed = self
            .points
            .delete_any(FilterData::matching(subject.where_clause(None)))
            .await?;
        info!("Deleted {} tracking points for {:?}", removed, subject);
        Ok(removed)
    }
}
