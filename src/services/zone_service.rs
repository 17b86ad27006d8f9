use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewZone, Zone};
use crate::database::repository::Repository;
use crate::database::store::DocumentStore;
use crate::filter::FilterData;

#[derive(Clone)]
pub struct ZoneService {
    zones: Repository<Zone>,
}

impl ZoneService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            zones: Repository::new(store),
        }
    }

    pub async fn create(&self, new: NewZone) -> Result<Zone, DatabaseError> {
        let zone = Zone::create(new);
        self.zones.insert(&zone).await?;
        info!("Zone {} created ({})", zone.id, zone.name);
        Ok(zone)
    }

    /// Zones in creation order; disabled zones only when asked for
    pub async fn list(&self, show_inactive: bool) -> Result<Vec<Zone>, DatabaseError> {
        let filter = if show_inactive {
            FilterData::default()
        } else {
            FilterData::matching(json!({ "enabled": true }))
        };
        self.zones.select_any(filter.ordered_by("created_at")).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Zone, DatabaseError> {
        self.zones.select_id(id).await
    }

    /// Names of the enabled zones among `ids`, in one lookup.
    /// Ids that are not UUIDs cannot name a zone and are skipped.
    pub async fn zone_names<'a, I>(&self, ids: I) -> Result<HashMap<String, String>, DatabaseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut wanted: Vec<Uuid> = ids.into_iter().filter_map(|id| Uuid::parse_str(id).ok()).collect();
        wanted.sort();
        wanted.dedup();
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }

        let zones = self
            .zones
            .select_any(FilterData::matching(json!({
                "id": { "$in": wanted },
                "enabled": true,
            })))
            .await?;
        Ok(zones.into_iter().map(|zone| (zone.id.to_string(), zone.name)).collect())
    }

    /// Disable a zone. The record stays in the store.
    pub async fn soft_delete(&self, id: Uuid) -> Result<Zone, DatabaseError> {
        let mut zone = self.zones.select_id(id).await?;
        zone.enabled = false;
        self.zones.update(&zone).await?;
        info!("Zone {} disabled", zone.id);
        Ok(zone)
    }

    /// Pair two zones with each other.
    ///
    /// A zone that was paired elsewhere is released first: its former partner
    /// loses the back reference, so pairs stay symmetric. The writes are not
    /// isolated from concurrent pairing requests.
    pub async fn pair_zones(&self, zone_id: Uuid, pair_zone_id: Uuid) -> Result<(Zone, Zone), DatabaseError> {
        if zone_id == pair_zone_id {
            return Err(DatabaseError::InvalidInput("zone cannot be paired with itself".to_string()));
        }

        let mut zone = self.zones.select_id(zone_id).await?;
        let mut pair = self.zones.select_id(pair_zone_id).await?;

        for current in [&zone, &pair] {
            if let Some(former) = current.pair_zone_id {
                if former != zone.id && former != pair.id {
                    self.release(former, current.id).await?;
                }
            }
        }

        zone.pair_zone_id = Some(pair.id);
        pair.pair_zone_id = Some(zone.id);
        self.zones.update(&zone).await?;
        self.zones.update(&pair).await?;

        info!("Zones paired: {} <-> {}", zone.id, pair.id);
        Ok((zone, pair))
    }

    /// Clear `former`'s pairing if it still points at `partner`
    async fn release(&self, former: Uuid, partner: Uuid) -> Result<(), DatabaseError> {
        let mut stale = match self.zones.select_id(former).await {
            Ok(zone) => zone,
            Err(DatabaseError::NotFound(_)) => {
                warn!("Zone {} was paired with missing zone {}", partner, former);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if stale.is_paired_with(partner) {
            stale.pair_zone_id = None;
            self.zones.update(&stale).await?;
            info!("Zone {} unpaired from {}", stale.id, partner);
        }
        Ok(())
    }
}
