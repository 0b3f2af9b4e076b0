//! Incident and maintenance queries.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::Utc;
use regex::Regex;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::data_access::DataAccessLayer;
use crate::error::{StatusError, StatusResult};
use crate::transform::{transform_incident, transform_incidents, transform_maintenances};
use crate::types::{Incident, IncidentImpact, IncidentStatus, Maintenance};

use super::{
    ACTIVE_MAINTENANCES_KEY, ALL_INCIDENTS_KEY, ALL_MAINTENANCES_KEY, UNRESOLVED_INCIDENTS_KEY,
    UPCOMING_MAINTENANCES_KEY,
};

static INCIDENTS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("incidents").expect("incidents regex is valid"));
static MAINTENANCES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("maintenances").expect("maintenances regex is valid"));

pub struct IncidentService {
    data: Arc<DataAccessLayer>,
    cache: Arc<TtlCache>,
    incidents_ttl: Duration,
    maintenance_ttl: Duration,
}

impl IncidentService {
    pub fn new(data: Arc<DataAccessLayer>, cache: Arc<TtlCache>, config: &CacheConfig) -> Self {
        Self {
            data,
            cache,
            incidents_ttl: config.ttl_incidents(),
            maintenance_ttl: config.ttl_maintenance(),
        }
    }

    pub async fn all_incidents(&self) -> StatusResult<Vec<Incident>> {
        tracing::debug!("Getting all incidents");
        self.cache
            .get(ALL_INCIDENTS_KEY, self.incidents_ttl, || async {
                Ok(transform_incidents(self.data.get_incidents().await?))
            })
            .await
    }

    pub async fn unresolved_incidents(&self) -> StatusResult<Vec<Incident>> {
        tracing::debug!("Getting unresolved incidents");
        self.cache
            .get(UNRESOLVED_INCIDENTS_KEY, self.incidents_ttl, || async {
                let raw = self.data.get_unresolved_incidents().await?;
                Ok(raw.incidents.into_iter().map(transform_incident).collect())
            })
            .await
    }

    pub async fn by_id(&self, id: &str) -> StatusResult<Incident> {
        self.all_incidents()
            .await?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| StatusError::NotFound {
                kind: "Incident",
                id: id.to_string(),
            })
    }

    pub async fn by_status(&self, status: IncidentStatus) -> StatusResult<Vec<Incident>> {
        let mut incidents = self.all_incidents().await?;
        incidents.retain(|i| i.status == status);
        Ok(incidents)
    }

    pub async fn by_impact(&self, impact: IncidentImpact) -> StatusResult<Vec<Incident>> {
        let mut incidents = self.all_incidents().await?;
        incidents.retain(|i| i.impact == impact);
        Ok(incidents)
    }

    /// Incidents created within the last `days` days.
    pub async fn recent(&self, days: u32) -> StatusResult<Vec<Incident>> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
        let mut incidents = self.all_incidents().await?;
        incidents.retain(|i| i.created_at >= cutoff);
        Ok(incidents)
    }

    pub async fn has_active_incidents(&self) -> StatusResult<bool> {
        Ok(!self.unresolved_incidents().await?.is_empty())
    }

    pub async fn all_maintenances(&self) -> StatusResult<Vec<Maintenance>> {
        tracing::debug!("Getting all maintenances");
        self.cache
            .get(ALL_MAINTENANCES_KEY, self.maintenance_ttl, || async {
                Ok(transform_maintenances(
                    self.data.get_scheduled_maintenances().await?,
                ))
            })
            .await
    }

    pub async fn active_maintenances(&self) -> StatusResult<Vec<Maintenance>> {
        tracing::debug!("Getting active maintenances");
        self.cache
            .get(ACTIVE_MAINTENANCES_KEY, self.maintenance_ttl, || async {
                Ok(transform_maintenances(
                    self.data.get_active_maintenances().await?,
                ))
            })
            .await
    }

    pub async fn upcoming_maintenances(&self) -> StatusResult<Vec<Maintenance>> {
        tracing::debug!("Getting upcoming maintenances");
        self.cache
            .get(UPCOMING_MAINTENANCES_KEY, self.maintenance_ttl, || async {
                Ok(transform_maintenances(
                    self.data.get_upcoming_maintenances().await?,
                ))
            })
            .await
    }

    pub async fn maintenance_by_id(&self, id: &str) -> StatusResult<Maintenance> {
        self.all_maintenances()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| StatusError::NotFound {
                kind: "Maintenance",
                id: id.to_string(),
            })
    }

    pub async fn has_active_maintenances(&self) -> StatusResult<bool> {
        Ok(!self.active_maintenances().await?.is_empty())
    }

    /// Drop every cached incident list. Returns the number of entries removed.
    pub fn invalidate_incidents_cache(&self) -> usize {
        let removed = self.cache.invalidate_pattern(&INCIDENTS_PATTERN);
        tracing::info!("Incidents cache invalidated");
        removed
    }

    pub fn invalidate_maintenances_cache(&self) -> usize {
        let removed = self.cache.invalidate_pattern(&MAINTENANCES_PATTERN);
        tracing::info!("Maintenances cache invalidated");
        removed
    }

    pub fn invalidate_all_caches(&self) -> usize {
        self.invalidate_incidents_cache() + self.invalidate_maintenances_cache()
    }
}
