//! Coordinates the API and the browser fallback.
//!
//! Every request goes to the primary source first. When that fails and the
//! fallback is enabled, status, components and incidents are scraped from the
//! rendered page instead. The remaining entities have no fallback.

use std::future::Future;
use std::sync::Arc;

use crate::api_client::{ApiClient, PrimarySource};
use crate::config::Config;
use crate::error::{StatusError, StatusResult};
use crate::scraper::{FallbackSource, WebScraper};
use crate::types::{Component, Entity, Fetched, Incident, OverallStatus};
use crate::wire::{
    RawComponentsResponse, RawIncidentsResponse, RawMaintenancesResponse, RawStatusResponse,
    RawSummaryResponse,
};

pub type StatusFetch = Fetched<RawStatusResponse, OverallStatus>;
pub type ComponentsFetch = Fetched<RawComponentsResponse, Vec<Component>>;
pub type IncidentsFetch = Fetched<RawIncidentsResponse, Vec<Incident>>;

/// Result of [`DataAccessLayer::get_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct AllData {
    pub status: StatusFetch,
    pub components: ComponentsFetch,
    pub incidents: IncidentsFetch,
}

pub struct DataAccessLayer {
    primary: Arc<dyn PrimarySource>,
    fallback: Arc<dyn FallbackSource>,
    fallback_enabled: bool,
}

impl DataAccessLayer {
    pub fn new(
        primary: Arc<dyn PrimarySource>,
        fallback: Arc<dyn FallbackSource>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            primary,
            fallback,
            fallback_enabled,
        }
    }

    /// API client and Chromium scraper built from configuration.
    pub fn from_config(config: &Config) -> StatusResult<Self> {
        let primary = Arc::new(ApiClient::new(&config.api)?);
        let fallback = Arc::new(WebScraper::new(config.scraper.clone()));
        tracing::info!(
            "Data access layer initialized (scraper fallback {})",
            if config.scraper.fallback_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        Ok(Self::new(primary, fallback, config.scraper.fallback_enabled))
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    pub async fn get_status(&self) -> StatusResult<StatusFetch> {
        self.with_fallback(Entity::Status, self.primary.fetch_status(), || {
            self.fallback.scrape_status()
        })
        .await
    }

    pub async fn get_summary(&self) -> StatusResult<RawSummaryResponse> {
        self.primary_only(Entity::Summary, self.primary.fetch_summary())
            .await
    }

    pub async fn get_components(&self) -> StatusResult<ComponentsFetch> {
        self.with_fallback(Entity::Components, self.primary.fetch_components(), || {
            self.fallback.scrape_components()
        })
        .await
    }

    pub async fn get_incidents(&self) -> StatusResult<IncidentsFetch> {
        self.with_fallback(Entity::Incidents, self.primary.fetch_incidents(), || {
            self.fallback.scrape_incidents()
        })
        .await
    }

    pub async fn get_unresolved_incidents(&self) -> StatusResult<RawIncidentsResponse> {
        self.primary_only(
            Entity::UnresolvedIncidents,
            self.primary.fetch_unresolved_incidents(),
        )
        .await
    }

    pub async fn get_scheduled_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.primary_only(
            Entity::ScheduledMaintenances,
            self.primary.fetch_scheduled_maintenances(),
        )
        .await
    }

    pub async fn get_active_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.primary_only(
            Entity::ActiveMaintenances,
            self.primary.fetch_active_maintenances(),
        )
        .await
    }

    pub async fn get_upcoming_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.primary_only(
            Entity::UpcomingMaintenances,
            self.primary.fetch_upcoming_maintenances(),
        )
        .await
    }

    /// Status, components and incidents fetched concurrently. The first
    /// failure fails the whole call.
    pub async fn get_all(&self) -> StatusResult<AllData> {
        let (status, components, incidents) = tokio::try_join!(
            self.get_status(),
            self.get_components(),
            self.get_incidents(),
        )?;

        Ok(AllData {
            status,
            components,
            incidents,
        })
    }

    /// Release the fallback's browser. Safe to call repeatedly.
    pub async fn close(&self) -> StatusResult<()> {
        self.fallback.close().await
    }

    async fn with_fallback<R, D, P, F, Fut>(
        &self,
        entity: Entity,
        primary: P,
        fallback: F,
    ) -> StatusResult<Fetched<R, D>>
    where
        P: Future<Output = StatusResult<R>>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = StatusResult<D>>,
    {
        let primary_error = match primary.await {
            Ok(raw) => return Ok(Fetched::Raw(raw)),
            Err(e) => e,
        };

        if !self.fallback_enabled {
            tracing::error!("API failed for {entity} and scraper fallback is disabled: {primary_error}");
            return Err(StatusError::DataUnavailable {
                entity,
                source: Box::new(primary_error),
                primary: None,
            });
        }

        tracing::warn!("API failed for {entity}, falling back to scraper: {primary_error}");
        match fallback().await {
            Ok(domain) => {
                tracing::info!("Fetched {entity} via scraper fallback");
                Ok(Fetched::Normalized(domain))
            }
            Err(fallback_error) => {
                tracing::error!("Scraper fallback failed for {entity}: {fallback_error}");
                Err(StatusError::DataUnavailable {
                    entity,
                    source: Box::new(fallback_error),
                    primary: Some(Box::new(primary_error)),
                })
            }
        }
    }

    async fn primary_only<R, P>(&self, entity: Entity, primary: P) -> StatusResult<R>
    where
        P: Future<Output = StatusResult<R>>,
    {
        primary.await.map_err(|e| {
            tracing::error!("API failed for {entity}, no fallback available: {e}");
            StatusError::DataUnavailable {
                entity,
                source: Box::new(e),
                primary: None,
            }
        })
    }
}
