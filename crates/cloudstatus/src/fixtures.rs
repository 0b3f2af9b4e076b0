//! Canned API payloads and fake data sources shared by unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::api_client::PrimarySource;
use crate::error::{StatusError, StatusResult};
use crate::scraper::FallbackSource;
use crate::types::{Component, Entity, Incident, IndicatorLevel, MaintenanceStatus, OverallStatus};
use crate::wire::{
    RawComponentsResponse, RawIncidentsResponse, RawMaintenancesResponse, RawStatusResponse,
    RawSummaryResponse,
};

const PAGE: &str = r#"{
    "id": "pg01",
    "name": "Cloud Services",
    "url": "https://www.f5cloudstatus.com",
    "time_zone": "Etc/UTC",
    "updated_at": "2025-01-15T10:30:00.000Z"
}"#;

pub fn status_json(indicator: &str, description: &str) -> String {
    format!(
        r#"{{"page": {PAGE}, "status": {{"indicator": "{indicator}", "description": "{description}"}}}}"#
    )
}

fn component(id: &str, name: &str, status: &str, position: i64, group_id: Option<&str>) -> String {
    let group_id = group_id
        .map(|g| format!("\"{g}\""))
        .unwrap_or_else(|| "null".to_string());
    format!(
        r#"{{
            "id": "{id}",
            "name": "{name}",
            "status": "{status}",
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2025-01-15T10:00:00.000Z",
            "position": {position},
            "description": null,
            "showcase": true,
            "start_date": null,
            "group_id": {group_id},
            "group": false,
            "only_show_if_degraded": false
        }}"#
    )
}

/// Four leaf components (one degraded) and one group entry.
pub fn components_json() -> String {
    let group = r#"{
        "id": "grp-edge",
        "name": "Edge Services",
        "status": "degraded_performance",
        "created_at": "2024-01-01T00:00:00.000Z",
        "updated_at": "2025-01-15T10:00:00.000Z",
        "position": 0,
        "description": null,
        "showcase": false,
        "start_date": null,
        "group_id": null,
        "group": true,
        "only_show_if_degraded": false,
        "components": ["cmp-cdn", "cmp-dns"]
    }"#;
    let entries = [
        group.to_string(),
        component("cmp-api", "API Gateway", "operational", 1, None),
        component("cmp-cdn", "CDN", "degraded_performance", 2, Some("grp-edge")),
        component("cmp-dns", "DNS", "operational", 3, Some("grp-edge")),
        component("cmp-portal", "Customer Portal", "operational", 4, Some("grp-console")),
    ];
    format!(r#"{{"page": {PAGE}, "components": [{}]}}"#, entries.join(","))
}

fn update(id: &str, status: &str, body: &str, at: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "status": "{status}",
            "body": "{body}",
            "incident_id": "inc",
            "created_at": "{at}",
            "updated_at": "{at}",
            "display_at": "{at}",
            "affected_components": [
                {{"code": "cmp-cdn", "name": "CDN", "old_status": "operational", "new_status": "degraded_performance"}}
            ],
            "deliver_notifications": true,
            "custom_tweet": null,
            "tweet_id": null
        }}"#
    )
}

/// One unresolved major incident and one resolved minor incident.
pub fn incidents_json() -> String {
    let cdn = component("cmp-cdn", "CDN", "degraded_performance", 2, Some("grp-edge"));
    let api = component("cmp-api", "API Gateway", "operational", 1, None);
    let open = format!(
        r#"{{
            "id": "inc-open",
            "name": "Elevated CDN latency",
            "status": "monitoring",
            "created_at": "2025-01-15T08:00:00.000Z",
            "updated_at": "2025-01-15T09:00:00.000Z",
            "monitoring_at": "2025-01-15T09:00:00.000Z",
            "resolved_at": null,
            "impact": "major",
            "shortlink": "https://stspg.io/open",
            "started_at": "2025-01-15T08:00:00.000Z",
            "page_id": "pg01",
            "incident_updates": [{}, {}],
            "components": [{cdn}]
        }}"#,
        update("upd-2", "monitoring", "A fix has been deployed.", "2025-01-15T09:00:00.000Z"),
        update("upd-1", "investigating", "We are investigating.", "2025-01-15T08:00:00.000Z"),
    );
    let closed = format!(
        r#"{{
            "id": "inc-closed",
            "name": "API errors",
            "status": "resolved",
            "created_at": "2025-01-10T08:00:00.000Z",
            "updated_at": "2025-01-10T10:00:00.000Z",
            "monitoring_at": null,
            "resolved_at": "2025-01-10T10:00:00.000Z",
            "impact": "minor",
            "shortlink": "https://stspg.io/closed",
            "started_at": "2025-01-10T08:00:00.000Z",
            "page_id": "pg01",
            "incident_updates": [{}],
            "components": [{api}]
        }}"#,
        update("upd-3", "resolved", "Resolved.", "2025-01-10T10:00:00.000Z"),
    );
    format!(r#"{{"page": {PAGE}, "incidents": [{open}, {closed}]}}"#)
}

/// Only the unresolved incident from [`incidents_json`].
pub fn unresolved_incidents_json() -> String {
    let mut parsed = incidents();
    parsed.incidents.retain(|i| i.resolved_at.is_none());
    serde_json::to_string(&parsed).unwrap()
}

fn maintenance(id: &str, name: &str, status: &str, from: &str, until: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "name": "{name}",
            "status": "{status}",
            "created_at": "2025-01-01T00:00:00.000Z",
            "updated_at": "2025-01-01T00:00:00.000Z",
            "monitoring_at": null,
            "resolved_at": null,
            "impact": "maintenance",
            "shortlink": "https://stspg.io/{id}",
            "started_at": "{from}",
            "page_id": "pg01",
            "incident_updates": [{{
                "id": "{id}-upd",
                "status": "{status}",
                "body": "Scheduled work on {name}.",
                "created_at": "2025-01-01T00:00:00.000Z",
                "display_at": "2025-01-01T00:00:00.000Z",
                "affected_components": null
            }}],
            "components": [],
            "scheduled_for": "{from}",
            "scheduled_until": "{until}"
        }}"#
    )
}

/// One in-progress and one scheduled maintenance window.
pub fn maintenances_json() -> String {
    let active = maintenance(
        "mnt-db",
        "Database upgrade",
        "in_progress",
        "2025-01-15T06:00:00.000Z",
        "2025-01-15T12:00:00.000Z",
    );
    let upcoming = maintenance(
        "mnt-net",
        "Network maintenance",
        "scheduled",
        "2025-02-01T06:00:00.000Z",
        "2025-02-01T08:00:00.000Z",
    );
    format!(r#"{{"page": {PAGE}, "scheduled_maintenances": [{active}, {upcoming}]}}"#)
}

pub fn status(indicator: &str, description: &str) -> RawStatusResponse {
    serde_json::from_str(&status_json(indicator, description)).unwrap()
}

pub fn components() -> RawComponentsResponse {
    serde_json::from_str(&components_json()).unwrap()
}

pub fn incidents() -> RawIncidentsResponse {
    serde_json::from_str(&incidents_json()).unwrap()
}

pub fn maintenances() -> RawMaintenancesResponse {
    serde_json::from_str(&maintenances_json()).unwrap()
}

pub fn summary() -> RawSummaryResponse {
    let status = status("minor", "Minor Service Outage");
    RawSummaryResponse {
        page: status.page,
        components: components().components,
        incidents: incidents().incidents,
        scheduled_maintenances: maintenances().scheduled_maintenances,
        status: status.status,
    }
}

/// Primary source serving the canned payloads, failing for chosen entities.
#[derive(Default)]
pub struct FakePrimary {
    pub failing: Mutex<HashSet<Entity>>,
    pub calls: Mutex<Vec<Entity>>,
    pub indicator: Option<&'static str>,
}

impl FakePrimary {
    pub fn failing(entities: &[Entity]) -> Self {
        Self {
            failing: Mutex::new(entities.iter().copied().collect()),
            ..Default::default()
        }
    }

    pub fn calls_for(&self, entity: Entity) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|e| **e == entity)
            .count()
    }

    pub fn set_failing(&self, entity: Entity, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(entity);
        } else {
            set.remove(&entity);
        }
    }

    fn serve<T>(&self, entity: Entity, value: impl FnOnce() -> T) -> StatusResult<T> {
        self.calls.lock().unwrap().push(entity);
        if self.failing.lock().unwrap().contains(&entity) {
            return Err(StatusError::Timeout {
                url: entity.api_path().to_string(),
                timeout_ms: 10_000,
            });
        }
        Ok(value())
    }
}

#[async_trait]
impl PrimarySource for FakePrimary {
    async fn fetch_status(&self) -> StatusResult<RawStatusResponse> {
        let indicator = self.indicator.unwrap_or("none");
        self.serve(Entity::Status, || status(indicator, "All Systems Operational"))
    }

    async fn fetch_summary(&self) -> StatusResult<RawSummaryResponse> {
        self.serve(Entity::Summary, summary)
    }

    async fn fetch_components(&self) -> StatusResult<RawComponentsResponse> {
        self.serve(Entity::Components, components)
    }

    async fn fetch_incidents(&self) -> StatusResult<RawIncidentsResponse> {
        self.serve(Entity::Incidents, incidents)
    }

    async fn fetch_unresolved_incidents(&self) -> StatusResult<RawIncidentsResponse> {
        self.serve(Entity::UnresolvedIncidents, || {
            serde_json::from_str(&unresolved_incidents_json()).unwrap()
        })
    }

    async fn fetch_scheduled_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.serve(Entity::ScheduledMaintenances, maintenances)
    }

    async fn fetch_active_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.serve(Entity::ActiveMaintenances, || {
            let mut raw = maintenances();
            raw.scheduled_maintenances
                .retain(|m| m.status == MaintenanceStatus::InProgress);
            raw
        })
    }

    async fn fetch_upcoming_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.serve(Entity::UpcomingMaintenances, || {
            let mut raw = maintenances();
            raw.scheduled_maintenances
                .retain(|m| m.status == MaintenanceStatus::Scheduled);
            raw
        })
    }
}

/// Fallback source returning fixed domain objects, or failing on demand.
#[derive(Default)]
pub struct FakeFallback {
    pub fail: bool,
    pub calls: AtomicUsize,
    pub closes: AtomicUsize,
}

impl FakeFallback {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn serve<T>(&self, what: &str, value: impl FnOnce() -> T) -> StatusResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StatusError::scraper(
                format!("Failed to scrape {what}"),
                "browser unavailable",
            ));
        }
        Ok(value())
    }
}

#[async_trait]
impl FallbackSource for FakeFallback {
    async fn scrape_status(&self) -> StatusResult<OverallStatus> {
        self.serve("status", || {
            let indicator = IndicatorLevel::Minor;
            OverallStatus {
                status: indicator.status_level(),
                indicator,
                description: "Minor Service Outage".to_string(),
                last_updated: Utc::now(),
            }
        })
    }

    async fn scrape_components(&self) -> StatusResult<Vec<Component>> {
        self.serve("components", || {
            vec![Component {
                id: "component-0".to_string(),
                name: "API Gateway".to_string(),
                status: IndicatorLevel::Minor,
                description: None,
                group: None,
                position: 0,
                only_show_if_degraded: false,
            }]
        })
    }

    async fn scrape_incidents(&self) -> StatusResult<Vec<Incident>> {
        self.serve("incidents", Vec::new)
    }

    async fn close(&self) -> StatusResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
