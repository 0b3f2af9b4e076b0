//! Wire types mirroring the Statuspage v2 JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{IncidentImpact, IncidentStatus, IndicatorLevel, MaintenanceStatus};

/// Page metadata present on every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatus {
    pub indicator: IndicatorLevel,
    pub description: String,
}

/// `GET /status.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatusResponse {
    pub page: RawPage,
    pub status: RawStatus,
}

/// `GET /summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSummaryResponse {
    pub page: RawPage,
    #[serde(default)]
    pub components: Vec<RawComponent>,
    #[serde(default)]
    pub incidents: Vec<RawIncident>,
    #[serde(default)]
    pub scheduled_maintenances: Vec<RawMaintenance>,
    pub status: RawStatus,
}

/// `GET /components.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponentsResponse {
    pub page: RawPage,
    pub components: Vec<RawComponent>,
}

/// `GET /incidents.json` and `GET /incidents/unresolved.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIncidentsResponse {
    pub page: RawPage,
    pub incidents: Vec<RawIncident>,
}

/// `GET /scheduled-maintenances.json` and its `active` / `upcoming` variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaintenancesResponse {
    pub page: RawPage,
    pub scheduled_maintenances: Vec<RawMaintenance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawComponentStatus {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    pub id: String,
    pub name: String,
    pub status: RawComponentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub showcase: bool,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub only_show_if_degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAffectedComponent {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub old_status: Option<String>,
    #[serde(default)]
    pub new_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIncidentUpdate {
    pub id: String,
    pub status: IncidentStatus,
    pub body: String,
    #[serde(default)]
    pub incident_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
    #[serde(default)]
    pub affected_components: Option<Vec<RawAffectedComponent>>,
    #[serde(default)]
    pub deliver_notifications: bool,
    #[serde(default)]
    pub custom_tweet: Option<String>,
    #[serde(default)]
    pub tweet_id: Option<String>,
}

/// Maintenance updates reuse incident statuses on the wire only loosely, so
/// they are kept as plain strings and mapped during transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaintenanceUpdate {
    pub id: String,
    pub status: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
    #[serde(default)]
    pub affected_components: Option<Vec<RawAffectedComponent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIncident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub monitoring_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub impact: IncidentImpact,
    #[serde(default)]
    pub shortlink: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub incident_updates: Vec<RawIncidentUpdate>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaintenance {
    pub id: String,
    pub name: String,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub monitoring_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub impact: IncidentImpact,
    #[serde(default)]
    pub shortlink: String,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub incident_updates: Vec<RawMaintenanceUpdate>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
    pub scheduled_for: DateTime<Utc>,
    pub scheduled_until: DateTime<Utc>,
}
