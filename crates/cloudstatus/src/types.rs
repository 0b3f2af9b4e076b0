//! Domain types for service health, components, incidents, and maintenance.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordinal severity describing a component or the overall page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorLevel {
    /// Maintenance windows report their impact as `maintenance`.
    #[serde(alias = "maintenance")]
    None,
    Minor,
    Major,
    Critical,
}

impl IndicatorLevel {
    pub const ALL: [IndicatorLevel; 4] = [
        IndicatorLevel::None,
        IndicatorLevel::Minor,
        IndicatorLevel::Major,
        IndicatorLevel::Critical,
    ];

    /// Human-facing status category for this indicator.
    pub fn status_level(self) -> StatusLevel {
        match self {
            IndicatorLevel::None => StatusLevel::Operational,
            IndicatorLevel::Minor => StatusLevel::DegradedPerformance,
            IndicatorLevel::Major => StatusLevel::PartialOutage,
            IndicatorLevel::Critical => StatusLevel::MajorOutage,
        }
    }

    /// Derive the indicator from an element class list, strongest match wins.
    pub fn from_class_list(class: &str) -> Self {
        if class.contains("critical") {
            IndicatorLevel::Critical
        } else if class.contains("major") {
            IndicatorLevel::Major
        } else if class.contains("minor") {
            IndicatorLevel::Minor
        } else {
            IndicatorLevel::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorLevel::None => "none",
            IndicatorLevel::Minor => "minor",
            IndicatorLevel::Major => "major",
            IndicatorLevel::Critical => "critical",
        }
    }
}

/// Impact of an incident or maintenance uses the indicator scale.
pub type IncidentImpact = IndicatorLevel;

/// Human-facing category derived one-to-one from [`IndicatorLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Postmortem,
}

impl IncidentStatus {
    /// Parse free text as shown on the rendered page, e.g. "Monitoring".
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "investigating" => Some(IncidentStatus::Investigating),
            "identified" => Some(IncidentStatus::Identified),
            "monitoring" => Some(IncidentStatus::Monitoring),
            "resolved" => Some(IncidentStatus::Resolved),
            "postmortem" => Some(IncidentStatus::Postmortem),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Verifying,
    Completed,
}

/// Overall system status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStatus {
    pub status: StatusLevel,
    pub indicator: IndicatorLevel,
    pub description: String,
    pub last_updated: DateTime<Utc>,
}

/// A service or infrastructure element listed on the status page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub status: IndicatorLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub position: i64,
    pub only_show_if_degraded: bool,
}

/// Components collected under one group name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub id: String,
    pub name: String,
    pub position: usize,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub id: String,
    pub status: IncidentStatus,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
    pub affected_components: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    pub impact: IncidentImpact,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub shortlink: String,
    pub updates: Vec<IncidentUpdate>,
    pub affected_components: Vec<String>,
}

/// Update posted to a maintenance window. Statuses vary by page, so they
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceUpdate {
    pub id: String,
    pub status: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
    pub affected_components: Vec<String>,
}

/// Scheduled maintenance window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub id: String,
    pub name: String,
    pub status: MaintenanceStatus,
    pub impact: IncidentImpact,
    pub scheduled_for: DateTime<Utc>,
    pub scheduled_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub shortlink: String,
    pub updates: Vec<MaintenanceUpdate>,
    pub affected_components: Vec<String>,
}

/// One of the eight logical data requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Status,
    Summary,
    Components,
    Incidents,
    UnresolvedIncidents,
    ScheduledMaintenances,
    ActiveMaintenances,
    UpcomingMaintenances,
}

impl Entity {
    /// Path of the JSON endpoint relative to the API base URL.
    pub fn api_path(self) -> &'static str {
        match self {
            Entity::Status => "/status.json",
            Entity::Summary => "/summary.json",
            Entity::Components => "/components.json",
            Entity::Incidents => "/incidents.json",
            Entity::UnresolvedIncidents => "/incidents/unresolved.json",
            Entity::ScheduledMaintenances => "/scheduled-maintenances.json",
            Entity::ActiveMaintenances => "/scheduled-maintenances/active.json",
            Entity::UpcomingMaintenances => "/scheduled-maintenances/upcoming.json",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Status => "status",
            Entity::Summary => "summary",
            Entity::Components => "components",
            Entity::Incidents => "incidents",
            Entity::UnresolvedIncidents => "unresolved incidents",
            Entity::ScheduledMaintenances => "scheduled maintenances",
            Entity::ActiveMaintenances => "active maintenances",
            Entity::UpcomingMaintenances => "upcoming maintenances",
        };
        f.write_str(name)
    }
}

/// Result of a data request: the API's wire shape, or domain objects already
/// normalized by the scraper fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<R, D> {
    Raw(R),
    Normalized(D),
}

impl<R, D> Fetched<R, D> {
    pub fn is_raw(&self) -> bool {
        matches!(self, Fetched::Raw(_))
    }

    /// Collapse into the domain shape, normalizing raw payloads with `f`.
    pub fn normalize_with(self, f: impl FnOnce(R) -> D) -> D {
        match self {
            Fetched::Raw(raw) => f(raw),
            Fetched::Normalized(domain) => domain,
        }
    }
}
