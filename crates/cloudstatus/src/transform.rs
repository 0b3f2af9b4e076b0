//! Conversion from wire payloads to domain objects.

use std::collections::HashMap;

use crate::types::{
    Component, Fetched, Incident, IncidentUpdate, IndicatorLevel, Maintenance, MaintenanceUpdate,
    OverallStatus,
};
use crate::wire::{
    RawAffectedComponent, RawComponent, RawComponentStatus, RawComponentsResponse, RawIncident,
    RawIncidentsResponse, RawMaintenance, RawMaintenancesResponse, RawStatusResponse,
};

/// Component status on the wire to indicator level.
pub fn indicator_for(status: RawComponentStatus) -> IndicatorLevel {
    match status {
        RawComponentStatus::Operational => IndicatorLevel::None,
        RawComponentStatus::DegradedPerformance => IndicatorLevel::Minor,
        RawComponentStatus::PartialOutage => IndicatorLevel::Major,
        RawComponentStatus::MajorOutage => IndicatorLevel::Critical,
        RawComponentStatus::UnderMaintenance | RawComponentStatus::Unknown => {
            IndicatorLevel::None
        }
    }
}

pub fn transform_status(fetched: Fetched<RawStatusResponse, OverallStatus>) -> OverallStatus {
    fetched.normalize_with(|raw| OverallStatus {
        status: raw.status.indicator.status_level(),
        indicator: raw.status.indicator,
        description: raw.status.description,
        last_updated: raw.page.updated_at,
    })
}

/// Leaf components only. Each component's group is the group entry's name
/// when the payload lists it, otherwise the bare group id.
pub fn transform_components(
    fetched: Fetched<RawComponentsResponse, Vec<Component>>,
) -> Vec<Component> {
    fetched.normalize_with(|raw| {
        let group_names: HashMap<String, String> = raw
            .components
            .iter()
            .filter(|c| c.group)
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect();

        raw.components
            .into_iter()
            .filter(|c| !c.group)
            .map(|c| transform_component(c, &group_names))
            .collect()
    })
}

fn transform_component(raw: RawComponent, group_names: &HashMap<String, String>) -> Component {
    let group = raw
        .group_id
        .map(|id| group_names.get(&id).cloned().unwrap_or(id));

    Component {
        id: raw.id,
        name: raw.name,
        status: indicator_for(raw.status),
        description: raw.description.filter(|d| !d.is_empty()),
        group,
        position: raw.position,
        only_show_if_degraded: raw.only_show_if_degraded,
    }
}

pub fn transform_incidents(
    fetched: Fetched<RawIncidentsResponse, Vec<Incident>>,
) -> Vec<Incident> {
    fetched.normalize_with(|raw| raw.incidents.into_iter().map(transform_incident).collect())
}

pub fn transform_incident(raw: RawIncident) -> Incident {
    Incident {
        id: raw.id,
        name: raw.name,
        status: raw.status,
        impact: raw.impact,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        resolved_at: raw.resolved_at,
        shortlink: raw.shortlink,
        updates: raw
            .incident_updates
            .into_iter()
            .map(|u| IncidentUpdate {
                id: u.id,
                status: u.status,
                body: u.body,
                created_at: u.created_at,
                display_at: u.display_at,
                affected_components: component_codes(u.affected_components),
            })
            .collect(),
        affected_components: raw.components.into_iter().map(|c| c.id).collect(),
    }
}

pub fn transform_maintenances(raw: RawMaintenancesResponse) -> Vec<Maintenance> {
    raw.scheduled_maintenances
        .into_iter()
        .map(transform_maintenance)
        .collect()
}

pub fn transform_maintenance(raw: RawMaintenance) -> Maintenance {
    Maintenance {
        id: raw.id,
        name: raw.name,
        status: raw.status,
        impact: raw.impact,
        scheduled_for: raw.scheduled_for,
        scheduled_until: raw.scheduled_until,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        shortlink: raw.shortlink,
        updates: raw
            .incident_updates
            .into_iter()
            .map(|u| MaintenanceUpdate {
                id: u.id,
                status: u.status,
                body: u.body,
                created_at: u.created_at,
                display_at: u.display_at,
                affected_components: component_codes(u.affected_components),
            })
            .collect(),
        affected_components: raw.components.into_iter().map(|c| c.id).collect(),
    }
}

fn component_codes(affected: Option<Vec<RawAffectedComponent>>) -> Vec<String> {
    affected
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.code)
        .collect()
}
