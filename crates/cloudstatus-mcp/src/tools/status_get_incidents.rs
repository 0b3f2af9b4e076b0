//! Tool: status_get_incidents. Current and recent incidents.

use std::ops::RangeInclusive;

use serde::Deserialize;
use serde_json::{json, Value};

use cloudstatus::{Incident, IncidentImpact, IncidentStatus, IndicatorLevel};

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::iso;

const DAYS_RANGE: RangeInclusive<u32> = 1..=90;

#[derive(Debug, Deserialize)]
struct IncidentsParams {
    #[serde(default)]
    status: Option<IncidentStatus>,
    #[serde(default)]
    impact: Option<IncidentImpact>,
    #[serde(default)]
    days: Option<u32>,
    #[serde(default)]
    unresolved_only: bool,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_get_incidents".to_string(),
        description: Some(
            "Get current and recent incidents affecting the cloud services, including \
             status updates and affected components"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "description": "Filter incidents by status",
                    "enum": ["investigating", "identified", "monitoring", "resolved", "postmortem"]
                },
                "impact": {
                    "type": "string",
                    "description": "Filter incidents by impact level",
                    "enum": ["none", "minor", "major", "critical"]
                },
                "days": {
                    "type": "integer",
                    "description": "Only incidents created in the last N days",
                    "minimum": DAYS_RANGE.start(),
                    "maximum": DAYS_RANGE.end()
                },
                "unresolved_only": {
                    "type": "boolean",
                    "description": "Only return unresolved incidents (default: false)"
                }
            },
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: IncidentsParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if let Some(days) = params.days {
        if !DAYS_RANGE.contains(&days) {
            return Err(McpError::InvalidParams(format!(
                "days must be between {} and {}, got {days}",
                DAYS_RANGE.start(),
                DAYS_RANGE.end()
            )));
        }
    }

    let service = ctx.incidents();
    let incidents = if params.unresolved_only {
        service.unresolved_incidents().await?
    } else if let Some(status) = params.status {
        service.by_status(status).await?
    } else if let Some(impact) = params.impact {
        service.by_impact(impact).await?
    } else if let Some(days) = params.days {
        service.recent(days).await?
    } else {
        service.all_incidents().await?
    };

    let count_impact =
        |level: IndicatorLevel| incidents.iter().filter(|i| i.impact == level).count();

    Ok(ToolCallResult::json(&json!({
        "incidents": incidents.iter().map(incident_json).collect::<Vec<_>>(),
        "summary": {
            "total": incidents.len(),
            "unresolved": incidents
                .iter()
                .filter(|i| i.status != IncidentStatus::Resolved)
                .count(),
            "critical": count_impact(IndicatorLevel::Critical),
            "major": count_impact(IndicatorLevel::Major),
        },
    })))
}

fn incident_json(incident: &Incident) -> Value {
    let latest_update = incident.updates.first().map(|u| {
        json!({
            "status": u.status,
            "body": u.body,
            "timestamp": iso(&u.created_at),
        })
    });

    json!({
        "id": incident.id,
        "name": incident.name,
        "status": incident.status,
        "impact": incident.impact,
        "created_at": iso(&incident.created_at),
        "updated_at": iso(&incident.updated_at),
        "resolved_at": incident.resolved_at.as_ref().map(iso),
        "shortlink": incident.shortlink,
        "affected_components": incident.affected_components,
        "latest_update": latest_update,
    })
}
