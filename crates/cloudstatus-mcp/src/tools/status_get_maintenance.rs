//! Tool: status_get_maintenance. Scheduled, active and upcoming windows.

use serde::Deserialize;
use serde_json::{json, Value};

use cloudstatus::{Maintenance, MaintenanceStatus};

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::iso;

#[derive(Debug, Deserialize)]
struct MaintenanceParams {
    #[serde(default)]
    status: Option<MaintenanceStatus>,
    #[serde(default)]
    active_only: bool,
    #[serde(default)]
    upcoming_only: bool,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_get_maintenance".to_string(),
        description: Some(
            "Get scheduled, active, and upcoming maintenance windows for the cloud services"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "description": "Filter maintenance by status",
                    "enum": ["scheduled", "in_progress", "verifying", "completed"]
                },
                "active_only": {
                    "type": "boolean",
                    "description": "Only return active maintenance windows (default: false)"
                },
                "upcoming_only": {
                    "type": "boolean",
                    "description": "Only return upcoming maintenance windows (default: false)"
                }
            },
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: MaintenanceParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let service = ctx.incidents();
    let mut maintenances = if params.active_only {
        service.active_maintenances().await?
    } else if params.upcoming_only {
        service.upcoming_maintenances().await?
    } else {
        service.all_maintenances().await?
    };

    // The status filter narrows whichever list was selected.
    if let Some(status) = params.status {
        maintenances.retain(|m| m.status == status);
    }

    let count_status =
        |status: MaintenanceStatus| maintenances.iter().filter(|m| m.status == status).count();

    Ok(ToolCallResult::json(&json!({
        "maintenances": maintenances.iter().map(maintenance_json).collect::<Vec<_>>(),
        "summary": {
            "total": maintenances.len(),
            "active": count_status(MaintenanceStatus::InProgress),
            "upcoming": count_status(MaintenanceStatus::Scheduled),
        },
    })))
}

fn maintenance_json(maintenance: &Maintenance) -> Value {
    let latest_update = maintenance.updates.first().map(|u| {
        json!({
            "status": u.status,
            "body": u.body,
            "timestamp": iso(&u.created_at),
        })
    });

    json!({
        "id": maintenance.id,
        "name": maintenance.name,
        "status": maintenance.status,
        "impact": maintenance.impact,
        "scheduled_for": iso(&maintenance.scheduled_for),
        "scheduled_until": iso(&maintenance.scheduled_until),
        "shortlink": maintenance.shortlink,
        "affected_components": maintenance.affected_components,
        "latest_update": latest_update,
    })
}
