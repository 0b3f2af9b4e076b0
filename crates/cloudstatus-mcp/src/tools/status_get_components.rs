//! Tool: status_get_components. All components, optionally filtered.

use serde::Deserialize;
use serde_json::{json, Value};

use cloudstatus::IndicatorLevel;

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ComponentsParams {
    #[serde(default)]
    status: Option<IndicatorLevel>,
    #[serde(default)]
    group: Option<String>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_get_components".to_string(),
        description: Some(
            "Get all service components with their current operational status, \
             organized by group"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "description": "Filter components by status",
                    "enum": ["none", "minor", "major", "critical"]
                },
                "group": {
                    "type": "string",
                    "description": "Filter components by group name"
                }
            },
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: ComponentsParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let service = ctx.components();
    let components = match (params.status, params.group.as_deref()) {
        (Some(status), _) => service.by_status(status).await?,
        (None, Some(group)) => service.by_group(group).await?,
        (None, None) => service.all_components().await?,
    };
    let groups = service.groups().await?;

    let operational = components
        .iter()
        .filter(|c| c.status == IndicatorLevel::None)
        .count();

    Ok(ToolCallResult::json(&json!({
        "components": components
            .iter()
            .map(|c| json!({
                "id": c.id,
                "name": c.name,
                "status": c.status,
                "group": c.group,
                "description": c.description,
            }))
            .collect::<Vec<_>>(),
        "groups": groups
            .iter()
            .map(|g| json!({
                "name": g.name,
                "component_count": g.components.len(),
            }))
            .collect::<Vec<_>>(),
        "summary": {
            "total": components.len(),
            "operational": operational,
            "degraded": components.len() - operational,
        },
    })))
}
