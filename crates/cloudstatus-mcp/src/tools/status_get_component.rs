//! Tool: status_get_component. One component by id or name.

use serde::Deserialize;
use serde_json::{json, Value};

use cloudstatus::{IndicatorLevel, StatusError};

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

#[derive(Debug, Deserialize)]
struct ComponentParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_get_component".to_string(),
        description: Some(
            "Get detailed information about a specific service component by ID or name"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "description": "Component ID" },
                "name": { "type": "string", "description": "Component name" }
            },
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: ComponentParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    // Empty strings count as absent.
    let id = params.id.filter(|s| !s.is_empty());
    let name = params.name.filter(|s| !s.is_empty());

    let component = match (id, name) {
        (Some(id), _) => ctx.components().by_id(&id).await?,
        (None, Some(name)) => ctx.components().by_name(&name).await?,
        (None, None) => {
            return Err(
                StatusError::Validation("Either id or name must be provided".to_string()).into(),
            )
        }
    };

    Ok(ToolCallResult::json(&json!({
        "id": component.id,
        "name": component.name,
        "status": component.status,
        "group": component.group,
        "description": component.description,
        "position": component.position,
        "only_show_if_degraded": component.only_show_if_degraded,
        "is_operational": component.status == IndicatorLevel::None,
    })))
}
