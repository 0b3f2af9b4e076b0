//! Tool: status_get_overall. Current overall health of the page.

use serde::Deserialize;
use serde_json::{json, Value};

use cloudstatus::StatusLevel;

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::iso;

#[derive(Debug, Deserialize)]
struct OverallParams {}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_get_overall".to_string(),
        description: Some(
            "Get the current overall status of the cloud services, including the \
             operational state and service health indicator"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {},
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let _: OverallParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let status = ctx.status().overall_status().await?;

    Ok(ToolCallResult::json(&json!({
        "status": status.status,
        "indicator": status.indicator,
        "description": status.description,
        "last_updated": iso(&status.last_updated),
        "is_operational": status.status == StatusLevel::Operational,
    })))
}
