//! Tool: status_refresh. Drop cached data so the next query hits upstream.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::iso;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RefreshScope {
    Status,
    Components,
    Incidents,
    Maintenances,
    #[default]
    All,
}

#[derive(Debug, Deserialize)]
struct RefreshParams {
    #[serde(default)]
    scope: RefreshScope,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_refresh".to_string(),
        description: Some(
            "Invalidate cached status data so the next query fetches fresh data".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "scope": {
                    "type": "string",
                    "description": "Which cached data to drop (default: all)",
                    "enum": ["status", "components", "incidents", "maintenances", "all"]
                }
            },
            "required": []
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: RefreshParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let status = || usize::from(ctx.status().invalidate_cache());
    let components = || usize::from(ctx.components().invalidate_cache());

    let invalidated = match params.scope {
        RefreshScope::Status => status(),
        RefreshScope::Components => components(),
        RefreshScope::Incidents => ctx.incidents().invalidate_incidents_cache(),
        RefreshScope::Maintenances => ctx.incidents().invalidate_maintenances_cache(),
        RefreshScope::All => status() + components() + ctx.incidents().invalidate_all_caches(),
    };

    tracing::info!("Refreshed {:?} scope, {invalidated} cache entries dropped", params.scope);

    Ok(ToolCallResult::json(&json!({
        "scope": params.scope,
        "invalidated": invalidated,
        "remaining": ctx.cache().len(),
        "refreshed_at": iso(&Utc::now()),
    })))
}
