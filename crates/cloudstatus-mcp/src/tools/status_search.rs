//! Tool: status_search. Keyword search across components, incidents and
//! maintenance windows.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::iso;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SearchType {
    Components,
    Incidents,
    Maintenance,
    #[default]
    All,
}

impl SearchType {
    fn includes(self, other: SearchType) -> bool {
        self == SearchType::All || self == other
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
    #[serde(default, rename = "type")]
    kind: SearchType,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "status_search".to_string(),
        description: Some(
            "Search status information by keyword or pattern across components, \
             incidents, and maintenance"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query. Matched as a case-insensitive pattern against component names and as plain text against incidents and maintenance"
                },
                "type": {
                    "type": "string",
                    "description": "Type of entity to search",
                    "enum": ["components", "incidents", "maintenance", "all"]
                }
            },
            "required": ["query"]
        }),
    }
}

pub async fn execute(args: Value, ctx: &ServerContext) -> McpResult<ToolCallResult> {
    let params: SearchParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;
    let needle = params.query.to_lowercase();
    let mentions = |text: &str| text.to_lowercase().contains(&needle);

    let mut results = Map::new();
    let mut summary = Map::new();
    let mut total = 0;

    if params.kind.includes(SearchType::Components) {
        let found: Vec<Value> = ctx
            .components()
            .search(&params.query)
            .await?
            .into_iter()
            .map(|c| json!({ "id": c.id, "name": c.name, "status": c.status, "group": c.group }))
            .collect();
        total += found.len();
        summary.insert("components".to_string(), json!(found.len()));
        results.insert("components".to_string(), Value::Array(found));
    }

    if params.kind.includes(SearchType::Incidents) {
        let found: Vec<Value> = ctx
            .incidents()
            .all_incidents()
            .await?
            .into_iter()
            .filter(|i| mentions(&i.name) || i.updates.iter().any(|u| mentions(&u.body)))
            .map(|i| json!({ "id": i.id, "name": i.name, "status": i.status, "impact": i.impact }))
            .collect();
        total += found.len();
        summary.insert("incidents".to_string(), json!(found.len()));
        results.insert("incidents".to_string(), Value::Array(found));
    }

    if params.kind.includes(SearchType::Maintenance) {
        let found: Vec<Value> = ctx
            .incidents()
            .all_maintenances()
            .await?
            .into_iter()
            .filter(|m| mentions(&m.name) || m.updates.iter().any(|u| mentions(&u.body)))
            .map(|m| {
                json!({
                    "id": m.id,
                    "name": m.name,
                    "status": m.status,
                    "scheduled_for": iso(&m.scheduled_for),
                })
            })
            .collect();
        total += found.len();
        summary.insert("maintenances".to_string(), json!(found.len()));
        results.insert("maintenances".to_string(), Value::Array(found));
    }

    summary.insert("total".to_string(), json!(total));

    Ok(ToolCallResult::json(&json!({
        "query": params.query,
        "type": params.kind,
        "results": results,
        "summary": summary,
    })))
}
