//! Tool registration and dispatch.

use serde_json::Value;

use crate::context::ServerContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{
    status_get_component, status_get_components, status_get_incidents, status_get_maintenance,
    status_get_overall, status_refresh, status_search,
};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            status_get_overall::definition(),
            status_get_components::definition(),
            status_get_component::definition(),
            status_get_incidents::definition(),
            status_get_maintenance::definition(),
            status_search::definition(),
            status_refresh::definition(),
        ]
    }

    /// Run a tool. Failures from the status pipeline come back as error
    /// results; malformed arguments and unknown tools are protocol errors.
    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        ctx: &ServerContext,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        tracing::info!("Handling tool request: {name}");

        let result = match name {
            "status_get_overall" => status_get_overall::execute(args, ctx).await,
            "status_get_components" => status_get_components::execute(args, ctx).await,
            "status_get_component" => status_get_component::execute(args, ctx).await,
            "status_get_incidents" => status_get_incidents::execute(args, ctx).await,
            "status_get_maintenance" => status_get_maintenance::execute(args, ctx).await,
            "status_search" => status_search::execute(args, ctx).await,
            "status_refresh" => status_refresh::execute(args, ctx).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        };

        match result {
            Err(McpError::Status(e)) => {
                tracing::error!("Tool {name} failed: {e}");
                Ok(ToolCallResult::status_error(&e))
            }
            other => other,
        }
    }
}
