//! Edge case integration tests for cloudstatus-mcp.
//!
//! Every test drives `ProtocolHandler` end to end against a mock status API
//! with the browser fallback disabled.

use std::sync::Arc;

use mockito::{Mock, ServerGuard};
use serde_json::{json, Value};

use cloudstatus::Config;
use cloudstatus_mcp::context::ServerContext;
use cloudstatus_mcp::protocol::ProtocolHandler;
use cloudstatus_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

fn page() -> Value {
    json!({
        "id": "pg01",
        "name": "Cloud Services",
        "url": "https://status.example.com",
        "time_zone": "Etc/UTC",
        "updated_at": "2025-01-15T10:30:00.000Z"
    })
}

fn status_body(indicator: &str, description: &str) -> Value {
    json!({
        "page": page(),
        "status": { "indicator": indicator, "description": description }
    })
}

fn component(id: &str, name: &str, status: &str, position: i64, group_id: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "created_at": "2024-01-01T00:00:00.000Z",
        "updated_at": "2025-01-15T10:00:00.000Z",
        "position": position,
        "group_id": group_id,
        "group": false,
        "only_show_if_degraded": false
    })
}

fn components_body() -> Value {
    json!({
        "page": page(),
        "components": [
            {
                "id": "grp-edge",
                "name": "Edge Services",
                "status": "degraded_performance",
                "created_at": "2024-01-01T00:00:00.000Z",
                "updated_at": "2025-01-15T10:00:00.000Z",
                "position": 0,
                "group": true,
                "components": ["cmp-cdn", "cmp-dns"]
            },
            component("cmp-api", "API Gateway", "operational", 1, None),
            component("cmp-cdn", "CDN", "degraded_performance", 2, Some("grp-edge")),
            component("cmp-dns", "DNS", "operational", 3, Some("grp-edge")),
            component("cmp-portal", "Customer Portal", "operational", 4, Some("grp-console")),
        ]
    })
}

fn update(id: &str, status: &str, body: &str, at: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "body": body,
        "created_at": at,
        "updated_at": at,
        "display_at": at,
        "affected_components": [
            { "code": "cmp-cdn", "name": "CDN", "old_status": "operational", "new_status": "degraded_performance" }
        ]
    })
}

fn open_incident() -> Value {
    json!({
        "id": "inc-open",
        "name": "Elevated CDN latency",
        "status": "monitoring",
        "created_at": "2025-01-15T08:00:00.000Z",
        "updated_at": "2025-01-15T09:00:00.000Z",
        "resolved_at": null,
        "impact": "major",
        "shortlink": "https://stspg.io/open",
        "incident_updates": [
            update("upd-2", "monitoring", "A fix has been deployed.", "2025-01-15T09:00:00.000Z"),
            update("upd-1", "investigating", "We are investigating.", "2025-01-15T08:00:00.000Z"),
        ],
        "components": [component("cmp-cdn", "CDN", "degraded_performance", 2, Some("grp-edge"))]
    })
}

fn closed_incident() -> Value {
    json!({
        "id": "inc-closed",
        "name": "API errors",
        "status": "resolved",
        "created_at": "2025-01-10T08:00:00.000Z",
        "updated_at": "2025-01-10T10:00:00.000Z",
        "resolved_at": "2025-01-10T10:00:00.000Z",
        "impact": "minor",
        "shortlink": "https://stspg.io/closed",
        "incident_updates": [
            update("upd-3", "resolved", "Resolved.", "2025-01-10T10:00:00.000Z"),
        ],
        "components": [component("cmp-api", "API Gateway", "operational", 1, None)]
    })
}

fn maintenance(id: &str, name: &str, status: &str, from: &str, until: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "created_at": "2025-01-01T00:00:00.000Z",
        "updated_at": "2025-01-01T00:00:00.000Z",
        "impact": "maintenance",
        "shortlink": format!("https://stspg.io/{id}"),
        "incident_updates": [{
            "id": format!("{id}-upd"),
            "status": status,
            "body": format!("Scheduled work on {name}."),
            "created_at": "2025-01-01T00:00:00.000Z",
            "display_at": "2025-01-01T00:00:00.000Z"
        }],
        "components": [],
        "scheduled_for": from,
        "scheduled_until": until
    })
}

fn active_maintenance() -> Value {
    maintenance(
        "mnt-db",
        "Database upgrade",
        "in_progress",
        "2025-01-15T06:00:00.000Z",
        "2025-01-15T12:00:00.000Z",
    )
}

fn upcoming_maintenance() -> Value {
    maintenance(
        "mnt-net",
        "Network maintenance",
        "scheduled",
        "2025-02-01T06:00:00.000Z",
        "2025-02-01T08:00:00.000Z",
    )
}

/// Mock one JSON endpoint under `/api/v2`, expecting `hits` calls.
async fn mock_json(server: &mut ServerGuard, path: &str, body: &Value, hits: usize) -> Mock {
    server
        .mock("GET", format!("/api/v2{path}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(hits)
        .create_async()
        .await
}

/// Handler over a fresh context pointed at `server`, no retries, no fallback.
fn handler_for(server: &ServerGuard) -> ProtocolHandler {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api/v2", server.url());
    config.api.retry_attempts = 0;
    config.api.retry_delay_ms = 0;
    config.api.timeout_ms = 5_000;
    config.scraper.fallback_enabled = false;

    let context = ServerContext::from_config(&config).expect("context");
    ProtocolHandler::new(Arc::new(context))
}

fn mcp_request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn init_request() -> Value {
    mcp_request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }),
    )
}

async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

/// Call a tool and return the raw JSON-RPC response.
async fn call_tool(handler: &ProtocolHandler, name: &str, arguments: Value) -> Value {
    send_unwrap(
        handler,
        mcp_request(1, "tools/call", json!({ "name": name, "arguments": arguments })),
    )
    .await
}

/// Parse the text content of a successful or failed tool result.
fn tool_body(resp: &Value) -> Value {
    let text = resp["result"]["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("no text content in {resp}"));
    serde_json::from_str(text).unwrap()
}

fn is_tool_error(resp: &Value) -> bool {
    resp["result"]["isError"] == json!(true)
}

// ═══════════════════════════════════════════════════════
// PROTOCOL
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_initialize_advertises_tools_only() {
    let server = mockito::Server::new_async().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, init_request()).await;
    let result = &resp["result"];
    assert_eq!(result["protocolVersion"], MCP_VERSION);
    assert_eq!(result["serverInfo"]["name"], "cloudstatus-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"].get("resources").is_none());

    assert!(!handler.is_initialized().await);
    let notif = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
    assert!(send(&handler, notif).await.is_none());
    assert!(handler.is_initialized().await);
}

#[tokio::test]
async fn test_future_protocol_version_gets_server_version() {
    let server = mockito::Server::new_async().await;
    let handler = handler_for(&server);

    let msg = mcp_request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2099-01-01",
            "capabilities": {},
            "clientInfo": { "name": "future-client", "version": "99.0" }
        }),
    );
    let resp = send_unwrap(&handler, msg).await;
    assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_protocol_errors() {
    let server = mockito::Server::new_async().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, mcp_request(1, "resources/list", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32601);

    let bad_version = json!({ "jsonrpc": "1.0", "id": 2, "method": "ping" });
    let resp = send_unwrap(&handler, bad_version).await;
    assert_eq!(resp["error"]["code"], -32600);

    let no_params = json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call" });
    let resp = send_unwrap(&handler, no_params).await;
    assert_eq!(resp["error"]["code"], -32602);

    let resp = call_tool(&handler, "status_get_weather", json!({})).await;
    assert_eq!(resp["error"]["code"], -32803);

    let resp = send_unwrap(&handler, mcp_request(4, "ping", json!({}))).await;
    assert_eq!(resp["result"], json!({}));
}

#[tokio::test]
async fn test_tools_list() {
    let server = mockito::Server::new_async().await;
    let handler = handler_for(&server);

    let resp = send_unwrap(&handler, mcp_request(1, "tools/list", json!({}))).await;
    let names: Vec<&str> = resp["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "status_get_overall",
            "status_get_components",
            "status_get_component",
            "status_get_incidents",
            "status_get_maintenance",
            "status_search",
            "status_refresh",
        ]
    );
}

// ═══════════════════════════════════════════════════════
// STATUS AND COMPONENTS
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_overall_status_is_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_json(
        &mut server,
        "/status.json",
        &status_body("minor", "Minor Service Outage"),
        1,
    )
    .await;
    let handler = handler_for(&server);

    let first = tool_body(&call_tool(&handler, "status_get_overall", json!({})).await);
    assert_eq!(first["status"], "degraded_performance");
    assert_eq!(first["indicator"], "minor");
    assert_eq!(first["description"], "Minor Service Outage");
    assert_eq!(first["last_updated"], "2025-01-15T10:30:00.000Z");
    assert_eq!(first["is_operational"], false);

    let second = tool_body(&call_tool(&handler, "status_get_overall", json!({})).await);
    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_failure_becomes_tool_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/status.json")
        .with_status(503)
        .with_body("maintenance")
        .expect(1)
        .create_async()
        .await;
    let handler = handler_for(&server);

    let resp = call_tool(&handler, "status_get_overall", json!({})).await;
    assert!(resp.get("error").is_none(), "should not be a protocol error: {resp}");
    assert!(is_tool_error(&resp));

    let body = tool_body(&resp);
    assert_eq!(body["code"], "DATA_UNAVAILABLE");
    assert_eq!(body["details"]["entity"], "status");
    assert_eq!(body["details"]["cause"]["code"], "HTTP_ERROR");
    assert_eq!(body["details"]["cause"]["details"]["status"], 503);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_components_summary_and_filters() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_json(&mut server, "/components.json", &components_body(), 1).await;
    let handler = handler_for(&server);

    let all = tool_body(&call_tool(&handler, "status_get_components", json!({})).await);
    assert_eq!(all["components"].as_array().unwrap().len(), 4);
    assert_eq!(all["summary"], json!({ "total": 4, "operational": 3, "degraded": 1 }));
    let groups = all["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1], json!({ "name": "Edge Services", "component_count": 2 }));

    let minor = tool_body(
        &call_tool(&handler, "status_get_components", json!({ "status": "minor" })).await,
    );
    assert_eq!(minor["components"][0]["id"], "cmp-cdn");
    assert_eq!(minor["summary"]["total"], 1);

    let edge = tool_body(
        &call_tool(
            &handler,
            "status_get_components",
            json!({ "group": "Edge Services" }),
        )
        .await,
    );
    assert_eq!(edge["summary"]["total"], 2);

    let resp = call_tool(&handler, "status_get_components", json!({ "status": "purple" })).await;
    assert_eq!(resp["error"]["code"], -32602);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_single_component_lookup() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "/components.json", &components_body(), 1).await;
    let handler = handler_for(&server);

    let cdn = tool_body(&call_tool(&handler, "status_get_component", json!({ "name": "cdn" })).await);
    assert_eq!(cdn["id"], "cmp-cdn");
    assert_eq!(cdn["group"], "Edge Services");
    assert_eq!(cdn["is_operational"], false);

    let missing = call_tool(&handler, "status_get_component", json!({ "id": "cmp-x" })).await;
    assert!(is_tool_error(&missing));
    assert_eq!(tool_body(&missing)["code"], "NOT_FOUND");

    let neither = call_tool(&handler, "status_get_component", json!({})).await;
    assert!(is_tool_error(&neither));
    assert_eq!(tool_body(&neither)["code"], "VALIDATION_ERROR");
}

// ═══════════════════════════════════════════════════════
// INCIDENTS AND MAINTENANCE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_incidents_summary_and_latest_update() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({ "page": page(), "incidents": [open_incident(), closed_incident()] });
    mock_json(&mut server, "/incidents.json", &body, 1).await;
    let handler = handler_for(&server);

    let all = tool_body(&call_tool(&handler, "status_get_incidents", json!({})).await);
    assert_eq!(
        all["summary"],
        json!({ "total": 2, "unresolved": 1, "critical": 0, "major": 1 })
    );
    let open = &all["incidents"][0];
    assert_eq!(open["latest_update"]["body"], "A fix has been deployed.");
    assert_eq!(open["latest_update"]["timestamp"], "2025-01-15T09:00:00.000Z");
    assert_eq!(open["affected_components"], json!(["cmp-cdn"]));
    assert!(open["resolved_at"].is_null());

    let resolved = tool_body(
        &call_tool(&handler, "status_get_incidents", json!({ "status": "resolved" })).await,
    );
    assert_eq!(resolved["incidents"][0]["id"], "inc-closed");
    assert_eq!(resolved["incidents"][0]["resolved_at"], "2025-01-10T10:00:00.000Z");
}

#[tokio::test]
async fn test_unresolved_only_takes_precedence() {
    let mut server = mockito::Server::new_async().await;
    let unresolved = json!({ "page": page(), "incidents": [open_incident()] });
    let unresolved_mock =
        mock_json(&mut server, "/incidents/unresolved.json", &unresolved, 1).await;
    let all_mock = server
        .mock("GET", "/api/v2/incidents.json")
        .expect(0)
        .create_async()
        .await;
    let handler = handler_for(&server);

    let body = tool_body(
        &call_tool(
            &handler,
            "status_get_incidents",
            json!({ "unresolved_only": true, "status": "resolved", "impact": "minor" }),
        )
        .await,
    );
    assert_eq!(body["summary"]["total"], 1);
    assert_eq!(body["incidents"][0]["id"], "inc-open");

    unresolved_mock.assert_async().await;
    all_mock.assert_async().await;
}

#[tokio::test]
async fn test_days_out_of_range_is_invalid_params() {
    let server = mockito::Server::new_async().await;
    let handler = handler_for(&server);

    for days in [0, 91] {
        let resp = call_tool(&handler, "status_get_incidents", json!({ "days": days })).await;
        assert_eq!(resp["error"]["code"], -32602, "days={days}");
    }
    let resp = call_tool(&handler, "status_get_incidents", json!({ "days": "week" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_maintenance_views() {
    let mut server = mockito::Server::new_async().await;
    let all = json!({
        "page": page(),
        "scheduled_maintenances": [active_maintenance(), upcoming_maintenance()]
    });
    let active = json!({ "page": page(), "scheduled_maintenances": [active_maintenance()] });
    mock_json(&mut server, "/scheduled-maintenances.json", &all, 1).await;
    mock_json(&mut server, "/scheduled-maintenances/active.json", &active, 1).await;
    let handler = handler_for(&server);

    let everything = tool_body(&call_tool(&handler, "status_get_maintenance", json!({})).await);
    assert_eq!(
        everything["summary"],
        json!({ "total": 2, "active": 1, "upcoming": 1 })
    );
    assert_eq!(everything["maintenances"][0]["impact"], "none");
    assert_eq!(
        everything["maintenances"][1]["scheduled_for"],
        "2025-02-01T06:00:00.000Z"
    );

    let scheduled = tool_body(
        &call_tool(&handler, "status_get_maintenance", json!({ "status": "scheduled" })).await,
    );
    assert_eq!(scheduled["summary"]["total"], 1);
    assert_eq!(scheduled["maintenances"][0]["id"], "mnt-net");

    let in_progress = tool_body(
        &call_tool(&handler, "status_get_maintenance", json!({ "active_only": true })).await,
    );
    assert_eq!(in_progress["maintenances"][0]["id"], "mnt-db");
    assert_eq!(
        in_progress["maintenances"][0]["latest_update"]["body"],
        "Scheduled work on Database upgrade."
    );
}

// ═══════════════════════════════════════════════════════
// SEARCH AND REFRESH
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_search_across_everything() {
    let mut server = mockito::Server::new_async().await;
    let incidents = json!({ "page": page(), "incidents": [open_incident(), closed_incident()] });
    let maintenances = json!({
        "page": page(),
        "scheduled_maintenances": [active_maintenance(), upcoming_maintenance()]
    });
    mock_json(&mut server, "/components.json", &components_body(), 1).await;
    mock_json(&mut server, "/incidents.json", &incidents, 1).await;
    mock_json(&mut server, "/scheduled-maintenances.json", &maintenances, 1).await;
    let handler = handler_for(&server);

    let body = tool_body(&call_tool(&handler, "status_search", json!({ "query": "cdn" })).await);
    assert_eq!(body["type"], "all");
    assert_eq!(body["results"]["components"][0]["name"], "CDN");
    assert_eq!(body["results"]["incidents"][0]["id"], "inc-open");
    assert_eq!(
        body["summary"],
        json!({ "components": 1, "incidents": 1, "maintenances": 0, "total": 2 })
    );

    let work = tool_body(
        &call_tool(
            &handler,
            "status_search",
            json!({ "query": "SCHEDULED WORK", "type": "maintenance" }),
        )
        .await,
    );
    assert!(work["results"].get("components").is_none());
    assert_eq!(work["summary"]["total"], 2);
}

#[tokio::test]
async fn test_search_rejects_bad_input() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "/components.json", &components_body(), 1).await;
    let handler = handler_for(&server);

    let resp = call_tool(&handler, "status_search", json!({ "type": "all" })).await;
    assert_eq!(resp["error"]["code"], -32602);

    let resp = call_tool(&handler, "status_search", json!({ "query": "x", "type": "people" })).await;
    assert_eq!(resp["error"]["code"], -32602);

    let resp = call_tool(
        &handler,
        "status_search",
        json!({ "query": "([", "type": "components" }),
    )
    .await;
    assert!(is_tool_error(&resp));
    assert_eq!(tool_body(&resp)["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_forces_refetch() {
    let mut server = mockito::Server::new_async().await;
    let status_mock =
        mock_json(&mut server, "/status.json", &status_body("none", "All Systems Operational"), 2)
            .await;
    let components_mock = mock_json(&mut server, "/components.json", &components_body(), 1).await;
    let handler = handler_for(&server);

    call_tool(&handler, "status_get_overall", json!({})).await;
    call_tool(&handler, "status_get_components", json!({})).await;
    assert_eq!(handler.context().cache().len(), 2);

    let refreshed = tool_body(&call_tool(&handler, "status_refresh", json!({ "scope": "status" })).await);
    assert_eq!(refreshed["scope"], "status");
    assert_eq!(refreshed["invalidated"], 1);
    assert_eq!(refreshed["remaining"], 1);

    let again = tool_body(&call_tool(&handler, "status_get_overall", json!({})).await);
    assert_eq!(again["is_operational"], true);
    call_tool(&handler, "status_get_components", json!({})).await;

    status_mock.assert_async().await;
    components_mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_all_drops_every_entry() {
    let mut server = mockito::Server::new_async().await;
    let incidents = json!({ "page": page(), "incidents": [open_incident()] });
    mock_json(&mut server, "/status.json", &status_body("none", "All Systems Operational"), 1).await;
    mock_json(&mut server, "/incidents.json", &incidents, 1).await;
    mock_json(&mut server, "/incidents/unresolved.json", &incidents, 1).await;
    let handler = handler_for(&server);

    call_tool(&handler, "status_get_overall", json!({})).await;
    call_tool(&handler, "status_get_incidents", json!({})).await;
    call_tool(&handler, "status_get_incidents", json!({ "unresolved_only": true })).await;

    let refreshed = tool_body(&call_tool(&handler, "status_refresh", json!({})).await);
    assert_eq!(refreshed["scope"], "all");
    assert_eq!(refreshed["invalidated"], 3);
    assert!(handler.context().cache().is_empty());

    let resp = call_tool(&handler, "status_refresh", json!({ "scope": "everything" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

// ═══════════════════════════════════════════════════════
// LIFECYCLE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_shutdown_clears_cache() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "/status.json", &status_body("none", "All Systems Operational"), 1).await;
    let handler = handler_for(&server);

    send_unwrap(&handler, init_request()).await;
    call_tool(&handler, "status_get_overall", json!({})).await;
    assert!(!handler.context().cache().is_empty());

    let resp = send_unwrap(&handler, mcp_request(9, "shutdown", Value::Null)).await;
    assert_eq!(resp["result"], json!({}));
    assert!(handler.context().cache().is_empty());
    assert!(!handler.context().is_sweeping());
}

#[tokio::test]
async fn test_concurrent_tool_calls() {
    let mut server = mockito::Server::new_async().await;
    mock_json(&mut server, "/components.json", &components_body(), 1).await;
    let handler = Arc::new(handler_for(&server));

    // Warm the cache so the parallel calls below are all hits.
    call_tool(&handler, "status_get_components", json!({})).await;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let handler = Arc::clone(&handler);
        tasks.push(tokio::spawn(async move {
            let args = if i % 2 == 0 {
                json!({ "name": "dns" })
            } else {
                json!({ "id": "cmp-api" })
            };
            call_tool(&handler, "status_get_component", args).await
        }));
    }

    for task in tasks {
        let resp = task.await.unwrap();
        assert!(!is_tool_error(&resp), "{resp}");
        assert_eq!(tool_body(&resp)["is_operational"], true);
    }
}

#[tokio::test]
async fn test_requests_ask_for_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/status.json")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(status_body("critical", "Major Service Outage").to_string())
        .create_async()
        .await;
    let handler = handler_for(&server);

    let body = tool_body(&call_tool(&handler, "status_get_overall", json!({})).await);
    assert_eq!(body["status"], "major_outage");
    mock.assert_async().await;
}
