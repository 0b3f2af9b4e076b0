//! MCP tool implementations.

pub mod registry;
pub mod status_get_component;
pub mod status_get_components;
pub mod status_get_incidents;
pub mod status_get_maintenance;
pub mod status_get_overall;
pub mod status_refresh;
pub mod status_search;

pub use registry::ToolRegistry;

use chrono::{DateTime, SecondsFormat, Utc};

/// Millisecond-precision UTC timestamp, e.g. `2025-01-10T08:00:00.000Z`.
pub(crate) fn iso(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
