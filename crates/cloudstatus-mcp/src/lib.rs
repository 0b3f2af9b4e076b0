//! Cloud status MCP server: status-page health, components, incidents and
//! maintenance exposed as MCP tools over stdio.

pub mod config;
pub mod context;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::resolve_config;
pub use context::ServerContext;
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
