//! Per-connection handshake state.

use crate::types::{Implementation, InitializeParams, InitializeResult, MCP_VERSION};

/// Who is connected and whether the handshake finished.
#[derive(Debug, Default)]
pub struct ClientSession {
    client: Option<Implementation>,
    requested_version: Option<String>,
    initialized: bool,
}

impl ClientSession {
    /// Record the client and answer with this server's version. A client
    /// asking for another version is still served, at ours.
    pub fn negotiate(&mut self, params: InitializeParams) -> InitializeResult {
        if params.protocol_version != MCP_VERSION {
            tracing::warn!(
                "Client asked for protocol {}, answering with {MCP_VERSION}",
                params.protocol_version
            );
        }

        match &params.client_info {
            Some(client) => tracing::info!("Client connected: {} v{}", client.name, client.version),
            None => tracing::info!("Client connected without clientInfo"),
        }

        self.client = params.client_info;
        self.requested_version = Some(params.protocol_version);
        InitializeResult::for_server()
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
        tracing::info!("MCP handshake complete");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn client(&self) -> Option<&Implementation> {
        self.client.as_ref()
    }

    pub fn requested_version(&self) -> Option<&str> {
        self.requested_version.as_deref()
    }
}
