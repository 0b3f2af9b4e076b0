//! Cloud status MCP server entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use cloudstatus_mcp::config::{log_filter, resolve_config};
use cloudstatus_mcp::context::ServerContext;
use cloudstatus_mcp::protocol::ProtocolHandler;
use cloudstatus_mcp::tools::ToolRegistry;
use cloudstatus_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "cloudstatus-mcp",
    about = "MCP server for cloud status pages: health, components, incidents and maintenance",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Validate configuration from the environment.
    Validate,

    /// Print server capabilities and tools as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   cloudstatus-mcp completions bash > ~/.local/share/bash-completion/completions/cloudstatus-mcp
    ///   cloudstatus-mcp completions zsh > ~/.zfunc/_cloudstatus-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = resolve_config(cli.log_level.as_deref())?;
            init_tracing(&config.log_level);

            tracing::info!("Cloud status MCP server");
            tracing::info!("API: {}", config.api.base_url);

            let context = Arc::new(ServerContext::from_config(&config)?);
            let transport = StdioTransport::new(ProtocolHandler::new(Arc::clone(&context)));

            let served = tokio::select! {
                result = transport.run() => result,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received interrupt, shutting down gracefully");
                    Ok(())
                }
            };

            if let Err(e) = context.close().await {
                tracing::error!("Error closing server context: {e}");
            }
            served?;
        }

        Commands::Validate => match resolve_config(cli.log_level.as_deref()) {
            Ok(config) => {
                println!("Configuration is valid");
                println!("  API: {}", config.api.base_url);
                println!(
                    "  Scraper: {} (fallback {})",
                    config.scraper.base_url,
                    if config.scraper.fallback_enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
                println!("  Log level: {}", config.log_level);
            }
            Err(e) => {
                eprintln!("Invalid configuration: {e}");
                std::process::exit(1);
            }
        },

        Commands::Info => {
            let init = cloudstatus_mcp::types::InitializeResult::for_server();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": init.server_info,
                "protocol_version": init.protocol_version,
                "capabilities": init.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "cloudstatus-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries the protocol.
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .init();
}
