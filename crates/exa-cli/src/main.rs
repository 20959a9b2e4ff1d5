//! Command-line entry point for the Exa MCP server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use exa_client::HttpClientFactory;
use exa_mcp::protocol::MCPToolDefinition;
use exa_mcp::{McpServer, tools};
use exa_tools::ToolRegistry;
use exa_utils::{ExaConfig, LogFormat, init_tracing};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "exa-mcp-server", version)]
#[command(about = "MCP server exposing the Exa search API as tools", long_about = None)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Exa API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// List the available tools
    Tools {
        /// Print the full tool definitions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Invoke a single tool and print its output
    Call {
        /// Tool name
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the environment
    fn apply(&self, mut config: ExaConfig) -> anyhow::Result<ExaConfig> {
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(url) = &self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(ExaConfig::from_env().context("read configuration")?)?;

    init_tracing(config.log_format);

    if !config.has_api_key() {
        warn!("EXA_API_KEY is not set; the Exa API will reject tool calls");
    }

    let clients = Arc::new(HttpClientFactory::from_config(&config));
    let registry = Arc::new(tools::default_registry(clients)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(registry, &config).await,
        Command::Tools { json } => print_tools(&registry, json),
        Command::Call { name, args } => call(&registry, &name, &args).await,
    }
}

async fn serve(registry: Arc<ToolRegistry>, config: &ExaConfig) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        "Starting exa-mcp-server"
    );

    let server = Arc::new(McpServer::new(registry));
    server
        .serve(tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("MCP server failed")
}

fn print_tools(registry: &ToolRegistry, json: bool) -> anyhow::Result<()> {
    if json {
        let definitions: Vec<MCPToolDefinition> = registry
            .list_tools()
            .iter()
            .map(|tool| MCPToolDefinition::from_tool(tool.as_ref()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Title", "Description"]);
    for tool in registry.list_tools() {
        table.add_row(vec![
            tool.name(),
            tool.title().unwrap_or_default(),
            tool.description(),
        ]);
    }
    println!("{table}");
    Ok(())
}

async fn call(registry: &ToolRegistry, name: &str, args: &str) -> anyhow::Result<()> {
    let params: Value = serde_json::from_str(args).context("--args must be valid JSON")?;
    let output = registry
        .call(name, params)
        .await
        .with_context(|| format!("tool {name} failed"))?;
    println!("{}", output.text);
    Ok(())
}
