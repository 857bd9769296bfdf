// src/main.rs
// productive-mcp - Productive.io project management over MCP

use anyhow::Result;
use clap::{Parser, Subcommand};
use productive_mcp::config::Config;
use productive_mcp::mcp::ProductiveServer;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "productive-mcp")]
#[command(about = "Productive.io project management as MCP tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as MCP server on stdio (default)
    Serve,
    /// Validate configuration and print a summary
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files: home config first, then working directory overrides
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".productive-mcp/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Stdio transport carries the protocol, so logging stays on stderr and
    // quiet unless something is wrong
    let log_level = match &cli.command {
        Some(Commands::Serve) | None => Level::WARN,
        Some(Commands::Check) => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => run_mcp_server().await?,
        Some(Commands::Check) => run_check()?,
    }

    Ok(())
}

async fn run_mcp_server() -> Result<()> {
    let config = Config::from_env()?;
    let server = ProductiveServer::new(config);

    let transport = rmcp::transport::io::stdio();
    let service = rmcp::serve_server(server, transport).await?;
    service.waiting().await?;

    Ok(())
}

fn run_check() -> Result<()> {
    let config = Config::from_env()?;
    println!("Configuration OK");
    print!("{}", config.summary());
    Ok(())
}
