#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod discovery;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Query the Ticketmaster Discovery API from the command line or expose it over MCP"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Path to a TOML config file (defaults to ./tmtools.toml when present)
    #[clap(long, env = "TMTOOLS_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Ticketmaster API key override (highest precedence)
    #[clap(long, global = true)]
    api_key: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "TMTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Ticketmaster Discovery (venues, events) operations
    Discovery(crate::discovery::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Discovery(sub_app) => crate::discovery::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
