//! HTTP server command
//!
//! Flags and their env bindings override whatever `~/.rosterd/config.toml`
//! says; the file in turn overrides built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rosterd_core::config::RosterConfig;
use rosterd_server::ServerConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ROSTERD_BIND")]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p', env = "ROSTERD_PORT")]
    pub port: Option<u16>,

    /// SQLite database file
    #[arg(long, env = "ROSTERD_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Directory for uploaded documents
    #[arg(long, env = "ROSTERD_UPLOADS_DIR")]
    pub uploads_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file_config = RosterConfig::load().context("Failed to load configuration")?;

    let config = ServerConfig {
        bind: args.bind.unwrap_or(file_config.server.bind),
        port: args.port.unwrap_or(file_config.server.port),
        db_path: args.db_path.unwrap_or(file_config.database.path),
        uploads_dir: args.uploads_dir.unwrap_or(file_config.uploads_dir),
        timeout_secs: args.timeout,
    };

    tracing::info!(
        db = %config.db_path.display(),
        "Starting rosterd server on {}:{}",
        config.bind,
        config.port
    );

    rosterd_server::serve(config).await.context("Server error")
}
