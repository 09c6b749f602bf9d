//! Serve command for running the lectern server
//!
//! The server provides the HTTP API for enrollments, learner summaries,
//! quizzes, and the course catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use lectern_server::{LecternServer, ServerConfig};

use crate::config::{ConfigLoader, default_db_path};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database file backing the server
    #[arg(long, conflicts_with = "memory")]
    pub db: Option<PathBuf>,

    /// Keep all state in memory, nothing is persisted
    #[arg(long)]
    pub memory: bool,
}

/// Run the serve command.
///
/// Flags override the config file, which overrides built-in defaults.
pub async fn run(args: ServeArgs) -> Result<()> {
    let file = ConfigLoader::load()?;

    let host = args.host.unwrap_or(file.server.host);
    let port = args.port.unwrap_or(file.server.port);
    let config = ServerConfig::new(host, port);

    let server = if args.memory {
        info!("Starting lectern server on {} with in-memory state", config.addr());
        LecternServer::new(config)
    } else {
        let db = match args.db.or(file.server.db) {
            Some(path) => path,
            None => default_db_path()?,
        };
        info!(
            "Starting lectern server on {} with database {}",
            config.addr(),
            db.display()
        );
        LecternServer::with_sqlite(config, &db)?
    };

    server.run().await.map_err(Into::into)
}
