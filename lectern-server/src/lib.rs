//! lectern-server - HTTP API server for the lectern enrollment engine
//!
//! This crate provides the server infrastructure that owns the
//! EnrollmentManager and the course catalog. Handlers are thin adapters
//! from HTTP requests to lectern-core operations.

mod error;
pub mod http;
mod state;

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

/// The main lectern server
pub struct LecternServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl LecternServer {
    /// Create a new server with in-memory state
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new()),
        }
    }

    /// Create a new server persisting to a SQLite database at `path`
    pub fn with_sqlite<P: AsRef<Path>>(config: ServerConfig, path: P) -> Result<Self, ServerError> {
        Ok(Self {
            config,
            state: Arc::new(AppState::with_sqlite(path)?),
        })
    }

    /// Create a server with custom state (for testing)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the shared application state
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;

        tracing::info!("lectern server listening on {}", addr);

        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with the specified host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the socket address string (e.g., "0.0.0.0:8080")
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
