use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default host for the lectern server
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the lectern server
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawLecternConfig {
    #[serde(default)]
    pub server: RawServerSection,
}

/// Server section as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerSection {
    /// Host for the lectern server
    pub host: Option<String>,

    /// Port for the lectern server
    pub port: Option<u16>,

    /// SQLite database file
    pub db: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LecternConfig {
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Host for the lectern server
    pub host: String,

    /// Port for the lectern server
    pub port: u16,

    /// SQLite database file, unset means the platform data directory
    pub db: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = LecternConfig::default();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.server.db.is_none());
    }

    #[test]
    fn test_raw_config_accepts_partial_toml() {
        let raw: RawLecternConfig = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(raw.server.port, Some(9000));
        assert!(raw.server.host.is_none());
    }

    #[test]
    fn test_raw_config_accepts_empty_toml() {
        let raw: RawLecternConfig = toml::from_str("").unwrap();
        assert!(raw.server.port.is_none());
        assert!(raw.server.db.is_none());
    }
}
