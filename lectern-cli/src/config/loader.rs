use std::path::PathBuf;

use anyhow::Result;

use super::types::{LecternConfig, RawLecternConfig, RawServerSection, ServerSection};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<LecternConfig> {
        let mut raw = RawLecternConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path()
            && user_path.exists()
        {
            let contents = std::fs::read_to_string(&user_path)?;
            let user_config: RawLecternConfig = toml::from_str(&contents)?;
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            let contents = std::fs::read_to_string(&project_path)?;
            let project_config: RawLecternConfig = toml::from_str(&contents)?;
            raw = Self::merge_raw(raw, project_config);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lectern").join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with LECTERN_PROJECT_CONFIG_DIR env var (useful for isolated e2e tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("LECTERN_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".lectern/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawLecternConfig, overlay: RawLecternConfig) -> RawLecternConfig {
        RawLecternConfig {
            server: RawServerSection {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                db: overlay.server.db.or(base.server.db),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawLecternConfig) -> LecternConfig {
        let defaults = ServerSection::default();
        LecternConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or(defaults.host),
                port: raw.server.port.unwrap_or(defaults.port),
                db: raw.server.db,
            },
        }
    }
}

/// Default SQLite database location under the platform data directory
pub fn default_db_path() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine data directory"))?
        .join("lectern");

    std::fs::create_dir_all(&dir)?;

    Ok(dir.join("lectern.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_HOST, DEFAULT_PORT};

    #[test]
    fn test_finalize_applies_defaults() {
        let config = ConfigLoader::finalize(RawLecternConfig::default());
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.server.db.is_none());
    }

    #[test]
    fn test_finalize_keeps_explicit_values() {
        let raw: RawLecternConfig =
            toml::from_str("[server]\nhost = \"127.0.0.1\"\nport = 9000\ndb = \"test.db\"\n")
                .unwrap();
        let config = ConfigLoader::finalize(raw);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.db, Some(PathBuf::from("test.db")));
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base: RawLecternConfig =
            toml::from_str("[server]\nhost = \"0.0.0.0\"\nport = 8080\n").unwrap();
        let overlay: RawLecternConfig = toml::from_str("[server]\nport = 9000\n").unwrap();

        let merged = ConfigLoader::merge_raw(base, overlay);
        assert_eq!(merged.server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(merged.server.port, Some(9000));
    }
}
