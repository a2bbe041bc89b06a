use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/api.toml";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "data/faucets.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self> {
        let configured_path = std::env::var("FAUCET_API_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let env_override = std::env::var("FAUCET_API_ENV").ok();
        let port_override = std::env::var("PORT").ok();
        Self::from_sources(
            &configured_path,
            env_override.as_deref(),
            port_override.as_deref(),
        )
    }

    fn from_sources(
        configured_path: &str,
        env_override: Option<&str>,
        port_override: Option<&str>,
    ) -> Result<Self> {
        assert!(
            !configured_path.is_empty(),
            "Configuration path must be non-empty"
        );
        assert!(
            configured_path.len() < 4096,
            "Configuration path length exceeds hard limit"
        );

        let mut builder = Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("database.path", DEFAULT_DATABASE_PATH)?
            .add_source(File::new(configured_path, FileFormat::Toml).required(false));

        if let Some(env_override) = env_override.filter(|value| !value.is_empty()) {
            let env_file = format!("config/api.{}.toml", env_override);
            if Path::new(&env_file).exists() {
                builder = builder.add_source(File::new(&env_file, FileFormat::Toml));
            }
        }

        if let Some(port) = port_override.filter(|value| !value.is_empty()) {
            let port: u16 = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?;
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        let settings = builder
            .build()
            .map_err(|err| map_config_error(err, configured_path))?;
        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize API configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than zero");
        }
        if self.database.path.trim().is_empty() {
            anyhow::bail!("Database path must be specified");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> SocketAddr {
        assert!(self.port != 0, "HTTP port cannot be zero");
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl DatabaseConfig {
    /// SQLite URL that creates the file on first open.
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }

    pub fn ensure_parent_dir(&self) -> Result<()> {
        let parent = Path::new(&self.path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }
        Ok(())
    }
}

fn map_config_error(err: ConfigError, path: &str) -> ConfigError {
    match err {
        ConfigError::NotFound(_) => ConfigError::NotFound(path.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_CONFIG: &str = "config/does-not-exist.toml";

    #[test]
    fn defaults_apply_without_config_file() {
        let config = ApiConfig::from_sources(MISSING_CONFIG, None, None).expect("defaults load");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.address().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database.path, "data/faucets.db");
        assert_eq!(config.database.url(), "sqlite://data/faucets.db?mode=rwc");
    }

    #[test]
    fn port_variable_overrides_default() {
        let config =
            ApiConfig::from_sources(MISSING_CONFIG, None, Some("8080")).expect("override loads");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn empty_port_variable_keeps_default() {
        let config = ApiConfig::from_sources(MISSING_CONFIG, None, Some("")).expect("loads");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn invalid_port_variable_is_rejected() {
        assert!(ApiConfig::from_sources(MISSING_CONFIG, None, Some("not-a-port")).is_err());
        assert!(ApiConfig::from_sources(MISSING_CONFIG, None, Some("70000")).is_err());
        assert!(ApiConfig::from_sources(MISSING_CONFIG, None, Some("0")).is_err());
    }

    #[test]
    fn bare_file_name_needs_no_parent_dir() {
        let config = DatabaseConfig {
            path: "faucets.db".to_string(),
        };
        config.ensure_parent_dir().expect("nothing to create");
    }
}
