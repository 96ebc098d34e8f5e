//! Server configuration
//!
//! Layered in this order, later sources winning:
//! 1. built-in defaults
//! 2. optional `healthgen.toml` (or the file named by `HEALTHGEN_CONFIG`)
//! 3. `HEALTHGEN__*` environment variables, e.g. `HEALTHGEN__SERVER__PORT=9090`
//!
//! A `.env` file is loaded into the environment first when present.

use healthgen_codegen::Limits;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const DEFAULT_CONFIG_FILE: &str = "healthgen.toml";
const ENV_PREFIX: &str = "HEALTHGEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub codegen: CodegenConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty disables CORS headers
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`
    pub file_rotation: String,
    pub service_name: String,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "./logs".to_string(),
            file_prefix: "healthgen".to_string(),
            file_rotation: "daily".to_string(),
            service_name: "healthgen-server".to_string(),
            deployment_environment: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    pub max_entities: usize,
    pub max_relationships: usize,
    pub max_attributes: usize,
    /// Upper bound for one generation run
    pub deadline_seconds: u64,
    /// Prefix of ephemeral workspace directories
    pub workspace_prefix: String,
    pub generate_docs: bool,
    pub project_files: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            max_entities: limits.max_entities,
            max_relationships: limits.max_relationships,
            max_attributes: limits.max_attributes,
            deadline_seconds: 30,
            workspace_prefix: "healthgen-".to_string(),
            generate_docs: true,
            project_files: true,
        }
    }
}

impl CodegenConfig {
    pub fn limits(&self) -> Limits {
        Limits {
            max_entities: self.max_entities,
            max_relationships: self.max_relationships,
            max_attributes: self.max_attributes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; the in-memory spec store is used when unset
    pub url: Option<String>,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_min_size: 0,
            pool_max_size: 10,
            pool_timeout_seconds: 30,
            run_migrations: true,
        }
    }
}

impl Config {
    /// Load configuration from defaults, the optional config file and the environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let file = std::env::var("HEALTHGEN_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be greater than 0".to_string());
        }
        if self.codegen.deadline_seconds == 0 {
            return Err("codegen.deadline_seconds must be greater than 0".to_string());
        }
        if self.codegen.max_entities == 0
            || self.codegen.max_relationships == 0
            || self.codegen.max_attributes == 0
        {
            return Err("codegen limits must be greater than 0".to_string());
        }
        if self.database.pool_max_size < self.database.pool_min_size {
            return Err("database.pool_max_size must be >= database.pool_min_size".to_string());
        }
        match self.logging.file_rotation.as_str() {
            "daily" | "hourly" | "minutely" | "never" => {}
            other => return Err(format!("unknown logging.file_rotation '{other}'")),
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address {addr}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        assert_eq!(config.codegen.limits().max_relationships, 500);
    }

    #[test]
    fn rejects_unknown_rotation() {
        let mut config = Config::default();
        config.logging.file_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_deadline() {
        let mut config = Config::default();
        config.codegen.deadline_seconds = 0;
        assert!(config.validate().is_err());
    }
}
