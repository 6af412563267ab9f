//! Layered server configuration.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. YAML file given with `--config`
//! 3. Environment variables (`TILAB_` prefix, `__` between sections),
//!    e.g. `TILAB_DATABASE__URL` -> `database.url`
//! 4. Command line flags

use crate::cli::Cli;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lab_loans: lab_loans::Config,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SeaORM connection URL; `sqlite://...` or `postgres://...`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Pool size. Keep at 1 for `sqlite::memory:`, where every connection
    /// opens its own database.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then `TILAB_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path)?
            .extract()
            .map_err(|e| ConfigError::Figment(Box::new(e)))
    }

    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        Ok(figment.merge(Env::prefixed("TILAB_").split("__")))
    }

    /// Command line flags win over every other source
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(bind) = &cli.bind {
            self.server.bind_addr = bind.clone();
        }
        if let Some(url) = &cli.database_url {
            self.database.url = url.clone();
        }
        if cli.skip_migrations {
            self.database.run_migrations = false;
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://tilab.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
