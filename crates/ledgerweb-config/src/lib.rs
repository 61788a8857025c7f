//! Configuration management for ledgerweb
//!
//! This module handles loading, validation, and management of
//! ledgerweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served as static assets
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_dir: default_public_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the ledger file
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Ledger file name
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// Suffix appended to the ledger file name for the backup snapshot
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            ledger_file: default_ledger_file(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_ledger_file() -> String {
    "transactions.json".to_string()
}

fn default_backup_suffix() -> String {
    ".backup".to_string()
}

/// How the store treats ledger content it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// Log the failure and read the ledger as empty
    Lenient,
    /// Fail the operation
    Strict,
}

impl Default for ReadPolicy {
    fn default() -> Self {
        ReadPolicy::Lenient
    }
}

impl std::str::FromStr for ReadPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ReadPolicy::Lenient),
            "strict" => Ok(ReadPolicy::Strict),
            _ => Err(format!("Invalid read policy: {}", s)),
        }
    }
}

impl std::fmt::Display for ReadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadPolicy::Lenient => write!(f, "lenient"),
            ReadPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Ledger behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LedgerConfig {
    #[serde(default)]
    pub read_policy: ReadPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data file settings
    #[serde(default)]
    pub data: DataConfig,
    /// Ledger behaviour
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: PathBuf) -> ConfigResult<Self> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to null; treat it as all defaults
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let name = self.data.ledger_file.as_str();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "data.ledger_file".to_string(),
                reason: "Ledger file must be a plain file name".to_string(),
            });
        }

        if self.data.backup_suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.backup_suffix".to_string(),
                reason: "Backup suffix must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.ledger_file)
    }

    /// Get the full path to the backup snapshot
    pub fn backup_path(&self) -> PathBuf {
        backup_path_for(&self.ledger_path(), &self.data.backup_suffix)
    }
}

/// Append `suffix` to the file name of `ledger`, e.g. `transactions.json.backup`
pub fn backup_path_for(ledger: &Path, suffix: &str) -> PathBuf {
    let mut name = ledger.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
