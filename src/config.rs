//! Configuration management for kona.
//!
//! This module handles the layered configuration system with the following
//! precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{KonaError, Result};

/// Command-line arguments for kona
#[derive(Parser, Debug)]
#[command(name = "kona")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite dataset to serve (defaults to Resources/hawaii.sqlite
    /// next to the executable)
    pub db_file: Option<PathBuf>,

    /// Host address to bind to [default: 127.0.0.1]
    #[arg(short = 'H', long, env = "KONA_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 5000]
    #[arg(short, long, env = "KONA_PORT")]
    pub port: Option<u16>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "KONA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: info]
    #[arg(long, env = "KONA_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Dataset configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the SQLite dataset file
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dataset configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Returns the merged config together with the resolved dataset path.
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build the configuration from already-parsed arguments.
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments, only where one was supplied,
        // so a JSON config survives default-valued invocations
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        // Dataset path: command line, then config file, then the fixed
        // location relative to the executable
        let db_path = match args.db_file.or_else(|| config.data.db_path.clone()) {
            Some(path) => path,
            None => default_db_path()?,
        };

        Ok((config, db_path))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server.host = other.server.host;
        self.server.port = other.server.port;
        if other.data.db_path.is_some() {
            self.data.db_path = other.data.db_path;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate server host (must be a valid IP or hostname)
        if self.server.host.is_empty() {
            return Err(KonaError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(KonaError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(KonaError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The dataset's fixed location, resolved relative to the running executable.
fn default_db_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| KonaError::Config {
        message: "Cannot determine executable directory".to_string(),
    })?;
    Ok(dir.join("Resources").join("hawaii.sqlite"))
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.data.db_path.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.server.port = 9000;
        config2.data.db_path = Some(PathBuf::from("/data/hawaii.sqlite"));

        config1.merge(config2);

        assert_eq!(config1.server.port, 9000);
        assert_eq!(
            config1.data.db_path,
            Some(PathBuf::from("/data/hawaii.sqlite"))
        );
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        // Test invalid host
        let mut config = Config::default();
        config.server.host = "".to_string();
        assert!(config.validate().is_err());

        // Test invalid port
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        // Test invalid log level
        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_args_take_precedence_over_defaults() {
        let args = Args {
            db_file: Some(PathBuf::from("/tmp/test.sqlite")),
            host: Some("0.0.0.0".to_string()),
            port: Some(8080),
            config: None,
            log_level: Some("debug".to_string()),
        };

        let (config, db_path) = Config::from_args(args).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(db_path, PathBuf::from("/tmp/test.sqlite"));
    }

    #[test]
    fn test_json_file_survives_default_valued_args() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("kona.json");
        std::fs::write(
            &config_path,
            r#"{
                "server": { "host": "0.0.0.0", "port": 9000 },
                "data": { "db_path": "/data/hawaii.sqlite" },
                "log_level": "warn"
            }"#,
        )
        .unwrap();

        // No CLI overrides supplied: the JSON values must win over defaults
        let args = Args {
            db_file: None,
            host: None,
            port: None,
            config: Some(config_path.clone()),
            log_level: None,
        };
        let (config, db_path) = Config::from_args(args).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.log_level, "warn");
        assert_eq!(db_path, PathBuf::from("/data/hawaii.sqlite"));

        // A supplied CLI value still beats the JSON file
        let args = Args {
            db_file: None,
            host: None,
            port: Some(8080),
            config: Some(config_path),
            log_level: None,
        };
        let (config, _db_path) = Config::from_args(args).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
