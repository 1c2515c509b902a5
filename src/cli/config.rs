//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/notes.json";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// JSON file holding the note collection
    pub data_file: Option<PathBuf>,

    /// Address the HTTP server binds to
    pub host: Option<String>,

    /// Port the HTTP server listens on
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notes-api/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notes-api")
            .join("config.toml")
    }

    /// Resolve the data file, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--data-file` argument
    /// 2. Config file `data_file` setting
    /// 3. `data/notes.json` relative to the working directory
    pub fn data_file(&self, cli_path: Option<&PathBuf>) -> PathBuf {
        cli_path
            .cloned()
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Resolve the bind host: CLI, then config, then loopback.
    pub fn host(&self, cli_host: Option<&String>) -> String {
        cli_host
            .cloned()
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Resolve the port: CLI, then config, then 3000.
    pub fn port(&self, cli_port: Option<u16>) -> u16 {
        cli_port.or(self.port).unwrap_or(DEFAULT_PORT)
    }
}
