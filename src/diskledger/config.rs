//! # Configuration
//!
//! Settings live in `config.json` inside the data directory and are loaded
//! with defaults when the file is absent. Environment variables are applied
//! on top of the file:
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `backend` | `DISKLEDGER_BACKEND` | `file` | `memory`, `file` or `remote` |
//! | `table` | `DISKLEDGER_TABLE` | `disks` | Remote table name |
//! | `remote-url` | `SUPABASE_URL` | unset | Base URL of the hosted database |
//! | `remote-key` | `SUPABASE_KEY` | unset | API key for the hosted database |
//! | `timeout-secs` | | `10` | HTTP timeout for remote calls |
//!
//! ## CLI Usage
//!
//! - `diskledger config` shows all values (the key is masked).
//! - `diskledger config <key>` shows one value.
//! - `diskledger config <key> <value>` sets and saves a value.

use crate::error::{DiskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TABLE: &str = "disks";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where disks are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    #[default]
    File,
    Remote,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Memory => "memory",
            Backend::File => "file",
            Backend::Remote => "remote",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Backend::Memory),
            "file" | "local" => Ok(Backend::File),
            "remote" | "supabase" => Ok(Backend::Remote),
            other => Err(format!(
                "Unknown backend '{}' (expected memory, file or remote)",
                other
            )),
        }
    }
}

/// Configuration for diskledger, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default)]
    pub remote_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            table: default_table(),
            remote_url: None,
            remote_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

pub const KEYS: [&str; 5] = ["backend", "table", "remote-url", "remote-key", "timeout-secs"];

impl AppConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DiskError::Io)?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(DiskError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DiskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DiskError::Serialization)?;
        fs::write(config_path, content).map_err(DiskError::Io)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(backend) = non_empty("DISKLEDGER_BACKEND") {
            self.backend = backend.parse().map_err(DiskError::Config)?;
        }
        if let Some(table) = non_empty("DISKLEDGER_TABLE") {
            self.table = table;
        }
        if let Some(url) = non_empty("SUPABASE_URL") {
            self.remote_url = Some(url);
        }
        if let Some(key) = non_empty("SUPABASE_KEY") {
            self.remote_key = Some(key);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL and key for the remote backend, or an error naming what is missing.
    pub fn remote_credentials(&self) -> Result<(&str, &str)> {
        let url = self.remote_url.as_deref().ok_or_else(|| {
            DiskError::Config("remote-url is not set (config or SUPABASE_URL)".into())
        })?;
        let key = self.remote_key.as_deref().ok_or_else(|| {
            DiskError::Config("remote-key is not set (config or SUPABASE_KEY)".into())
        })?;
        Ok((url, key))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "backend" => Some(self.backend.to_string()),
            "table" => Some(self.table.clone()),
            "remote-url" => Some(self.remote_url.clone().unwrap_or_default()),
            "remote-key" => Some(mask(self.remote_key.as_deref())),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match normalize_key(key).as_str() {
            "backend" => self.backend = value.parse()?,
            "table" => {
                if value.is_empty() {
                    return Err("table cannot be empty".to_string());
                }
                self.table = value.to_string();
            }
            "remote-url" => self.remote_url = optional(value),
            "remote-key" => self.remote_key = optional(value),
            "timeout-secs" => {
                self.timeout_secs = value
                    .parse()
                    .map_err(|_| format!("timeout-secs must be a whole number, got '{}'", value))?;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        KEYS.iter()
            .map(|k| (k.to_string(), self.get(k).unwrap_or_default()))
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn mask(secret: Option<&str>) -> String {
    match secret {
        None => String::new(),
        Some(s) if s.chars().count() <= 4 => "****".to_string(),
        Some(s) => {
            let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{}", tail)
        }
    }
}
