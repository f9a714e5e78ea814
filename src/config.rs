// src/config.rs

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::metrics::{OverlapPolicy, DEFAULT_POLL_INTERVAL, DEFAULT_QUERY_TIMEOUT};

pub const CONFIG_ENV_OVERRIDE: &str = "HOST_MONITOR_CONFIG";

const MIN_POLL_INTERVAL_SECS: u64 = 1;
const MIN_QUERY_TIMEOUT_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,            // Default: 900
    pub height: f64,           // Default: 670
    pub start_hidden: bool,    // Default: true, revealed from the tray
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "System Monitor".to_string(),
            width: 900.0,
            height: 670.0,
            start_hidden: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // Polling
    pub poll_interval_secs: u64,         // Default: 5
    pub query_timeout_ms: u64,           // Default: 3000
    pub overlap_policy: OverlapPolicy,   // Default: serialize

    // Shell
    pub window: WindowConfig,
    pub tray_tooltip: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            query_timeout_ms: DEFAULT_QUERY_TIMEOUT.as_millis() as u64,
            overlap_policy: OverlapPolicy::Serialize,
            window: WindowConfig::default(),
            tray_tooltip: "System Monitor".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "cannot read {}: {}", path.display(), err),
            ConfigError::Parse(path, err) => {
                write!(f, "invalid config {}: {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    /// `$HOST_MONITOR_CONFIG`, else `<config dir>/host-monitor/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_OVERRIDE) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|mut path| {
            path.push("host-monitor");
            path.push("config.json");
            path
        })
    }

    /// Loads from the default location. Missing or unreadable files fall back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            info!("no config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            info!("config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: MonitorConfig =
            serde_json::from_slice(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        Ok(config.sanitized())
    }

    pub fn sanitized(mut self) -> Self {
        self.poll_interval_secs = self.poll_interval_secs.max(MIN_POLL_INTERVAL_SECS);
        self.query_timeout_ms = self.query_timeout_ms.max(MIN_QUERY_TIMEOUT_MS);
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(self.window.width) || !usable(self.window.height) {
            let fallback = WindowConfig::default();
            self.window.width = fallback.width;
            self.window.height = fallback.height;
        }
        self
    }
}
