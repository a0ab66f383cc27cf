//! Startup configuration.
//!
//! Read once before the tracker is built. Covers producer cadence and chart
//! grouping only; the precedence order is not configurable because changing
//! it mid-run would break per-label accounting.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chart::{default_buckets, ChartBucket, RefreshPolicy};
use crate::error::{Result, TrackerError};
use crate::producers::DEFAULT_SCREENSAVER_POLL_SECS;

const DATA_DIR_NAME: &str = ".timetrack";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub screensaver: ScreenSaverConfig,
    #[serde(default)]
    pub refresh: RefreshPolicy,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSaverConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// `[program, args...]` whose exit status reports a running screensaver.
    #[serde(default)]
    pub probe_command: Vec<String>,
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_SCREENSAVER_POLL_SECS
}

impl Default for ScreenSaverConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_SCREENSAVER_POLL_SECS,
            probe_command: Vec::new(),
        }
    }
}

impl ScreenSaverConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_buckets")]
    pub buckets: Vec<ChartBucket>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
        }
    }
}

/// Returns `~/.timetrack`.
pub fn data_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .ok_or(TrackerError::HomeDirNotFound)
}

pub fn default_config_path() -> Result<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the config at `path` (or the default location). A missing file
/// yields defaults.
pub fn load_config(path: Option<PathBuf>) -> Result<TrackerConfig> {
    let config_path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config file; using defaults");
        return Ok(TrackerConfig::default());
    }

    let content = fs_err::read_to_string(&config_path).map_err(|source| TrackerError::Io {
        context: format!("reading config {}", config_path.display()),
        source,
    })?;
    parse_config(&config_path, &content)
}

fn parse_config(path: &Path, content: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig =
        toml::from_str(content).map_err(|err| TrackerError::ConfigMalformed {
            path: path.to_path_buf(),
            details: err.to_string(),
        })?;

    if config.chart.buckets.is_empty() {
        return Err(TrackerError::ConfigMalformed {
            path: path.to_path_buf(),
            details: "chart.buckets must not be empty".to_string(),
        });
    }
    if config.refresh.min_secs > config.refresh.max_secs {
        return Err(TrackerError::ConfigMalformed {
            path: path.to_path_buf(),
            details: "refresh.min_secs exceeds refresh.max_secs".to_string(),
        });
    }

    Ok(config)
}
