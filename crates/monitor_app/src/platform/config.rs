use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use monitor_core::PollPolicy;
use monitor_engine::FetchSettings;
use monitor_logging::{monitor_info, LogDestination};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] ron::Error),
}

/// Monitor settings as stored on disk. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub status_url: String,
    pub success_delay_ms: u64,
    pub failure_delay_ms: u64,
    pub down_notice_interval_ms: u64,
    pub fetch_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_status_bytes: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        let poll = PollPolicy::default();
        let fetch = FetchSettings::default();
        Self {
            status_url: "http://localhost:8000/status".to_string(),
            success_delay_ms: millis(poll.success_delay),
            failure_delay_ms: millis(poll.failure_delay),
            down_notice_interval_ms: millis(poll.down_notice_interval),
            fetch_timeout_ms: millis(poll.fetch_timeout),
            connect_timeout_ms: millis(fetch.connect_timeout),
            request_timeout_ms: millis(fetch.request_timeout),
            max_status_bytes: fetch.max_bytes,
            log_destination: LogDestination::default(),
            log_file: PathBuf::from("monitor.log"),
        }
    }
}

impl MonitorConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            success_delay: Duration::from_millis(self.success_delay_ms),
            failure_delay: Duration::from_millis(self.failure_delay_ms),
            down_notice_interval: Duration::from_millis(self.down_notice_interval_ms),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_status_bytes,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            monitor_info!("No config at {:?}, using defaults", path);
            return Ok(MonitorConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    monitor_info!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn default_config_ron() -> Result<String, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(&MonitorConfig::default(), pretty)?)
}
