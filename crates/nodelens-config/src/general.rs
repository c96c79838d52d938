use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Periodic repaint cadence. Frames are otherwise only committed when
    /// input or data changes something.
    #[serde(alias = "tick-rate-ms")]
    pub tick_rate_ms: u64,
    /// Bounded-wait keyboard poll; keeps the loop responsive without
    /// spinning.
    #[serde(alias = "poll-timeout-ms")]
    pub poll_timeout_ms: u64,
    /// How long a status-line warning stays visible.
    #[serde(alias = "notice-ttl-secs")]
    pub notice_ttl_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250, poll_timeout_ms: 100, notice_ttl_secs: 5 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(alias = "ttl-secs")]
    pub ttl_secs: u64,
    pub enabled: bool,
    /// Cache directory; platform cache dir when unset.
    pub dir: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 30, enabled: true, dir: None }
    }
}

impl CacheConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join("nodelens"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log directory; platform data dir when unset.
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into(), dir: None }
    }
}

impl LoggingConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => {
                dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("nodelens").join("logs")
            }
        }
    }
}

pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
