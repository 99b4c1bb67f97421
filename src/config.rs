use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::FeedTuning;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub time_format: String,
    pub feed: FeedConfig,
}

/// Tick cadences and retention caps for the simulated feed. The defaults
/// match the original broadcast demo; nothing depends on their exact
/// magnitude beyond being bounded.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    pub position_interval_ms: u64,
    pub commentary_interval_ms: u64,
    pub chat_interval_ms: u64,
    pub commentary_cap: usize,
    pub chat_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            time_format: "%H:%M:%S".to_string(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            position_interval_ms: 2000,
            commentary_interval_ms: 8000,
            chat_interval_ms: 8000,
            commentary_cap: 10,
            chat_cap: 50,
        }
    }
}

impl Config {
    /// Map the configured cadences and caps onto simulator tuning.
    pub fn feed_tuning(&self) -> FeedTuning {
        FeedTuning {
            position_interval: Duration::from_millis(self.feed.position_interval_ms),
            commentary_interval: Duration::from_millis(self.feed.commentary_interval_ms),
            chat_interval: Duration::from_millis(self.feed.chat_interval_ms),
            commentary_cap: self.feed.commentary_cap,
            chat_cap: self.feed.chat_cap,
            ..FeedTuning::default()
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    // Check if file exists
    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|_| Config::default())
}
