// Loaded once at startup, before the terminal goes raw
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::press::DEFAULT_HOLD_THRESHOLD;

const PADBOARD_DIR: &str = ".padboard";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// How raw mouse activity is turned into presses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    Gesture, // the control under the initial click owns the contact
    Tree,    // every start/end resolved through the touch router
}

// What happens to latched pads when hanging is switched off
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HangRelease {
    Keep,
    StopLatched,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hold_threshold_ms: u64,
    pub move_tolerance: f32, // in cells
    pub routing: Routing,
    pub hang_release: HangRelease,
    pub max_record_secs: u32,
    pub retry_secs: u64,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_threshold_ms: DEFAULT_HOLD_THRESHOLD.as_millis() as u64,
            move_tolerance: 100.0,
            routing: Routing::Gesture,
            hang_release: HangRelease::StopLatched,
            max_record_secs: 30,
            retry_secs: 3,
            log_file: String::from("padboard.log"),
        }
    }
}

impl Config {
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_secs.max(1))
    }
}

// <dir>/.padboard/config.json
pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join(PADBOARD_DIR).join(CONFIG_FILE)
}

/// Missing file means defaults; a file that exists but doesn't parse is an error.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = config_file_path(dir);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => return Err(ConfigError::Io { path, source }),
    };
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse { path, source })
}
