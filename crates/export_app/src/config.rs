use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use export_engine::{ClientSettings, EngineSettings};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::LogDestination;

pub const CONFIG_FILENAME: &str = "cf_export.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Host settings, read from an optional RON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub service_url: String,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub long_running_after_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            service_url: engine.client.base_url,
            output_dir: PathBuf::from("downloads"),
            log_destination: LogDestination::Terminal,
            log_level: "info".to_string(),
            long_running_after_ms: engine.long_running_after.as_millis() as u64,
        }
    }
}

impl HostConfig {
    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        export_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            client: ClientSettings {
                base_url: self.service_url.clone(),
                ..ClientSettings::default()
            },
            long_running_after: Duration::from_millis(self.long_running_after_ms),
        }
    }
}

/// Reads the config file. A missing file is not an error: `Ok(None)`.
pub fn load_config(path: &Path) -> Result<Option<HostConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
