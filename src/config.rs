use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MonitorError;
use crate::session::Credentials;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "student-monitor.json";
/// Overrides the config file location.
pub const CONFIG_ENV: &str = "STUDENT_MONITOR_CONFIG";
/// Overrides `data_path`.
pub const DATA_ENV: &str = "STUDENT_MONITOR_DATA";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Student CSV read at start-up.
    pub data_path: PathBuf,
    pub credentials: Credentials,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("base_app_unificada.csv"),
            credentials: Credentials::default(),
            window_size: [1280.0, 860.0],
        }
    }
}

impl AppConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, MonitorError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the configuration from the environment: config file, then
    /// `STUDENT_MONITOR_DATA`. A broken file is logged and replaced by defaults.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path).unwrap_or_else(|e| {
            log::error!("Ignoring config {}: {e}", path.display());
            Self::default()
        });

        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        log::debug!("Using config {config:?}");
        config
    }
}
