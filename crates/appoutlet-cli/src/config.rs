use std::path::PathBuf;
use std::time::Duration;

use appoutlet_flathub::FlathubSyncSettings;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub synchronization: SynchronizationConfig,
}

/// Per-catalog synchronization settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SynchronizationConfig {
    #[serde(default)]
    pub flathub: FlathubConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlathubConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    pub api_base_url: Option<String>,
    /// Per-request timeout for the Flathub API, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FlathubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            concurrency: default_concurrency(),
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FlathubConfig {
    pub fn settings(&self) -> FlathubSyncSettings {
        FlathubSyncSettings {
            enabled: self.enabled,
            concurrency: self.concurrency,
        }
    }

    /// A zero timeout is treated as one second rather than failing every request.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    FlathubSyncSettings::default().concurrency
}

fn default_timeout_secs() -> u64 {
    appoutlet_flathub::client::DEFAULT_TIMEOUT.as_secs()
}

/// Config file path: `~/.config/appoutlet/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("appoutlet").join("config.toml"))
}

/// Load config from file, falling back to defaults if missing or invalid.
pub fn load_config() -> AppConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => return config,
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            ),
        }
    }

    AppConfig::default()
}
