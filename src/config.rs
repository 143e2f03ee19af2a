use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "astrapatch";
const CONFIG_FILE: &str = "config.json";

/// Launch Library 2 base URL.
pub const DEFAULT_LAUNCH_API_URL: &str = "https://ll.thespacedevs.com/2.2.0";
/// Where The ISS At base URL.
pub const DEFAULT_ISS_API_URL: &str = "https://api.wheretheiss.at/v1";
/// NASA open APIs base URL (DONKI, NeoWs, APOD).
pub const DEFAULT_NASA_API_URL: &str = "https://api.nasa.gov";
/// NASA's shared demo key; rate limited but needs no sign-up.
pub const DEFAULT_NASA_API_KEY: &str = "DEMO_KEY";
/// Provider filter value that matches every launch.
pub const ALL_PROVIDERS: &str = "all";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub launch_api_url: String,
    pub iss_api_url: String,
    pub nasa_api_url: String,
    pub nasa_api_key: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout_secs: u64,
    /// Optional upper bound on a single load task. `None` waits forever.
    pub task_timeout_secs: Option<u64>,
    pub countdown_interval_ms: u64,
    pub iss_poll_interval_ms: u64,
    /// Pause between reaching 100% and revealing the dashboard.
    pub reveal_delay_ms: u64,
    /// Maximum number of launch cards.
    pub launch_display_limit: usize,
    /// Only show launches whose provider contains this text; `"all"` shows every launch.
    pub launch_provider: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            launch_api_url: DEFAULT_LAUNCH_API_URL.to_string(),
            iss_api_url: DEFAULT_ISS_API_URL.to_string(),
            nasa_api_url: DEFAULT_NASA_API_URL.to_string(),
            nasa_api_key: DEFAULT_NASA_API_KEY.to_string(),
            request_timeout_secs: 10,
            task_timeout_secs: None,
            countdown_interval_ms: 1_000,
            iss_poll_interval_ms: 5_000,
            reveal_delay_ms: 500,
            launch_display_limit: 12,
            launch_provider: ALL_PROVIDERS.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `path`, or from the user's config directory.
    ///
    /// Falls back to defaults if the file doesn't exist or fails to parse,
    /// then applies `ASTRAPATCH_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Self {
        let config = match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env()
    }

    fn try_load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Read a config file, failing on I/O or parse errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored, as are timeouts that don't parse or are zero.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("ASTRAPATCH_LAUNCH_API_URL") {
            self.launch_api_url = url;
        }
        if let Some(url) = get("ASTRAPATCH_ISS_API_URL") {
            self.iss_api_url = url;
        }
        if let Some(url) = get("ASTRAPATCH_NASA_API_URL") {
            self.nasa_api_url = url;
        }
        if let Some(key) = get("ASTRAPATCH_NASA_API_KEY") {
            self.nasa_api_key = key;
        }
        if let Some(secs) = get("ASTRAPATCH_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            self.request_timeout_secs = secs;
        }
        self
    }

    /// Set the launch provider filter. `None` or blank keeps the current one.
    pub fn with_launch_provider(mut self, provider: Option<&str>) -> Self {
        if let Some(provider) = provider.map(str::trim).filter(|p| !p.is_empty()) {
            self.launch_provider = provider.to_lowercase();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn task_timeout(&self) -> Option<Duration> {
        self.task_timeout_secs.map(Duration::from_secs)
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_ms)
    }

    pub fn iss_poll_interval(&self) -> Duration {
        Duration::from_millis(self.iss_poll_interval_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

/// Default location of the config file: `<config dir>/astrapatch/config.json`.
pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
