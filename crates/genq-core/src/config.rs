use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::api::TransportOptions;
use crate::identity::Identity;
use crate::media::ResultEndpoint;

/// Retry policy parameters for status polling (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per poll tick (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 5,
        }
    }
}

/// Global configuration loaded from `~/.config/genq/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenqConfig {
    /// Backend origin, e.g. `https://app.example.com`. API paths are appended to it.
    pub base_url: String,
    /// Delay between job status requests.
    pub poll_interval_ms: u64,
    /// Give up on a job after this long.
    pub max_wait_secs: u64,
    /// "shared" (`/api/job/{id}`) or "per_kind" (`/api/{kind}/result/{id}`).
    #[serde(default)]
    pub result_endpoint: ResultEndpoint,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout. None = wait as long as the server does.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Messenger user id to act as. None or 0 = anonymous.
    #[serde(default)]
    pub tg_id: Option<i64>,
    /// Optional per-tick retry; if missing, a failed status request ends the poll.
    #[serde(default)]
    pub tick_retry: Option<RetryConfig>,
}

impl Default for GenqConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_ms: 2000,
            max_wait_secs: 30 * 60,
            result_endpoint: ResultEndpoint::Shared,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            tg_id: None,
            tick_retry: None,
        }
    }
}

impl GenqConfig {
    /// Parsed base URL. Only http and https are accepted.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim())
            .with_context(|| format!("invalid base_url {:?}", self.base_url))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("unsupported base_url scheme: {}", other),
        }
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::from_option(self.tg_id)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("genq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GenqConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GenqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<GenqConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: GenqConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
