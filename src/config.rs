use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AdminError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    /// Default email offered by `teamadm login`
    pub email: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| AdminError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| AdminError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_dir() -> Result<PathBuf> {
        ProjectDirs::from("", "", "teamadm")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(AdminError::NoConfigDir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// API base URL with env var taking precedence over config file.
    ///
    /// Always ends with a slash so relative endpoint paths join under it.
    pub fn api_url(&self) -> Result<Url> {
        let raw = std::env::var("TEAMADM_API_URL")
            .ok()
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        normalize_base_url(&raw)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Output directory, preferring explicit argument over config.
    pub fn resolve_export_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| AdminError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(AdminError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
