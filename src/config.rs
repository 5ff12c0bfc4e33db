//! Configuration management for sitecontent using the prefer crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::content::{RenderOptions, DEFAULT_DATA_DIR};
use crate::fetch::{Fetcher, FsFetcher, HttpFetcher, LoadError};

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default preview server address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Environment variable overriding `base_url`.
pub const ENV_BASE_URL: &str = "SITECONTENT_BASE_URL";

/// Environment variable overriding `site_root`.
pub const ENV_SITE_ROOT: &str = "SITECONTENT_SITE_ROOT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Runtime settings after config, environment, and CLI flags are applied.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Local copy of the site (pages and data files).
    pub site_root: PathBuf,
    /// Site-relative directory of the JSON data files.
    pub data_dir: String,
    /// Fetch data from this URL instead of `site_root` when set.
    pub base_url: Option<String>,
    /// User agent for HTTP requests.
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Escape item field values before interpolating them.
    pub escape_fields: bool,
    /// Preview server address.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            base_url: None,
            user_agent: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            escape_fields: false,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            data_dir: self.data_dir.clone(),
            escape_fields: self.escape_fields,
        }
    }

    /// Fetcher for the configured data source: HTTP when a base URL is set,
    /// otherwise the local site root.
    pub fn fetcher(&self) -> Result<Box<dyn Fetcher>, LoadError> {
        match &self.base_url {
            Some(url) => Ok(Box::new(HttpFetcher::with_user_agent(
                url,
                Duration::from_secs(self.request_timeout),
                self.user_agent.as_deref(),
            )?)),
            None => Ok(Box::new(FsFetcher::new(&self.site_root))),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Local site directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_root: Option<String>,
    /// Site-relative data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Base URL of a live site to fetch data from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Escape item field values (for data that is not trusted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_fields: Option<bool>,
    /// Preview server address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults with environment overrides when no file is found.
    pub async fn load() -> Self {
        match prefer::load("sitecontent").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            debug!("Ignoring discovered config: {}", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => Self::default_with_env(),
        }
    }

    /// Create a default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config.with_env_overrides())
    }

    /// Parse config text, choosing the format from `path`'s extension.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_err("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_err("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_err("JSON", e.to_string())),
        }
    }

    /// Apply `SITECONTENT_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(root) = lookup(ENV_SITE_ROOT).filter(|v| !v.is_empty()) {
            self.site_root = Some(root);
        }
        self
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref root) = self.site_root {
            settings.site_root = self.resolve_path(root, base_dir);
        }
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(ref url) = self.base_url {
            settings.base_url = Some(url.clone());
        }
        if let Some(ref ua) = self.user_agent {
            settings.user_agent = Some(ua.clone());
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(escape) = self.escape_fields {
            settings.escape_fields = escape;
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
    }
}

/// Load settings from an explicit config file, or from the discovered one.
///
/// Relative paths resolve against the config file's directory, or the
/// current directory when there is no file.
pub async fn load_settings(config_path: Option<&Path>) -> Result<(Settings, Config), ConfigError> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);
    Ok((settings, config))
}
