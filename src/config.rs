//! Configuration management for fanout_fetcher
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! environment variables, then command-line flags (applied by the CLI).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ClientConfig, DispatchConfig};
use crate::constants::{config as paths, env, http, logging, target, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to fetch and how many workers to use
    pub fetch: DispatchConfig,
    /// HTTP client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (if exists)
    /// 3. Environment variables
    ///
    /// Command-line flags are applied on top by the caller.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match Self::resolve_config_path(config_file_override)? {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Pick the file to load, if any
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// searched and a missing file simply means defaults.
    pub fn resolve_config_path(
        config_file_override: Option<PathBuf>,
    ) -> ConfigResult<Option<PathBuf>> {
        match config_file_override {
            Some(path) if path.exists() => Ok(Some(path)),
            Some(path) => Err(ConfigError::NotFound { path }),
            None => Ok(Self::find_config_file()),
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(format!("./{}", paths::LOCAL_FILE_NAME))];
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(paths::APP_DIR_NAME)
            .join(paths::USER_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply `FANOUT_*` environment overrides using the given lookup
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but does not
    /// parse, or names zero/negative workers or a non-positive timeout.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(env::BASE_URL) {
            self.fetch.base_url = base_url;
        }

        if let Some(template) = lookup(env::PATH_TEMPLATE) {
            self.fetch.path_template = template;
        }

        if let Some(raw) = lookup(env::ITEMS) {
            self.fetch.item_count = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(env::ITEMS, &raw, "Expected a whole number"))?;
        }

        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            let secs: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(env::TIMEOUT_SECS, &raw, "Expected seconds"))?;
            self.fetch.per_call_timeout = DispatchConfig::timeout_from_secs(secs)?;
        }

        if let Some(raw) = lookup(env::WORKERS) {
            let count: i64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(env::WORKERS, &raw, "Expected an integer"))?;
            self.fetch.worker_count = DispatchConfig::worker_count_from_signed(count)?;
        }

        Ok(())
    }

    /// Client settings for a run using `worker_count` workers
    pub fn client_config_for(&self, worker_count: usize) -> ClientConfig {
        self.client.clone().sized_for(worker_count)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the commented default configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyExists` if the file exists and `force` is
    /// false, or `ConfigError::Io` if it cannot be written.
    pub async fn write_default(path: &Path, force: bool) -> ConfigResult<()> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Wrote default configuration to: {}", path.display());
        Ok(())
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# fanout-fetcher configuration
# Environment variables (FANOUT_*) and command-line flags override these values.

[fetch]
# Scheme and host of the remote API
base_url = "{base_url}"
# Resource path; {{id}} is replaced by the item number
path_template = "{path_template}"
# Items 1..=item_count are fetched
item_count = {item_count}
# Deadline for each individual request
per_call_timeout = "{timeout}s"
# Concurrent workers (1 = sequential)
worker_count = {worker_count}

[client]
user_agent = "{user_agent}"
connect_timeout = "{connect}s"
tcp_nodelay = true
tcp_keepalive = "{keepalive}s"
pool_idle_timeout = "{idle}s"
# Idle connections kept per host (defaults to the worker count)
# pool_max_idle_per_host = 8

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            base_url = target::DEFAULT_BASE_URL,
            path_template = target::DEFAULT_PATH_TEMPLATE,
            item_count = target::DEFAULT_ITEM_COUNT,
            timeout = http::DEFAULT_CALL_TIMEOUT.as_secs(),
            worker_count = workers::DEFAULT_WORKER_COUNT,
            user_agent = http::USER_AGENT,
            connect = http::CONNECT_TIMEOUT.as_secs(),
            keepalive = http::TCP_KEEPALIVE.as_secs(),
            idle = http::POOL_IDLE_TIMEOUT.as_secs(),
            level = logging::DEFAULT_LOG_LEVEL,
        )
    }
}
