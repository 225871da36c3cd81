//! Loading monitor options from the environment or a file

use super::options::MonitorOptions;
use crate::error::{MonitorError, MonitorResult};
use std::path::Path;
use std::str::FromStr;

pub const ENV_API_KEY: &str = "MCP_API_KEY";
pub const ENV_METRICS_URL: &str = "METRICS_SERVER_URL";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_BATCH_SIZE: &str = "MCPMON_BATCH_SIZE";
pub const ENV_TIMEOUT_MS: &str = "MCPMON_TIMEOUT_MS";
pub const ENV_RETRY_ATTEMPTS: &str = "MCPMON_RETRY_ATTEMPTS";

impl MonitorOptions {
    /// Load options from the process environment, reading `.env` first if present
    pub fn from_env() -> MonitorResult<Self> {
        dotenv::dotenv().ok();
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Load options through a variable lookup function
    pub fn from_env_with<F>(lookup: F) -> MonitorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_key: get(ENV_API_KEY),
            metrics_server_url: get(ENV_METRICS_URL),
            log_level: get(ENV_LOG_LEVEL),
            batch_size: parse_var(ENV_BATCH_SIZE, get(ENV_BATCH_SIZE))?,
            timeout: parse_var(ENV_TIMEOUT_MS, get(ENV_TIMEOUT_MS))?,
            retry_attempts: parse_var(ENV_RETRY_ATTEMPTS, get(ENV_RETRY_ATTEMPTS))?,
            max_pending: None,
        })
    }

    /// Load options from a JSON or TOML file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> MonitorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::io_with_path(e.to_string(), path.display().to_string()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                MonitorError::config_with_context(
                    "Invalid monitor options file",
                    format!("{}: {}", path.display(), e),
                )
            }),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(MonitorError::config_with_context(
                "Unsupported monitor options file",
                format!("{}: expected a .json or .toml file", path.display()),
            )),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: Option<String>) -> MonitorResult<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            MonitorError::config_with_context(
                "Invalid environment variable",
                format!("{} has invalid value: {}", name, raw),
            )
        }),
    }
}
