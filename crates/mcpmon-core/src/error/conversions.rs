//! From trait implementations for MonitorError conversions

use super::types::MonitorError;

impl From<std::io::Error> for MonitorError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for MonitorError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for MonitorError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("invalid TOML: {}", error))
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        let message = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else {
            error.to_string()
        };
        Self::Http { message, status }
    }
}
