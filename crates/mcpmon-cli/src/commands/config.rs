//! Monitor option commands

use anyhow::Context;
use mcpmon_core::config::{MonitorOptions, ValidatedMonitorOptions, validate_monitor_options};
use mcpmon_core::logging::{LogFormat, init_logging};
use serde_json::json;
use std::path::Path;

/// Load options from the environment, with the file's values taking precedence
pub fn load_options(config: Option<&Path>) -> anyhow::Result<ValidatedMonitorOptions> {
    let env = MonitorOptions::from_env()?;
    let options = match config {
        Some(path) => MonitorOptions::from_file(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?
            .merge(env),
        None => env,
    };
    Ok(validate_monitor_options(&options)?)
}

/// Load options and install the logger they ask for
pub fn load_and_init_logging(
    config: Option<&Path>,
    format: LogFormat,
) -> anyhow::Result<ValidatedMonitorOptions> {
    let options = load_options(config)?;
    init_logging(options.log_level, format)?;
    tracing::debug!(options = ?options, "Monitor options loaded");
    Ok(options)
}

/// Effective options as JSON, API key masked
pub fn describe(options: &ValidatedMonitorOptions) -> serde_json::Value {
    json!({
        "apiKey": options.masked_api_key(),
        "metricsServerUrl": options.metrics_server_url,
        "batchSize": options.batch_size,
        "logLevel": options.log_level,
        "timeout": options.timeout.as_millis() as u64,
        "retryAttempts": options.retry_attempts,
        "maxPending": options.max_pending,
    })
}

/// Validate options and print them
pub async fn check(config: Option<&Path>) -> anyhow::Result<()> {
    let options = load_options(config)?;
    println!("{}", serde_json::to_string_pretty(&describe(&options))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_describe_masks_api_key() {
        let key = format!("{}wxyz", "k".repeat(60));
        let options = validate_monitor_options(&MonitorOptions::new(key.clone())).unwrap();

        let described = describe(&options);
        assert_eq!(described["apiKey"], "****wxyz");
        assert_eq!(described["batchSize"], 10);
        assert_eq!(described["timeout"], 5000);
        assert_eq!(described["logLevel"], "info");
        assert!(!described.to_string().contains(&key));
    }

    #[test]
    fn test_file_options_are_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "apiKey = \"{}\"", "k".repeat(64)).unwrap();
        writeln!(file, "batchSize = 3").unwrap();

        let options = load_options(Some(file.path())).unwrap();
        assert_eq!(options.batch_size, 3);
    }
}
