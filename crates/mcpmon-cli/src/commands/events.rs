//! Event file commands

use super::config::load_and_init_logging;
use anyhow::Context;
use mcpmon_core::event::{ToolCallEvent, parse_event_batch};
use mcpmon_core::logging::LogFormat;
use mcpmon_core::telemetry::{CollectorStats, create_metrics_collector};
use std::path::Path;

async fn read_events(file: &Path) -> anyhow::Result<Vec<ToolCallEvent>> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    parse_event_batch(&content).with_context(|| format!("invalid event batch in {}", file.display()))
}

/// Check that a file holds a valid, non-empty batch
pub async fn validate(file: &Path) -> anyhow::Result<()> {
    let events = read_events(file).await?;
    let failures = events.iter().filter(|event| !event.success).count();
    println!(
        "{} valid events ({} failed calls) in {}",
        events.len(),
        failures,
        file.display()
    );
    Ok(())
}

/// Record every event of the file and flush; delivery failures are reported, not fatal
pub async fn replay(file: &Path, config: Option<&Path>, format: LogFormat) -> anyhow::Result<()> {
    let options = load_and_init_logging(config, format)?;
    let events = read_events(file).await?;

    tracing::info!(
        event_count = events.len(),
        metrics_server_url = %options.metrics_server_url,
        "Replaying events"
    );

    let collector = create_metrics_collector(&options);
    for event in events {
        collector.record_event(event).await;
    }
    collector.flush().await;

    print_summary(&collector.stats())?;
    Ok(())
}

fn print_summary(stats: &CollectorStats) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;

    #[tokio::test]
    async fn test_read_events_round_trips_file() {
        let events = vec![
            ToolCallEvent::success("search", Utc::now(), 5, 10, 20),
            ToolCallEvent::failure("search", Utc::now(), 7, 10, "timeout", None),
        ];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&events).unwrap()).unwrap();

        let loaded = read_events(file.path()).await.unwrap();
        assert_eq!(loaded, events);
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        assert!(validate(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let err = validate(Path::new("/nonexistent/events.json")).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
