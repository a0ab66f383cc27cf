//! `timetrack replay`: rebuild totals from a recorded message log.
//!
//! ```bash
//! timetrack replay ~/.timetrack/events.jsonl --at 2026-01-31T18:00:00Z
//! ```

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use timetrack_core::replay::{read_log, replay};
use timetrack_core::{load_config, Conditions};

use crate::error::CliError;
use crate::report::Report;

pub fn run(
    path: &Path,
    json: bool,
    at: Option<DateTime<Utc>>,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    print!("{}", render(path, json, at, config)?);
    Ok(())
}

fn render(
    path: &Path,
    json: bool,
    at: Option<DateTime<Utc>>,
    config: Option<PathBuf>,
) -> Result<String, CliError> {
    let config = load_config(config)?;
    let messages = read_log(path)?;

    let tracker = match replay(&messages, Conditions::default())? {
        Some(tracker) => tracker,
        None => {
            tracing::info!(path = %path.display(), "Event log is empty");
            return Ok("No events recorded\n".to_string());
        }
    };

    let last_recorded = match messages.last() {
        Some(message) => message.timestamp().ok(),
        None => None,
    };
    let now = at.or(last_recorded).unwrap_or_else(|| tracker.started_at());
    let snapshot = tracker.snapshot(now);
    let report = Report::new(&snapshot, &config.chart.buckets, &config.refresh);

    if json {
        let mut encoded = serde_json::to_string_pretty(&report)?;
        encoded.push('\n');
        Ok(encoded)
    } else {
        Ok(report.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_log(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("events.jsonl");
        fs_err::write(&path, lines.join("\n")).expect("write log");
        path
    }

    fn missing_config(dir: &Path) -> Option<PathBuf> {
        Some(dir.join("no-config.toml"))
    }

    #[test]
    fn renders_text_report() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = write_log(
            temp_dir.path(),
            &[
                r#"{"type":"signal","event":"solution_opened","recorded_at":"2026-01-31T09:00:00Z"}"#,
                r#"{"type":"signal","event":"debug_started","recorded_at":"2026-01-31T09:10:00Z"}"#,
            ],
        );

        let text = render(&path, false, None, missing_config(temp_dir.path())).expect("render");
        assert!(text.starts_with("Tracked 0:10:00"));
        assert!(text.contains("current: debugging"));
    }

    #[test]
    fn snapshot_instant_extends_open_interval() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = write_log(
            temp_dir.path(),
            &[r#"{"type":"signal","event":"solution_opened","recorded_at":"2026-01-31T09:00:00Z"}"#],
        );
        let at = DateTime::parse_from_rfc3339("2026-01-31T10:00:00Z")
            .expect("ts")
            .with_timezone(&Utc);

        let json = render(&path, true, Some(at), missing_config(temp_dir.path())).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["snapshot"]["elapsed_ms"]["coding"], 3_600_000);
    }

    #[test]
    fn empty_log_is_reported() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = write_log(temp_dir.path(), &[""]);
        let text = render(&path, false, None, missing_config(temp_dir.path())).expect("render");
        assert_eq!(text, "No events recorded\n");
    }

    #[test]
    fn invalid_line_fails() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = write_log(temp_dir.path(), &["{\"type\":\"signal\"}"]);
        let err = render(&path, false, None, missing_config(temp_dir.path())).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
