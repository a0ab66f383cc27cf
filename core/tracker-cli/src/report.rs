//! Plain-text and JSON rendering of snapshots.

use serde::Serialize;
use std::fmt::Write;
use timetrack_core::{chart_values, ChartBucket, ChartValue, ElapsedSnapshot, RefreshPolicy};

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub snapshot: &'a ElapsedSnapshot,
    pub chart: Vec<ChartValue>,
    pub refresh_secs: u64,
}

impl<'a> Report<'a> {
    pub fn new(
        snapshot: &'a ElapsedSnapshot,
        buckets: &[ChartBucket],
        refresh: &RefreshPolicy,
    ) -> Self {
        Self {
            snapshot,
            chart: chart_values(snapshot, buckets),
            refresh_secs: refresh.interval_for(snapshot).as_secs(),
        }
    }

    pub fn render(&self) -> String {
        let total = self.snapshot.total_ms();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Tracked {} since {} (current: {})",
            format_duration(total),
            self.snapshot.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.snapshot.current
        );

        for (label, ms) in &self.snapshot.elapsed_ms {
            if *ms == 0 && *label != self.snapshot.current {
                continue;
            }
            let _ = writeln!(
                out,
                "  {:<22} {:>10} {:>6.1}%",
                label.as_str(),
                format_duration(*ms),
                percent(*ms, total)
            );
        }

        let _ = writeln!(out, "Chart:");
        for value in &self.chart {
            let _ = writeln!(
                out,
                "  {:<22} {:>10}",
                value.legend,
                format_duration(value.value_ms)
            );
        }
        let _ = writeln!(out, "Next refresh in {}s", self.refresh_secs);
        out
    }
}

/// `H:MM:SS`, hours unbounded.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use timetrack_core::{default_buckets, ActivityLabel, ElapsedLedger};

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(61_999), "0:01:01");
        assert_eq!(format_duration(90_061_000), "25:01:01");
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn render_lists_visited_labels_and_chart() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap();
        let mut ledger = ElapsedLedger::new(ActivityLabel::Coding, start);
        ledger.on_transition(ActivityLabel::Building, start + Duration::seconds(30));
        let snapshot = ledger.snapshot(start + Duration::seconds(60));

        let report = Report::new(&snapshot, &default_buckets(), &RefreshPolicy::default());
        let text = report.render();

        assert!(text.starts_with("Tracked 0:01:00 since 2026-01-31 09:00:00 (current: building)"));
        assert!(text.contains("coding"));
        assert!(text.contains("50.0%"));
        assert!(!text.contains("no_focus"));
        assert!(text.contains("Outside IDE"));
        assert!(text.contains("Next refresh in 3s"));
    }

    #[test]
    fn report_serializes_to_json() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap();
        let snapshot = ElapsedLedger::new(ActivityLabel::Testing, start)
            .snapshot(start + Duration::seconds(5));
        let report = Report::new(&snapshot, &default_buckets(), &RefreshPolicy::default());

        let value = serde_json::to_value(&report).expect("encode");
        assert_eq!(value["snapshot"]["current"], "testing");
        assert_eq!(value["snapshot"]["elapsed_ms"]["testing"], 5_000);
        assert_eq!(value["chart"][1]["legend"], "Testing");
    }
}
