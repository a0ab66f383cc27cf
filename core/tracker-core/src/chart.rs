//! Renderer-side helpers: grouping labels into chart series and choosing a
//! refresh cadence. Nothing here feeds back into accounting.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use timetrack_protocol::ActivityLabel;

use crate::ledger::ElapsedSnapshot;

/// One chart series and the labels it sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBucket {
    pub legend: String,
    pub labels: Vec<ActivityLabel>,
}

impl ChartBucket {
    pub fn new(legend: &str, labels: &[ActivityLabel]) -> Self {
        Self {
            legend: legend.to_string(),
            labels: labels.to_vec(),
        }
    }
}

/// Coding, Testing, Debugging, Building, then everything outside the IDE.
///
/// Away labels are left out until the "away from PC" grouping is decided.
pub fn default_buckets() -> Vec<ChartBucket> {
    vec![
        ChartBucket::new("Coding", &[ActivityLabel::Coding]),
        ChartBucket::new("Testing", &[ActivityLabel::Testing]),
        ChartBucket::new("Debugging", &[ActivityLabel::Debugging]),
        ChartBucket::new("Building", &[ActivityLabel::Building]),
        ChartBucket::new(
            "Outside IDE",
            &[ActivityLabel::NoFocus, ActivityLabel::NoSolution],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartValue {
    pub legend: String,
    pub value_ms: u64,
}

/// Sums each bucket. When everything is zero the bucket holding `NoFocus`
/// gets a value of 1 so the chart has something to draw.
pub fn chart_values(snapshot: &ElapsedSnapshot, buckets: &[ChartBucket]) -> Vec<ChartValue> {
    let mut values: Vec<ChartValue> = buckets
        .iter()
        .map(|bucket| ChartValue {
            legend: bucket.legend.clone(),
            value_ms: snapshot.sum_of(&bucket.labels),
        })
        .collect();

    if values.iter().all(|value| value.value_ms == 0) {
        if let Some(index) = buckets
            .iter()
            .position(|bucket| bucket.labels.contains(&ActivityLabel::NoFocus))
        {
            values[index].value_ms = 1;
        }
    }

    values
}

pub const DEFAULT_REFRESH_MIN_SECS: u64 = 3;
pub const DEFAULT_REFRESH_MAX_SECS: u64 = 300;
pub const DEFAULT_REFRESH_DIVISOR: u64 = 30;

/// Refresh slows down as tracked time grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPolicy {
    #[serde(default = "default_min_secs")]
    pub min_secs: u64,
    #[serde(default = "default_max_secs")]
    pub max_secs: u64,
    #[serde(default = "default_divisor")]
    pub divisor: u64,
}

fn default_min_secs() -> u64 {
    DEFAULT_REFRESH_MIN_SECS
}

fn default_max_secs() -> u64 {
    DEFAULT_REFRESH_MAX_SECS
}

fn default_divisor() -> u64 {
    DEFAULT_REFRESH_DIVISOR
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            min_secs: DEFAULT_REFRESH_MIN_SECS,
            max_secs: DEFAULT_REFRESH_MAX_SECS,
            divisor: DEFAULT_REFRESH_DIVISOR,
        }
    }
}

impl RefreshPolicy {
    pub fn interval_for(&self, snapshot: &ElapsedSnapshot) -> Duration {
        let total_secs = snapshot.total_ms() / 1000;
        let secs = (total_secs / self.divisor.max(1))
            .max(self.min_secs)
            .min(self.max_secs);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ElapsedLedger;
    use chrono::{DateTime, TimeZone, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()
    }

    fn snapshot_after(label: ActivityLabel, secs: i64) -> ElapsedSnapshot {
        ElapsedLedger::new(label, t0()).snapshot(t0() + chrono::Duration::seconds(secs))
    }

    #[test]
    fn outside_bucket_merges_focus_and_solution() {
        let mut ledger = ElapsedLedger::new(ActivityLabel::NoSolution, t0());
        ledger.on_transition(ActivityLabel::NoFocus, t0() + chrono::Duration::seconds(2));
        ledger.on_transition(ActivityLabel::Coding, t0() + chrono::Duration::seconds(5));
        let snapshot = ledger.snapshot(t0() + chrono::Duration::seconds(6));

        let values = chart_values(&snapshot, &default_buckets());
        assert_eq!(values[0].legend, "Coding");
        assert_eq!(values[0].value_ms, 1_000);
        assert_eq!(values[4].legend, "Outside IDE");
        assert_eq!(values[4].value_ms, 5_000);
    }

    #[test]
    fn empty_chart_gets_placeholder() {
        let values = chart_values(&snapshot_after(ActivityLabel::Coding, 0), &default_buckets());
        let placeholder: Vec<_> = values.iter().filter(|v| v.value_ms == 1).collect();
        assert_eq!(placeholder.len(), 1);
        assert_eq!(placeholder[0].legend, "Outside IDE");
    }

    #[test]
    fn away_labels_are_not_charted_by_default() {
        let snapshot = snapshot_after(ActivityLabel::SessionLocked, 10);
        let values = chart_values(&snapshot, &default_buckets());
        assert!(values.iter().all(|v| v.value_ms <= 1));
    }

    #[test]
    fn refresh_interval_clamps() {
        let policy = RefreshPolicy::default();
        assert_eq!(
            policy.interval_for(&snapshot_after(ActivityLabel::Coding, 10)),
            Duration::from_secs(3)
        );
        assert_eq!(
            policy.interval_for(&snapshot_after(ActivityLabel::Coding, 600)),
            Duration::from_secs(20)
        );
        assert_eq!(
            policy.interval_for(&snapshot_after(ActivityLabel::Coding, 86_400)),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn zero_divisor_is_treated_as_one() {
        let policy = RefreshPolicy {
            min_secs: 1,
            max_secs: 1_000,
            divisor: 0,
        };
        assert_eq!(
            policy.interval_for(&snapshot_after(ActivityLabel::Coding, 42)),
            Duration::from_secs(42)
        );
    }
}
