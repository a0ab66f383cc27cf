//! Per-label elapsed time accounting.
//!
//! The ledger keeps one open interval plus closed totals. Durations come from
//! timestamp deltas, so a gap in event delivery (sleep, suspend) is billed to
//! whichever label was open when the gap began.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use timetrack_protocol::ActivityLabel;

#[derive(Debug, Clone)]
pub struct ElapsedLedger {
    started_at: DateTime<Utc>,
    open_label: ActivityLabel,
    open_since: DateTime<Utc>,
    totals: BTreeMap<ActivityLabel, u64>,
}

impl ElapsedLedger {
    pub fn new(label: ActivityLabel, at: DateTime<Utc>) -> Self {
        Self {
            started_at: at,
            open_label: label,
            open_since: at,
            totals: ActivityLabel::ALL.iter().map(|label| (*label, 0)).collect(),
        }
    }

    /// Closes the open interval at `at` and opens `label`. An `at` earlier
    /// than the open interval bills zero and the new label opens at the
    /// later instant, so totals never exceed wall-clock time.
    pub fn on_transition(&mut self, label: ActivityLabel, at: DateTime<Utc>) {
        let delta = elapsed_ms(self.open_since, at);
        if at < self.open_since {
            tracing::warn!(
                label = %self.open_label,
                open_since = %self.open_since.to_rfc3339(),
                at = %at.to_rfc3339(),
                "Transition timestamp precedes open interval; billing zero"
            );
        }

        let total = self.totals.entry(self.open_label).or_insert(0);
        *total = total.saturating_add(delta);

        self.open_label = label;
        self.open_since = at.max(self.open_since);
    }

    /// Totals as of `now`, including the open interval. Does not mutate.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ElapsedSnapshot {
        let mut totals = self.totals.clone();
        let open = totals.entry(self.open_label).or_insert(0);
        *open = open.saturating_add(elapsed_ms(self.open_since, now));

        ElapsedSnapshot {
            taken_at: now,
            started_at: self.started_at,
            current: self.open_label,
            elapsed_ms: totals,
        }
    }

    pub fn open_label(&self) -> ActivityLabel {
        self.open_label
    }

    pub fn open_since(&self) -> DateTime<Utc> {
        self.open_since
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Closed totals only.
    pub fn total(&self, label: ActivityLabel) -> u64 {
        self.totals.get(&label).copied().unwrap_or(0)
    }
}

// Negative deltas clamp to zero.
fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from(to.signed_duration_since(from).num_milliseconds()).unwrap_or(0)
}

/// Read-only, point-in-time view of cumulative durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElapsedSnapshot {
    pub taken_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub current: ActivityLabel,
    pub elapsed_ms: BTreeMap<ActivityLabel, u64>,
}

impl ElapsedSnapshot {
    pub fn get(&self, label: ActivityLabel) -> u64 {
        self.elapsed_ms.get(&label).copied().unwrap_or(0)
    }

    pub fn total_ms(&self) -> u64 {
        self.elapsed_ms.values().copied().sum()
    }

    pub fn sum_of(&self, labels: &[ActivityLabel]) -> u64 {
        labels.iter().map(|label| self.get(*label)).sum()
    }
}
