//! Event producers and the time source they share.
//!
//! Host glue translates native notifications into [`SignalEvent`]s itself.
//! The only signal without a push notification is the screensaver, which is
//! re-sampled on a timer; [`ScreenSaverPoller`] owns that cadence.
//!
//! [`SignalEvent`]: timetrack_protocol::SignalEvent

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use timetrack_protocol::TransitionNotice;

use crate::engine::TimeTracker;

/// Default screensaver re-sample interval.
pub const DEFAULT_SCREENSAVER_POLL_SECS: u64 = 60;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        if let Ok(mut now) = self.now.lock() {
            *now = at;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Reports whether a screensaver is currently running.
pub trait ScreenSaverProbe: Send + Sync {
    fn is_running(&self) -> bool;
}

/// Probe for platforms without screensaver detection.
pub struct NullProbe;

impl ScreenSaverProbe for NullProbe {
    fn is_running(&self) -> bool {
        false
    }
}

pub struct ScreenSaverPoller<P: ScreenSaverProbe> {
    probe: P,
    interval: Duration,
    last_poll: Option<DateTime<Utc>>,
}

impl<P: ScreenSaverProbe> ScreenSaverPoller<P> {
    pub fn new(probe: P) -> Self {
        Self::with_interval(probe, std::time::Duration::from_secs(DEFAULT_SCREENSAVER_POLL_SECS))
    }

    pub fn with_interval(probe: P, interval: std::time::Duration) -> Self {
        let interval = Duration::from_std(interval)
            .unwrap_or_else(|_| Duration::seconds(DEFAULT_SCREENSAVER_POLL_SECS as i64));
        Self {
            probe,
            interval,
            last_poll: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn due(&self, now: DateTime<Utc>) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => now < last || now.signed_duration_since(last) >= self.interval,
        }
    }

    /// Samples the probe if a poll is due and feeds the result to `tracker`.
    pub fn tick(
        &mut self,
        tracker: &mut TimeTracker,
        now: DateTime<Utc>,
    ) -> Option<TransitionNotice> {
        if !self.due(now) {
            return None;
        }
        self.last_poll = Some(now);
        let running = self.probe.is_running();
        tracing::debug!(running, "Screensaver sampled");
        tracker.sample_screensaver(running, now)
    }
}
