//! TimeTracker - the entry point host glue and renderers talk to.
//!
//! Composes one [`SignalReducer`] with one [`ElapsedLedger`]:
//! - **Single-threaded**: callers serialize `apply`/`sample_screensaver`.
//!   Wrap in a `Mutex` if events arrive from several threads.
//! - **Total**: no operation on a live tracker fails.
//! - **Commit first**: reducer and ledger are updated before subscribers
//!   run, so a subscriber cannot observe or cause half-applied state.
//!
//! ```rust,ignore
//! use timetrack_core::{Conditions, TimeTracker};
//! use timetrack_protocol::SignalEvent;
//!
//! let mut tracker = TimeTracker::new(Conditions::default(), Utc::now());
//! tracker.subscribe(|notice| println!("{notice}"));
//! tracker.apply(SignalEvent::SolutionOpened, Utc::now());
//! let snapshot = tracker.snapshot(Utc::now());
//! ```

use chrono::{DateTime, Utc};
use std::fmt;
use timetrack_protocol::{
    ActivityLabel, Condition, ErrorInfo, InboundMessage, SignalEvent, TransitionNotice,
};

use crate::ledger::{ElapsedLedger, ElapsedSnapshot};
use crate::reducer::{Conditions, Precedence, SignalReducer};

pub type TransitionCallback = Box<dyn FnMut(&TransitionNotice) + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct TimeTracker {
    reducer: SignalReducer,
    ledger: ElapsedLedger,
    subscribers: Vec<(SubscriptionId, TransitionCallback)>,
    next_subscription: u64,
}

impl TimeTracker {
    pub fn new(conditions: Conditions, at: DateTime<Utc>) -> Self {
        Self::with_precedence(conditions, Precedence::default(), at)
    }

    pub fn with_precedence(
        conditions: Conditions,
        precedence: Precedence,
        at: DateTime<Utc>,
    ) -> Self {
        let reducer = SignalReducer::with_precedence(conditions, precedence);
        let ledger = ElapsedLedger::new(reducer.current(), at);
        tracing::info!(
            label = %reducer.current(),
            started_at = %at.to_rfc3339(),
            "Time tracker started"
        );
        Self {
            reducer,
            ledger,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Applies one canonical event observed at `at`.
    pub fn apply(&mut self, event: SignalEvent, at: DateTime<Utc>) -> Option<TransitionNotice> {
        let previous = self.reducer.current();
        let label = self.reducer.apply(event)?;
        self.ledger.on_transition(label, at);

        let notice = TransitionNotice {
            label,
            previous,
            at,
        };
        tracing::info!(
            event = %event,
            from = %previous,
            to = %label,
            at = %at.to_rfc3339(),
            "Activity changed"
        );
        self.notify(&notice);
        Some(notice)
    }

    /// Feeds one periodic screensaver sample. Only a change of the held
    /// condition is turned into an event.
    pub fn sample_screensaver(
        &mut self,
        active: bool,
        at: DateTime<Utc>,
    ) -> Option<TransitionNotice> {
        if self.reducer.query(Condition::ScreenSaverActive) == active {
            tracing::debug!(active, "Screensaver sample unchanged");
            return None;
        }
        self.apply(SignalEvent::for_screen_saver(active), at)
    }

    /// Validates and applies a wire message.
    pub fn handle(
        &mut self,
        message: &InboundMessage,
    ) -> Result<Option<TransitionNotice>, ErrorInfo> {
        let at = message.timestamp()?;
        Ok(match message {
            InboundMessage::Signal { event, .. } => self.apply(*event, at),
            InboundMessage::ScreenSaverSample { active, .. } => {
                self.sample_screensaver(*active, at)
            }
        })
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TransitionNotice) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn current(&self) -> ActivityLabel {
        self.reducer.current()
    }

    pub fn query(&self, condition: Condition) -> bool {
        self.reducer.query(condition)
    }

    pub fn conditions(&self) -> &Conditions {
        self.reducer.conditions()
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> ElapsedSnapshot {
        self.ledger.snapshot(now)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.ledger.started_at()
    }

    fn notify(&mut self, notice: &TransitionNotice) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(notice);
        }
    }
}

impl fmt::Debug for TimeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeTracker")
            .field("reducer", &self.reducer)
            .field("ledger", &self.ledger)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
