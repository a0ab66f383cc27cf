//! # timetrack-core
//!
//! Turns a stream of IDE and OS signals into one current activity label and
//! a running per-label total of elapsed milliseconds.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Hosts drive the tracker
//!   from whatever event loop they already have.
//! - **Not thread-safe**: One logical thread applies events; hosts provide
//!   their own `Mutex` if they need one.
//! - **Total**: The engine never fails. Bad timestamps clamp, unknown events
//!   are rejected at the protocol boundary before they arrive.
//! - **Host-agnostic**: Nothing here knows about any IDE or OS API. Producers
//!   translate native notifications into [`SignalEvent`]s.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use timetrack_core::{Conditions, TimeTracker};
//! use timetrack_protocol::SignalEvent;
//!
//! let mut tracker = TimeTracker::new(Conditions::default(), start);
//! tracker.apply(SignalEvent::SolutionOpened, start);
//! tracker.apply(SignalEvent::BuildStarted, later);
//! let snapshot = tracker.snapshot(now);
//! ```

pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod producers;
pub mod reducer;
pub mod replay;

pub use chart::{chart_values, default_buckets, ChartBucket, ChartValue, RefreshPolicy};
pub use config::{load_config, TrackerConfig};
pub use engine::{SubscriptionId, TimeTracker, TransitionCallback};
pub use error::{Result, TrackerError};
pub use ledger::{ElapsedLedger, ElapsedSnapshot};
pub use producers::{
    Clock, ManualClock, NullProbe, ScreenSaverPoller, ScreenSaverProbe, SystemClock,
};
pub use reducer::{Conditions, Precedence, PrecedenceRule, SignalReducer};

pub use timetrack_protocol::{
    ActivityLabel, Condition, InboundMessage, SignalEvent, TransitionNotice,
};
