//! Shared types for the timetrack engine and its collaborators.
//!
//! Host glue, log replayers and renderers all speak in these types so the
//! inbound event vocabulary and the outbound notice shape cannot drift apart.
//! The core engine stays the authority on what an event *does*; this crate
//! only names the events and validates messages at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// One independently toggled boolean signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    HasFocus,
    SolutionOpen,
    Building,
    Testing,
    Debugging,
    ScreenSaverActive,
    SessionLocked,
    SystemSuspended,
    LidClosed,
}

impl Condition {
    pub const ALL: [Condition; 9] = [
        Condition::HasFocus,
        Condition::SolutionOpen,
        Condition::Building,
        Condition::Testing,
        Condition::Debugging,
        Condition::ScreenSaverActive,
        Condition::SessionLocked,
        Condition::SystemSuspended,
        Condition::LidClosed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::HasFocus => "has_focus",
            Condition::SolutionOpen => "solution_open",
            Condition::Building => "building",
            Condition::Testing => "testing",
            Condition::Debugging => "debugging",
            Condition::ScreenSaverActive => "screen_saver_active",
            Condition::SessionLocked => "session_locked",
            Condition::SystemSuspended => "system_suspended",
            Condition::LidClosed => "lid_closed",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The derived category describing what the developer is doing right now.
///
/// The away categories (`ScreenSaverRunning` through `MonitorOff`) are part
/// of the vocabulary but the default precedence never selects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLabel {
    Coding,
    Testing,
    Debugging,
    Building,
    NoFocus,
    NoSolution,
    ScreenSaverRunning,
    SessionLocked,
    SystemSuspended,
    LidClosed,
    MonitorOff,
}

impl ActivityLabel {
    pub const ALL: [ActivityLabel; 11] = [
        ActivityLabel::Coding,
        ActivityLabel::Testing,
        ActivityLabel::Debugging,
        ActivityLabel::Building,
        ActivityLabel::NoFocus,
        ActivityLabel::NoSolution,
        ActivityLabel::ScreenSaverRunning,
        ActivityLabel::SessionLocked,
        ActivityLabel::SystemSuspended,
        ActivityLabel::LidClosed,
        ActivityLabel::MonitorOff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLabel::Coding => "coding",
            ActivityLabel::Testing => "testing",
            ActivityLabel::Debugging => "debugging",
            ActivityLabel::Building => "building",
            ActivityLabel::NoFocus => "no_focus",
            ActivityLabel::NoSolution => "no_solution",
            ActivityLabel::ScreenSaverRunning => "screen_saver_running",
            ActivityLabel::SessionLocked => "session_locked",
            ActivityLabel::SystemSuspended => "system_suspended",
            ActivityLabel::LidClosed => "lid_closed",
            ActivityLabel::MonitorOff => "monitor_off",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        ActivityLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == value)
    }

    /// Away categories reserved for a future "away from PC" bucket.
    pub fn is_away(&self) -> bool {
        matches!(
            self,
            ActivityLabel::ScreenSaverRunning
                | ActivityLabel::SessionLocked
                | ActivityLabel::SystemSuspended
                | ActivityLabel::LidClosed
                | ActivityLabel::MonitorOff
        )
    }
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical inbound events. Each one sets exactly one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalEvent {
    FocusGained,
    FocusLost,
    SolutionOpened,
    SolutionClosed,
    BuildStarted,
    BuildFinished,
    TestStarted,
    TestFinished,
    DebugStarted,
    DebugFinished,
    ScreenSaverStarted,
    ScreenSaverStopped,
    SessionLocked,
    SessionUnlocked,
    SystemSuspended,
    SystemResumed,
    LidOpened,
    LidClosed,
}

impl SignalEvent {
    pub const ALL: [SignalEvent; 18] = [
        SignalEvent::FocusGained,
        SignalEvent::FocusLost,
        SignalEvent::SolutionOpened,
        SignalEvent::SolutionClosed,
        SignalEvent::BuildStarted,
        SignalEvent::BuildFinished,
        SignalEvent::TestStarted,
        SignalEvent::TestFinished,
        SignalEvent::DebugStarted,
        SignalEvent::DebugFinished,
        SignalEvent::ScreenSaverStarted,
        SignalEvent::ScreenSaverStopped,
        SignalEvent::SessionLocked,
        SignalEvent::SessionUnlocked,
        SignalEvent::SystemSuspended,
        SignalEvent::SystemResumed,
        SignalEvent::LidOpened,
        SignalEvent::LidClosed,
    ];

    /// The condition this event writes and the value it writes.
    pub fn target(&self) -> (Condition, bool) {
        match self {
            SignalEvent::FocusGained => (Condition::HasFocus, true),
            SignalEvent::FocusLost => (Condition::HasFocus, false),
            SignalEvent::SolutionOpened => (Condition::SolutionOpen, true),
            SignalEvent::SolutionClosed => (Condition::SolutionOpen, false),
            SignalEvent::BuildStarted => (Condition::Building, true),
            SignalEvent::BuildFinished => (Condition::Building, false),
            SignalEvent::TestStarted => (Condition::Testing, true),
            SignalEvent::TestFinished => (Condition::Testing, false),
            SignalEvent::DebugStarted => (Condition::Debugging, true),
            SignalEvent::DebugFinished => (Condition::Debugging, false),
            SignalEvent::ScreenSaverStarted => (Condition::ScreenSaverActive, true),
            SignalEvent::ScreenSaverStopped => (Condition::ScreenSaverActive, false),
            SignalEvent::SessionLocked => (Condition::SessionLocked, true),
            SignalEvent::SessionUnlocked => (Condition::SessionLocked, false),
            SignalEvent::SystemSuspended => (Condition::SystemSuspended, true),
            SignalEvent::SystemResumed => (Condition::SystemSuspended, false),
            SignalEvent::LidOpened => (Condition::LidClosed, false),
            SignalEvent::LidClosed => (Condition::LidClosed, true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalEvent::FocusGained => "focus_gained",
            SignalEvent::FocusLost => "focus_lost",
            SignalEvent::SolutionOpened => "solution_opened",
            SignalEvent::SolutionClosed => "solution_closed",
            SignalEvent::BuildStarted => "build_started",
            SignalEvent::BuildFinished => "build_finished",
            SignalEvent::TestStarted => "test_started",
            SignalEvent::TestFinished => "test_finished",
            SignalEvent::DebugStarted => "debug_started",
            SignalEvent::DebugFinished => "debug_finished",
            SignalEvent::ScreenSaverStarted => "screen_saver_started",
            SignalEvent::ScreenSaverStopped => "screen_saver_stopped",
            SignalEvent::SessionLocked => "session_locked",
            SignalEvent::SessionUnlocked => "session_unlocked",
            SignalEvent::SystemSuspended => "system_suspended",
            SignalEvent::SystemResumed => "system_resumed",
            SignalEvent::LidOpened => "lid_opened",
            SignalEvent::LidClosed => "lid_closed",
        }
    }

    /// The event that moves the screensaver condition to `active`.
    pub fn for_screen_saver(active: bool) -> Self {
        if active {
            SignalEvent::ScreenSaverStarted
        } else {
            SignalEvent::ScreenSaverStopped
        }
    }
}

impl fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message delivered by an event producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Signal {
        event: SignalEvent,
        recorded_at: String,
    },
    ScreenSaverSample {
        active: bool,
        recorded_at: String,
    },
}

impl InboundMessage {
    pub fn signal(event: SignalEvent, at: DateTime<Utc>) -> Self {
        InboundMessage::Signal {
            event,
            recorded_at: at.to_rfc3339(),
        }
    }

    pub fn screen_saver_sample(active: bool, at: DateTime<Utc>) -> Self {
        InboundMessage::ScreenSaverSample {
            active,
            recorded_at: at.to_rfc3339(),
        }
    }

    pub fn recorded_at(&self) -> &str {
        match self {
            InboundMessage::Signal { recorded_at, .. }
            | InboundMessage::ScreenSaverSample { recorded_at, .. } => recorded_at,
        }
    }

    pub fn timestamp(&self) -> Result<DateTime<Utc>, ErrorInfo> {
        DateTime::parse_from_rfc3339(self.recorded_at())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ErrorInfo::new("invalid_timestamp", "recorded_at must be RFC3339"))
    }

    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if self.recorded_at().trim().is_empty() {
            return Err(ErrorInfo::new("missing_field", "recorded_at is required"));
        }
        self.timestamp().map(|_| ())
    }
}

pub fn parse_message(params: Value) -> Result<InboundMessage, ErrorInfo> {
    let message: InboundMessage = serde_json::from_value(params).map_err(|err| {
        ErrorInfo::new(
            "invalid_params",
            format!("message payload is invalid: {}", err),
        )
    })?;
    message.validate()?;
    Ok(message)
}

/// Emitted whenever the composite label changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionNotice {
    pub label: ActivityLabel,
    pub previous: ActivityLabel,
    pub at: DateTime<Utc>,
}

impl fmt::Display for TransitionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Current state: {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.label
        )
    }
}
