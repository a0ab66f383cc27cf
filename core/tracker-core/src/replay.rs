//! Rebuilds a tracker from a recorded JSON-lines message log.

use serde_json::Value;
use std::path::Path;
use timetrack_protocol::{parse_message, ErrorInfo, InboundMessage};

use crate::engine::TimeTracker;
use crate::error::{Result, TrackerError};
use crate::reducer::Conditions;

/// Parses one message per non-blank line. Errors carry the 1-based line.
pub fn parse_log(text: &str) -> Result<Vec<InboundMessage>> {
    let mut messages = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        messages.push(parse_line(index + 1, line)?);
    }
    Ok(messages)
}

pub fn parse_line(line_number: usize, line: &str) -> Result<InboundMessage> {
    let value: Value = serde_json::from_str(line).map_err(|err| {
        TrackerError::invalid_message(
            line_number,
            ErrorInfo::new("invalid_json", err.to_string()),
        )
    })?;
    parse_message(value).map_err(|info| TrackerError::invalid_message(line_number, info))
}

pub fn read_log(path: &Path) -> Result<Vec<InboundMessage>> {
    let text = fs_err::read_to_string(path).map_err(|source| TrackerError::Io {
        context: format!("reading event log {}", path.display()),
        source,
    })?;
    parse_log(&text)
}

/// Starts a tracker at the first message's timestamp and applies every
/// message in order. Returns `None` for an empty log.
pub fn replay(messages: &[InboundMessage], initial: Conditions) -> Result<Option<TimeTracker>> {
    let Some(first) = messages.first() else {
        return Ok(None);
    };
    let started_at = first
        .timestamp()
        .map_err(|info| TrackerError::invalid_message(1, info))?;

    let mut tracker = TimeTracker::new(initial, started_at);
    for (index, message) in messages.iter().enumerate() {
        tracker
            .handle(message)
            .map_err(|info| TrackerError::invalid_message(index + 1, info))?;
    }

    tracing::debug!(
        messages = messages.len(),
        current = %tracker.current(),
        "Replay complete"
    );
    Ok(Some(tracker))
}
