//! Error types for timetrack-core boundary operations.
//!
//! The engine itself is total: applying events, advancing the ledger and
//! taking snapshots never fail. Errors only arise where the core touches the
//! outside world (config files, event logs, inbound message parsing).

use std::path::PathBuf;

use timetrack_protocol::ErrorInfo;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Inbound Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid message on line {line}: {code}: {message}")]
    InvalidMessage {
        line: usize,
        code: String,
        message: String,
    },

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    pub fn invalid_message(line: usize, info: ErrorInfo) -> Self {
        TrackerError::InvalidMessage {
            line,
            code: info.code,
            message: info.message,
        }
    }
}

/// Convenience type alias for Results using TrackerError.
pub type Result<T> = std::result::Result<T, TrackerError>;
