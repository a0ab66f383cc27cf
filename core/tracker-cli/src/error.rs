use thiserror::Error;
use timetrack_core::TrackerError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
