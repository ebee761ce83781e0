//! Error types for trajectory extraction and plotting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, TrajectoryError>;

#[derive(Error, Debug)]
pub enum TrajectoryError {
    #[error("No such recording: no file for subject {subject:?} in {}", directory.display())]
    RecordingNotFound { subject: String, directory: PathBuf },

    #[error("No recordings found for cohort in {}", directory.display())]
    EmptyCohort { directory: PathBuf },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed detection record at frame {frame}: {reason}")]
    MalformedFrame { frame: usize, reason: String },

    #[error("Malformed box {index} at frame {frame}: {reason}")]
    MalformedBox {
        frame: usize,
        index: usize,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

impl TrajectoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
