//! Error types for the cellchat domain.
//!
//! Building a context never fails; errors only come from the edges that
//! touch the filesystem, such as loading a recorded session history.

use std::path::PathBuf;
use thiserror::Error;

/// Failures loading a recorded session history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to read history file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse history file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}
