//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// A config file that cannot be used. Fatal for the session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing value for \"{key}\"")]
    MissingValue { key: &'static str },

    #[error("\"{key}\" must be a whole number, got \"{value}\"")]
    InvalidNumber { key: &'static str, value: String },

    #[error("\"{key}\" must be yes or no, got \"{value}\"")]
    InvalidFlag { key: &'static str, value: String },

    #[error("\"{key}\" must be at least {min}, got {value}")]
    OutOfRange {
        key: &'static str,
        min: u64,
        value: u64,
    },
}

/// Best-score file problems
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no score found in {}", .path.display())]
    Malformed { path: PathBuf },
}

/// A frame that could not be drawn. The frame is skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("viewport {width}x{height} is smaller than the required {min_width}x{min_height}")]
    ViewportTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for std::io::Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Io(io) => io,
            other => std::io::Error::new(std::io::ErrorKind::Other, other),
        }
    }
}
