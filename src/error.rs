// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("I/O error: {source} (path: {})", .path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;

// Allow `?` on std::io::Error by converting to StatsError::Io with unknown path.
impl From<std::io::Error> for StatsError {
    fn from(source: std::io::Error) -> Self {
        StatsError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for StatsError {
    fn from(e: walkdir::Error) -> Self {
        StatsError::Other(e.to_string())
    }
}
