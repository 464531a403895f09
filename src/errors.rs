use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to resolve pattern '{pattern}': {message}")]
    PatternResolution { pattern: String, message: String },

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Failed to read asset {path:?}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Pattern task failed: {0}")]
    JoinError(String),
}

impl CopyError {
    pub fn pattern_resolution(pattern: &str, err: impl std::fmt::Display) -> Self {
        CopyError::PatternResolution {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CopyError {
    fn from(err: std::io::Error) -> Self {
        CopyError::IoError(err.to_string())
    }
}

impl From<globset::Error> for CopyError {
    fn from(err: globset::Error) -> Self {
        CopyError::InvalidPattern(err.to_string())
    }
}

impl From<serde_json::Error> for CopyError {
    fn from(err: serde_json::Error) -> Self {
        CopyError::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CopyError {
    fn from(err: tokio::task::JoinError) -> Self {
        CopyError::JoinError(err.to_string())
    }
}
