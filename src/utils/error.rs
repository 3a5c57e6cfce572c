//! Error types for aniplay
//!
//! This module defines the custom error types used throughout the crate.
//! We use thiserror for convenient error type definitions; the demo binary
//! uses anyhow at the application boundary.

use thiserror::Error;

/// Main error type for aniplay
#[derive(Error, Debug)]
pub enum PlayerError {
    /// The requested (series, episode) pair does not exist in the catalog.
    /// Terminal for the session: no sink is bound and no retry is attempted.
    #[error("Target not found: series '{series_id}', episode '{episode_id}'")]
    TargetNotFound {
        series_id: String,
        episode_id: String,
    },

    /// Audio track selection that is not part of the current episode
    #[error("Unknown audio track: {0}")]
    UnknownTrack(String),

    /// Subtitle selection that is not part of the current episode
    #[error("Unknown subtitle language: {0}")]
    UnknownSubtitle(String),

    /// Catalog loading or validation errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Media sink command errors
    #[error("Sink error: {0}")]
    Sink(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),
}

/// Convenience type alias for Results in aniplay
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Extension trait for converting other errors to PlayerError
pub trait IntoPlayerError<T> {
    /// Convert this error into a PlayerError with the given context
    fn catalog_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
    fn sink_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPlayerError<T> for std::result::Result<T, E> {
    fn catalog_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Catalog(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Config(format!("{}: {}", context, e)))
    }

    fn sink_err(self, context: &str) -> Result<T> {
        self.map_err(|e| PlayerError::Sink(format!("{}: {}", context, e)))
    }
}
