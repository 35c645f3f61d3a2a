//! Error types for the comic page pipeline

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a comic page
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid site configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Template file could not be read
    #[error("Failed to load template: {0}")]
    TemplateError(String),

    /// No comic image exists for the requested identifier
    #[error("Unknown comic: {0}")]
    ComicNotFound(String),

    /// The comic image exists but its transcript file is missing
    #[error("No transcript for comic: {0}")]
    TranscriptNotFound(String),

    /// Random selection was requested but the image directory holds no comics
    #[error("Image directory contains no comics")]
    EmptyArchive,

    /// Identifier contains path separators or parent-directory components
    #[error("Invalid comic identifier: {0}")]
    InvalidId(String),

    /// Appending to the submission log failed
    #[error("Failed to record submission: {0}")]
    SubmissionError(String),

    /// Server socket error
    #[cfg(feature = "server")]
    #[error("HTTP server error: {0}")]
    HttpError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
