//! Error types for the card renderer

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while laying out and writing cards
#[derive(Error, Debug)]
pub enum Error {
    /// A font produced metrics that no layout decision can be based on
    #[error("Text measurement failed: {0}")]
    Measurement(String),

    /// The pixel buffer could not be allocated at the requested size
    #[error("Canvas allocation failed: {0}")]
    Canvas(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The input document contained nothing to render
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding error
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed JSON configuration
    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}
