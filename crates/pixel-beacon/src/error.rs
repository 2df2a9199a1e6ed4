//! Error types for the pixel tracker.

/// Errors that can occur when using the pixel tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A tracking operation was invoked before the tracker was initialized.
    #[error("Pixel tracker not initialized, call `init(pixel_id)` first")]
    Uninitialized,

    /// The event could not be turned into a request.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
