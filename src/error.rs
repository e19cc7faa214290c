//! Error types for the mediafire-dl library.

use thiserror::Error;

/// Main error type for mediafire-dl operations.
#[derive(Error, Debug)]
pub enum MediafireError {
    /// URL does not match any known MediaFire share link shape.
    #[error("invalid MediaFire link: {0}")]
    InvalidLink(String),

    /// API response is missing expected fields or has an unexpected shape.
    #[error("unexpected API response: {0}")]
    MetadataParse(String),

    /// Interstitial page without the expected download link structure,
    /// typically a deleted file or a dangerous-file block.
    #[error("deleted file or dangerous file blocked: {link}")]
    BlockedOrMissing {
        /// The link to inspect manually.
        link: String,
    },

    /// Transport failure while streaming a file body.
    #[error("transfer error: {0}")]
    Transfer(String),

    /// HTTP request failed with status code.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local filesystem error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for mediafire-dl operations.
pub type Result<T> = std::result::Result<T, MediafireError>;
