//! Error types for the Unspot API client.

use thiserror::Error;

/// Errors that can occur when talking to the booking API.
#[derive(Debug, Error)]
pub enum UnspotError {
    /// HTTP request failed or the response body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an unsuccessful status.
    #[error("booking API error ({status}): {message}")]
    Api { status: u16, message: String },
}
