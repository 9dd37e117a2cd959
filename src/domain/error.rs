//! Error types for dexview.
//!
//! This module defines the centralized error type [`DexError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.

use thiserror::Error;

/// The main error type for dexview operations.
///
/// Transport and decode failures come from the API boundary; the remaining
/// variants cover configuration, theming, and the fetch worker.
///
/// # Examples
///
/// ```
/// use dexview::DexError;
///
/// let err = DexError::Transport {
///     url: "https://pokeapi.co/api/v2/pokemon/1".to_string(),
///     status: Some(503),
///     message: "service unavailable".to_string(),
/// };
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, Error)]
pub enum DexError {
    /// The request could not be sent, timed out, or returned a non-2xx status.
    #[error("Transport error for {url} (status {status:?}): {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// HTTP status when the server answered.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// The response body did not match the endpoint schema.
    #[error("Decode error for {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Serde error description.
        message: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A fetch task could not complete or report back.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for dexview operations.
pub type Result<T> = std::result::Result<T, DexError>;
