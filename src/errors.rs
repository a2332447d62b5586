//! Error types for quakewatch.
//!
//! Uses `thiserror` for library-style error definitions.

use thiserror::Error;

/// Errors that can occur in quakewatch operations.
#[derive(Error, Debug)]
pub enum QuakewatchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the client timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection could not be established (DNS, refused, unreachable)
    #[error("connection failed: {0}")]
    Connect(String),

    /// API returned an error status
    #[error("USGS API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings file could not be read or written
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid YAML
    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_yaml::Error),
}
