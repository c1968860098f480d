//! Error types for transport operations.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced while fetching a representation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no response recorded for {url}")]
    NotFound { url: String },
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request to {url} failed: {message}")]
    Failed { url: String, message: String },
}

impl TransportError {
    /// Creates a not found error.
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Creates a generic failure, for transports without a richer error type.
    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            url: url.into(),
            message: message.into(),
        }
    }
}
