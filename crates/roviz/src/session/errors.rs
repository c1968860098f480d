//! Error types for session operations.

use thiserror::Error;

use crate::dispatch::DispatchError;
use crate::event_log::EventLogError;
use crate::transport::TransportError;

/// Errors surfaced by a [`Session`](super::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// Starting or transitioning an entry failed.
    #[error(transparent)]
    Log(#[from] EventLogError),

    /// Dispatching the entry failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The transport could not deliver the response. The entry has been
    /// marked failed.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
}

impl SessionError {
    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, source: TransportError) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}
